use crate::error::{RevenueError, RevenueResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest accepted mean for the support-ticket draw.
pub const MAX_SUPPORT_TICKET_MEAN: f64 = 1.0e6;

// ── Generator ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub num_accounts: usize,
    pub seed: u64,
    pub company_prefix: String,
    /// Half-open [low, high).
    pub monthly_revenue_range: (i64, i64),
    pub engagement_range: (i64, i64),
    pub support_ticket_mean: f64,
    pub days_to_renewal_range: (i64, i64),
    pub expired_probability: f64,
    pub engagement_noise_range: (i64, i64),
    /// Closed [low, high] clamp for the previous engagement score.
    pub engagement_bounds: (i64, i64),
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            num_accounts: 200,
            seed: 42,
            company_prefix: "Company_".to_string(),
            monthly_revenue_range: (500, 10_000),
            engagement_range: (10, 100),
            support_ticket_mean: 4.0,
            days_to_renewal_range: (0, 180),
            expired_probability: 0.25,
            engagement_noise_range: (-20, 20),
            engagement_bounds: (0, 100),
        }
    }
}

// ── Scoring ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChurnFormulaWeights {
    pub engagement_ceiling: f64,
    pub engagement_weight: f64,
    pub support_ticket_weight: f64,
    pub renewal_horizon_days: f64,
    pub renewal_weight: f64,
    pub divisor: f64,
}

impl Default for ChurnFormulaWeights {
    fn default() -> Self {
        Self {
            engagement_ceiling: 100.0,
            engagement_weight: 0.4,
            support_ticket_weight: 5.0,
            renewal_horizon_days: 180.0,
            renewal_weight: 0.1,
            divisor: 100.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthThresholds {
    pub watchlist: f64,
    pub at_risk: f64,
}

impl Default for HealthThresholds {
    fn default() -> Self {
        Self { watchlist: 0.5, at_risk: 0.75 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendThresholds {
    /// Changes strictly below this are a sharp decline.
    pub sharp_decline: i64,
    /// Changes strictly above this are strong growth.
    pub strong_growth: i64,
}

impl Default for TrendThresholds {
    fn default() -> Self {
        Self { sharp_decline: -15, strong_growth: 15 }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub churn_formula: ChurnFormulaWeights,
    pub health_thresholds: HealthThresholds,
    pub trend_thresholds: TrendThresholds,
}

// ── Report ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub top_n: usize,
    pub csv_path: String,
    pub chart_path: String,
    pub chart_width: u32,
    pub chart_height: u32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_n: 10,
            csv_path: "revenue_risk_report.csv".to_string(),
            chart_path: "revenue_risk_chart.svg".to_string(),
            chart_width: 640,
            chart_height: 480,
        }
    }
}

// ── Top level ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub generator: GeneratorConfig,
    pub scoring: ScoringConfig,
    pub report: ReportConfig,
}

impl EngineConfig {
    /// Load a JSON config file. Missing sections and fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> RevenueResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            RevenueError::Other(anyhow::anyhow!("Cannot read {}: {e}", path.display()))
        })?;
        let config = Self::from_json(&content)?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(content: &str) -> RevenueResult<Self> {
        let config: EngineConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> RevenueResult<()> {
        let g = &self.generator;
        check_range("generator.monthly_revenue_range", g.monthly_revenue_range)?;
        check_range("generator.engagement_range", g.engagement_range)?;
        check_range("generator.days_to_renewal_range", g.days_to_renewal_range)?;
        check_range("generator.engagement_noise_range", g.engagement_noise_range)?;
        if g.engagement_bounds.0 > g.engagement_bounds.1 {
            return Err(invalid(
                "generator.engagement_bounds",
                format!("low {} exceeds high {}", g.engagement_bounds.0, g.engagement_bounds.1),
            ));
        }
        if !(g.support_ticket_mean > 0.0 && g.support_ticket_mean <= MAX_SUPPORT_TICKET_MEAN) {
            return Err(invalid(
                "generator.support_ticket_mean",
                format!(
                    "must be within (0, {MAX_SUPPORT_TICKET_MEAN}], got {}",
                    g.support_ticket_mean
                ),
            ));
        }
        if !(0.0..=1.0).contains(&g.expired_probability) {
            return Err(invalid(
                "generator.expired_probability",
                format!("must be within [0, 1], got {}", g.expired_probability),
            ));
        }

        let f = &self.scoring.churn_formula;
        if f.divisor == 0.0 || !f.divisor.is_finite() {
            return Err(invalid("scoring.churn_formula.divisor", "must be non-zero".into()));
        }

        let h = &self.scoring.health_thresholds;
        if h.watchlist > h.at_risk {
            return Err(invalid(
                "scoring.health_thresholds",
                format!("watchlist {} exceeds at_risk {}", h.watchlist, h.at_risk),
            ));
        }

        let t = &self.scoring.trend_thresholds;
        if t.sharp_decline > 0 || t.strong_growth < 0 {
            return Err(invalid(
                "scoring.trend_thresholds",
                format!(
                    "sharp_decline {} must be <= 0 and strong_growth {} >= 0",
                    t.sharp_decline, t.strong_growth
                ),
            ));
        }

        Ok(())
    }
}

fn check_range(field: &'static str, (low, high): (i64, i64)) -> RevenueResult<()> {
    if high <= low {
        return Err(invalid(field, format!("empty range [{low}, {high})")));
    }
    Ok(())
}

fn invalid(field: &'static str, reason: String) -> RevenueError {
    RevenueError::InvalidConfig { field, reason }
}
