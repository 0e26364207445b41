//! Churn scoring: turns raw account metrics into risk signals.
//!
//! For each account this:
//!   1. Measures the engagement trend against the previous score
//!   2. Computes a churn probability from a weighted linear formula
//!   3. Clamps the probability to [0, 1]
//!   4. Prices the revenue at risk
//!   5. Buckets the account into a health tier
//!
//! Pure: no I/O, no RNG, no state beyond the immutable config.

use crate::{
    account::Account,
    config::{HealthThresholds, ScoringConfig, TrendThresholds},
};
use serde::{Deserialize, Serialize};
use std::fmt;

// ── Public types ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TrendStatus {
    #[serde(rename = "Sharp Decline")]
    SharpDecline,
    Declining,
    Stable,
    Improving,
    #[serde(rename = "Strong Growth")]
    StrongGrowth,
}

impl TrendStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::SharpDecline => "Sharp Decline",
            Self::Declining    => "Declining",
            Self::Stable       => "Stable",
            Self::Improving    => "Improving",
            Self::StrongGrowth => "Strong Growth",
        }
    }
}

impl fmt::Display for TrendStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ordered by severity: Healthy < Watchlist < AtRisk.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HealthTier {
    Healthy,
    Watchlist,
    #[serde(rename = "At Risk")]
    AtRisk,
}

impl HealthTier {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Healthy   => "Healthy",
            Self::Watchlist => "Watchlist",
            Self::AtRisk    => "At Risk",
        }
    }
}

impl fmt::Display for HealthTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An account plus every derived field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredAccount {
    #[serde(flatten)]
    pub account:           Account,
    pub engagement_change: i64,
    pub trend_status:      TrendStatus,
    pub churn_probability: f64,
    pub revenue_at_risk:   f64,
    pub health_tier:       HealthTier,
}

/// The three weighted terms of the churn formula, each already divided
/// into probability units. Their sum is the unclamped probability.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ChurnDrivers {
    pub engagement: f64,
    pub support:    f64,
    pub renewal:    f64,
}

impl ChurnDrivers {
    pub fn total(&self) -> f64 {
        self.engagement + self.support + self.renewal
    }

    /// Name of the largest term. Ties go to the earlier of
    /// engagement, support, renewal.
    pub fn primary_driver(&self) -> &'static str {
        let drivers = [
            ("engagement", self.engagement),
            ("support",    self.support),
            ("renewal",    self.renewal),
        ];

        drivers
            .iter()
            .fold(None::<(&'static str, f64)>, |best, &(name, value)| match best {
                Some((_, best_value)) if best_value >= value => best,
                _ => Some((name, value)),
            })
            .map(|(name, _)| name)
            .unwrap_or("engagement")
    }
}

// ── Classification ───────────────────────────────────────────────────────────

/// Bucket an engagement change. Both thresholds are strict, so a change
/// equal to `sharp_decline` is Declining and one equal to `strong_growth`
/// is Improving.
pub fn classify_trend(change: i64, t: &TrendThresholds) -> TrendStatus {
    if change < t.sharp_decline {
        TrendStatus::SharpDecline
    } else if change < 0 {
        TrendStatus::Declining
    } else if change > t.strong_growth {
        TrendStatus::StrongGrowth
    } else if change > 0 {
        TrendStatus::Improving
    } else {
        TrendStatus::Stable
    }
}

pub fn assign_health(probability: f64, t: &HealthThresholds) -> HealthTier {
    if probability >= t.at_risk {
        HealthTier::AtRisk
    } else if probability >= t.watchlist {
        HealthTier::Watchlist
    } else {
        HealthTier::Healthy
    }
}

// ── Scorer ───────────────────────────────────────────────────────────────────

pub struct ChurnScorer {
    config: ScoringConfig,
}

impl ChurnScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Unclamped churn probability. Evaluated as a single expression in
    /// formula order so results match the reference arithmetic bit for bit.
    pub fn raw_probability(&self, account: &Account) -> f64 {
        let f = &self.config.churn_formula;

        ((f.engagement_ceiling - account.engagement_score as f64) * f.engagement_weight
            + account.support_tickets as f64 * f.support_ticket_weight
            + (f.renewal_horizon_days - account.days_to_renewal as f64) * f.renewal_weight)
            / f.divisor
    }

    pub fn churn_probability(&self, account: &Account) -> f64 {
        self.raw_probability(account).clamp(0.0, 1.0)
    }

    pub fn drivers(&self, account: &Account) -> ChurnDrivers {
        let f = &self.config.churn_formula;

        ChurnDrivers {
            engagement: (f.engagement_ceiling - account.engagement_score as f64)
                * f.engagement_weight
                / f.divisor,
            support: account.support_tickets as f64 * f.support_ticket_weight / f.divisor,
            renewal: (f.renewal_horizon_days - account.days_to_renewal as f64)
                * f.renewal_weight
                / f.divisor,
        }
    }

    pub fn score(&self, account: &Account) -> ScoredAccount {
        let engagement_change = account.engagement_score - account.prev_engagement_score;
        let trend_status = classify_trend(engagement_change, &self.config.trend_thresholds);

        let churn_probability = self.churn_probability(account);
        let revenue_at_risk = account.monthly_revenue as f64 * churn_probability;
        let health_tier = assign_health(churn_probability, &self.config.health_thresholds);

        ScoredAccount {
            account: account.clone(),
            engagement_change,
            trend_status,
            churn_probability,
            revenue_at_risk,
            health_tier,
        }
    }

    pub fn score_all(&self, accounts: &[Account]) -> Vec<ScoredAccount> {
        let scored: Vec<ScoredAccount> = accounts.iter().map(|a| self.score(a)).collect();

        if log::log_enabled!(log::Level::Debug) {
            let at_risk = scored
                .iter()
                .filter(|s| s.health_tier == HealthTier::AtRisk)
                .count();
            log::debug!("scoring: {} accounts scored, {} at risk", scored.len(), at_risk);
        }

        scored
    }
}

impl Default for ChurnScorer {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trend_boundaries_are_strict() {
        let t = TrendThresholds::default();
        assert_eq!(classify_trend(-16, &t), TrendStatus::SharpDecline);
        assert_eq!(classify_trend(-15, &t), TrendStatus::Declining);
        assert_eq!(classify_trend(-1, &t), TrendStatus::Declining);
        assert_eq!(classify_trend(0, &t), TrendStatus::Stable);
        assert_eq!(classify_trend(1, &t), TrendStatus::Improving);
        assert_eq!(classify_trend(15, &t), TrendStatus::Improving);
        assert_eq!(classify_trend(16, &t), TrendStatus::StrongGrowth);
    }

    #[test]
    fn health_boundaries_are_inclusive_below() {
        let t = HealthThresholds::default();
        assert_eq!(assign_health(0.0, &t), HealthTier::Healthy);
        assert_eq!(assign_health(0.4999, &t), HealthTier::Healthy);
        assert_eq!(assign_health(0.5, &t), HealthTier::Watchlist);
        assert_eq!(assign_health(0.7499, &t), HealthTier::Watchlist);
        assert_eq!(assign_health(0.75, &t), HealthTier::AtRisk);
        assert_eq!(assign_health(1.0, &t), HealthTier::AtRisk);
    }

    #[test]
    fn primary_driver_picks_largest_term() {
        let d = ChurnDrivers { engagement: 0.16, support: 0.20, renewal: 0.01 };
        assert_eq!(d.primary_driver(), "support");

        let tie = ChurnDrivers { engagement: 0.1, support: 0.1, renewal: 0.1 };
        assert_eq!(tie.primary_driver(), "engagement");
    }

    #[test]
    fn tier_ordering_is_by_severity() {
        assert!(HealthTier::Healthy < HealthTier::Watchlist);
        assert!(HealthTier::Watchlist < HealthTier::AtRisk);
    }

    #[test]
    fn serialized_labels_match_display() {
        for status in [
            TrendStatus::SharpDecline,
            TrendStatus::Declining,
            TrendStatus::Stable,
            TrendStatus::Improving,
            TrendStatus::StrongGrowth,
        ] {
            assert_eq!(serde_json::to_string(&status).unwrap(), format!("\"{status}\""));
        }
        for tier in [HealthTier::Healthy, HealthTier::Watchlist, HealthTier::AtRisk] {
            assert_eq!(serde_json::to_string(&tier).unwrap(), format!("\"{tier}\""));
        }
    }
}
