//! Portfolio aggregation: KPIs, per-tier breakdowns, ranking and filtering.

use crate::{
    error::{RevenueError, RevenueResult},
    scoring::{HealthTier, ScoredAccount},
    types::Revenue,
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt, str::FromStr};

// ── KPIs ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortfolioSummary {
    pub account_count:   usize,
    pub total_revenue:   Revenue,
    pub revenue_at_risk: f64,
    /// `None` when total revenue is zero (e.g. an empty portfolio).
    pub percent_at_risk: Option<f64>,
}

impl PortfolioSummary {
    pub fn from_accounts<'a, I>(accounts: I) -> Self
    where
        I: IntoIterator<Item = &'a ScoredAccount>,
    {
        let mut account_count = 0usize;
        let mut total_revenue: Revenue = 0;
        let mut revenue_at_risk = 0.0;

        for s in accounts {
            account_count += 1;
            total_revenue += s.account.monthly_revenue;
            revenue_at_risk += s.revenue_at_risk;
        }

        let percent_at_risk = if total_revenue == 0 {
            None
        } else {
            Some(revenue_at_risk / total_revenue as f64 * 100.0)
        };

        Self { account_count, total_revenue, revenue_at_risk, percent_at_risk }
    }

    /// "12.34%" or "n/a" when undefined.
    pub fn percent_label(&self) -> String {
        match self.percent_at_risk {
            Some(p) => format!("{p:.2}%"),
            None => "n/a".to_string(),
        }
    }
}

// ── Tier breakdown ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TierTotal {
    pub tier:            HealthTier,
    pub accounts:        usize,
    pub revenue_at_risk: f64,
}

/// Revenue at risk summed per tier, ordered by tier label. Tiers with no
/// accounts are left out rather than reported as zero.
pub fn tier_breakdown<'a, I>(accounts: I) -> Vec<TierTotal>
where
    I: IntoIterator<Item = &'a ScoredAccount>,
{
    let mut totals: BTreeMap<&'static str, TierTotal> = BTreeMap::new();

    for s in accounts {
        let entry = totals.entry(s.health_tier.label()).or_insert(TierTotal {
            tier: s.health_tier,
            accounts: 0,
            revenue_at_risk: 0.0,
        });
        entry.accounts += 1;
        entry.revenue_at_risk += s.revenue_at_risk;
    }

    totals.into_values().collect()
}

/// Account count per tier; same ordering and omission rule as `tier_breakdown`.
pub fn tier_counts<'a, I>(accounts: I) -> Vec<(HealthTier, usize)>
where
    I: IntoIterator<Item = &'a ScoredAccount>,
{
    tier_breakdown(accounts)
        .into_iter()
        .map(|t| (t.tier, t.accounts))
        .collect()
}

// ── Ranking ──────────────────────────────────────────────────────────────────

/// Accounts ordered by revenue at risk, highest first. Ties keep input order.
pub fn sort_by_revenue_at_risk<'a, I>(accounts: I) -> Vec<&'a ScoredAccount>
where
    I: IntoIterator<Item = &'a ScoredAccount>,
{
    let mut sorted: Vec<&ScoredAccount> = accounts.into_iter().collect();
    sorted.sort_by(|a, b| b.revenue_at_risk.total_cmp(&a.revenue_at_risk));
    sorted
}

pub fn top_by_revenue_at_risk<'a, I>(accounts: I, n: usize) -> Vec<&'a ScoredAccount>
where
    I: IntoIterator<Item = &'a ScoredAccount>,
{
    let mut sorted = sort_by_revenue_at_risk(accounts);
    sorted.truncate(n);
    sorted
}

// ── Filter ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TierFilter {
    #[default]
    All,
    Tier(HealthTier),
}

impl TierFilter {
    /// Choices in display order.
    pub const OPTIONS: [TierFilter; 4] = [
        TierFilter::All,
        TierFilter::Tier(HealthTier::Healthy),
        TierFilter::Tier(HealthTier::Watchlist),
        TierFilter::Tier(HealthTier::AtRisk),
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Tier(tier) => tier.label(),
        }
    }

    pub fn matches(&self, account: &ScoredAccount) -> bool {
        match self {
            Self::All => true,
            Self::Tier(tier) => account.health_tier == *tier,
        }
    }

    pub fn apply<'a, I>(&self, accounts: I) -> Vec<&'a ScoredAccount>
    where
        I: IntoIterator<Item = &'a ScoredAccount>,
    {
        accounts.into_iter().filter(|a| self.matches(a)).collect()
    }

    /// Position in `OPTIONS`.
    pub fn index(&self) -> usize {
        Self::OPTIONS
            .iter()
            .position(|o| o == self)
            .unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        Self::OPTIONS[(self.index() + 1) % Self::OPTIONS.len()]
    }

    pub fn previous(&self) -> Self {
        let len = Self::OPTIONS.len();
        Self::OPTIONS[(self.index() + len - 1) % len]
    }
}

impl fmt::Display for TierFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TierFilter {
    type Err = RevenueError;

    fn from_str(s: &str) -> RevenueResult<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "all" => Ok(Self::All),
            "healthy" => Ok(Self::Tier(HealthTier::Healthy)),
            "watchlist" => Ok(Self::Tier(HealthTier::Watchlist)),
            "atrisk" => Ok(Self::Tier(HealthTier::AtRisk)),
            _ => Err(RevenueError::UnknownTier { name: s.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_parses_labels() {
        assert_eq!("All".parse::<TierFilter>().unwrap(), TierFilter::All);
        assert_eq!(
            "At Risk".parse::<TierFilter>().unwrap(),
            TierFilter::Tier(HealthTier::AtRisk)
        );
        assert_eq!(
            "at_risk".parse::<TierFilter>().unwrap(),
            TierFilter::Tier(HealthTier::AtRisk)
        );
        assert_eq!(
            "WATCHLIST".parse::<TierFilter>().unwrap(),
            TierFilter::Tier(HealthTier::Watchlist)
        );
        assert!(matches!(
            "Critical".parse::<TierFilter>(),
            Err(RevenueError::UnknownTier { .. })
        ));
    }

    #[test]
    fn filter_cycles_through_options() {
        let mut f = TierFilter::All;
        let mut seen = Vec::new();
        for _ in 0..TierFilter::OPTIONS.len() {
            seen.push(f);
            f = f.next();
        }
        assert_eq!(seen, TierFilter::OPTIONS.to_vec());
        assert_eq!(f, TierFilter::All);
        assert_eq!(TierFilter::All.previous(), TierFilter::Tier(HealthTier::AtRisk));
    }

    #[test]
    fn empty_summary_has_undefined_percent() {
        let summary = PortfolioSummary::from_accounts(&Vec::<ScoredAccount>::new());
        assert_eq!(summary.total_revenue, 0);
        assert_eq!(summary.percent_at_risk, None);
        assert_eq!(summary.percent_label(), "n/a");
    }

    #[test]
    fn tier_totals_serialize_with_display_labels() {
        let total = TierTotal {
            tier: HealthTier::AtRisk,
            accounts: 7,
            revenue_at_risk: 1250.5,
        };
        let json = serde_json::to_string(&total).unwrap();
        assert_eq!(json, r#"{"tier":"At Risk","accounts":7,"revenue_at_risk":1250.5}"#);

        let back: TierTotal = serde_json::from_str(&json).unwrap();
        assert_eq!(back, total);
    }
}
