//! Plain-text report blocks for the batch runner.

use crate::{
    scoring::ScoredAccount,
    summary::{PortfolioSummary, TierTotal},
};
use std::fmt::Write as _;

/// "$1,234,567": rounded to whole currency, thousands separated.
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

pub fn format_summary(summary: &PortfolioSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "===== REVENUE HEALTH SUMMARY =====");
    let _ = writeln!(out, "  accounts:          {}", summary.account_count);
    let _ = writeln!(out, "  total revenue:     {}", format_currency(summary.total_revenue as f64));
    let _ = writeln!(out, "  revenue at risk:   {:.2}", summary.revenue_at_risk);
    let _ = writeln!(out, "  % revenue at risk: {}", summary.percent_label());
    out
}

pub fn format_top_table(title: &str, accounts: &[&ScoredAccount]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "===== {title} =====");

    if accounts.is_empty() {
        let _ = writeln!(out, "  (no accounts)");
        return out;
    }

    let company_w = accounts
        .iter()
        .map(|s| s.account.company.len())
        .max()
        .unwrap_or(0)
        .max("company".len());

    let _ = writeln!(
        out,
        "  {:<company_w$}  {:>15}  {:<11}  {:>17}  {:>15}  {:<13}",
        "company", "monthly_revenue", "health_tier", "churn_probability", "revenue_at_risk", "trend_status",
    );
    for s in accounts {
        let _ = writeln!(
            out,
            "  {:<company_w$}  {:>15}  {:<11}  {:>17.4}  {:>15.2}  {:<13}",
            s.account.company,
            s.account.monthly_revenue,
            s.health_tier.label(),
            s.churn_probability,
            s.revenue_at_risk,
            s.trend_status.label(),
        );
    }
    out
}

pub fn format_breakdown(breakdown: &[TierTotal]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "===== REVENUE AT RISK BY HEALTH TIER =====");

    if breakdown.is_empty() {
        let _ = writeln!(out, "  (no accounts)");
        return out;
    }

    for t in breakdown {
        let _ = writeln!(
            out,
            "  {:<9}  {:>4} accounts  {:>14}",
            t.tier.label(),
            t.accounts,
            format_currency(t.revenue_at_risk),
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(999.4), "$999");
        assert_eq!(format_currency(1_000.0), "$1,000");
        assert_eq!(format_currency(1_234_567.8), "$1,234,568");
        assert_eq!(format_currency(-2_500.0), "-$2,500");
    }

    #[test]
    fn summary_shows_na_for_zero_revenue() {
        let summary = PortfolioSummary {
            account_count: 0,
            total_revenue: 0,
            revenue_at_risk: 0.0,
            percent_at_risk: None,
        };
        let text = format_summary(&summary);
        assert!(text.contains("% revenue at risk: n/a"));
    }
}
