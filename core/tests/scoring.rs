use revenue_core::{
    account::{Account, ContractStatus},
    config::EngineConfig,
    engine::RevenueEngine,
    scoring::{ChurnScorer, HealthTier, TrendStatus},
};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn account(
    monthly_revenue: i64,
    engagement_score: i64,
    prev_engagement_score: i64,
    support_tickets: i64,
    days_to_renewal: i64,
) -> Account {
    Account {
        company: "Company_test".into(),
        monthly_revenue,
        engagement_score,
        support_tickets,
        days_to_renewal,
        contract_status: ContractStatus::Active,
        prev_engagement_score,
    }
}

fn scored_portfolio(seed: u64, n: usize) -> revenue_core::engine::Portfolio {
    let mut config = EngineConfig::default();
    config.generator.seed = seed;
    config.generator.num_accounts = n;
    RevenueEngine::build(config).unwrap().run()
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// Worked example: a sharp engagement drop on an otherwise healthy account.
#[test]
fn worked_example_scores_as_documented() {
    let scorer = ChurnScorer::default();
    let s = scorer.score(&account(1000, 60, 80, 4, 170));

    assert_eq!(s.engagement_change, -20);
    assert_eq!(s.trend_status, TrendStatus::SharpDecline);
    assert!((s.churn_probability - 0.37).abs() < 1e-12, "p={}", s.churn_probability);
    assert_eq!(s.health_tier, HealthTier::Healthy);
    assert!((s.revenue_at_risk - 370.0).abs() < 1e-9, "rar={}", s.revenue_at_risk);
}

/// Raw probability above 1.0 saturates at exactly 1.0.
#[test]
fn saturated_probability_is_clamped_to_one() {
    let scorer = ChurnScorer::default();
    let a = account(4321, 10, 10, 20, 0);

    assert!((scorer.raw_probability(&a) - 1.54).abs() < 1e-12);

    let s = scorer.score(&a);
    assert_eq!(s.churn_probability, 1.0);
    assert_eq!(s.health_tier, HealthTier::AtRisk);
    assert_eq!(s.revenue_at_risk, 4321.0);
    assert_eq!(s.trend_status, TrendStatus::Stable);
}

/// Out-of-range inputs can push the raw sum negative; the clamp holds it at 0.
#[test]
fn negative_raw_probability_is_clamped_to_zero() {
    let scorer = ChurnScorer::default();
    let a = account(900, 150, 150, 0, 400);

    assert!(scorer.raw_probability(&a) < 0.0);
    let s = scorer.score(&a);
    assert_eq!(s.churn_probability, 0.0);
    assert_eq!(s.revenue_at_risk, 0.0);
    assert_eq!(s.health_tier, HealthTier::Healthy);
}

/// Probabilities landing exactly on 0.5 and 0.75 take the riskier tier.
#[test]
fn tier_thresholds_are_inclusive() {
    let scorer = ChurnScorer::default();

    // (0 + 10*5 + 0) / 100 = 0.5
    let watch = scorer.score(&account(1000, 100, 100, 10, 180));
    assert_eq!(watch.churn_probability, 0.5);
    assert_eq!(watch.health_tier, HealthTier::Watchlist);

    // (0 + 15*5 + 0) / 100 = 0.75
    let at_risk = scorer.score(&account(1000, 100, 100, 15, 180));
    assert_eq!(at_risk.churn_probability, 0.75);
    assert_eq!(at_risk.health_tier, HealthTier::AtRisk);
}

/// Engagement changes of exactly ±15 stay in the milder buckets.
#[test]
fn trend_boundaries_classify_as_milder_bucket() {
    let scorer = ChurnScorer::default();

    let cases = [
        (50, 66, TrendStatus::SharpDecline),
        (50, 65, TrendStatus::Declining),
        (50, 51, TrendStatus::Declining),
        (50, 50, TrendStatus::Stable),
        (50, 49, TrendStatus::Improving),
        (50, 35, TrendStatus::Improving),
        (50, 34, TrendStatus::StrongGrowth),
    ];

    for (now, prev, expected) in cases {
        let s = scorer.score(&account(1000, now, prev, 2, 90));
        assert_eq!(
            s.trend_status, expected,
            "change {} classified as {:?}", s.engagement_change, s.trend_status
        );
    }
}

/// Every generated account honours the clamp and the exact revenue product.
#[test]
fn generated_portfolio_satisfies_scoring_invariants() {
    let portfolio = scored_portfolio(42, 500);

    for s in &portfolio.accounts {
        assert!(
            (0.0..=1.0).contains(&s.churn_probability),
            "churn_probability={} must be in [0,1]", s.churn_probability
        );
        assert_eq!(
            s.revenue_at_risk,
            s.account.monthly_revenue as f64 * s.churn_probability,
            "revenue_at_risk must be the unrounded product for {}", s.account.company
        );
        assert_eq!(
            s.engagement_change,
            s.account.engagement_score - s.account.prev_engagement_score
        );
    }
}

/// Health tiers partition the probability line with no gaps or overlaps.
#[test]
fn health_tiers_partition_by_probability() {
    let portfolio = scored_portfolio(7, 500);

    for s in &portfolio.accounts {
        let p = s.churn_probability;
        let expected = if p >= 0.75 {
            HealthTier::AtRisk
        } else if p >= 0.5 {
            HealthTier::Watchlist
        } else {
            HealthTier::Healthy
        };
        assert_eq!(s.health_tier, expected, "p={p}");
    }
}

/// Drivers explain the formula: their sum matches the raw probability.
#[test]
fn drivers_sum_to_raw_probability() {
    let scorer = ChurnScorer::default();
    let a = account(1000, 60, 80, 4, 170);

    let d = scorer.drivers(&a);
    assert!((d.engagement - 0.16).abs() < 1e-12);
    assert!((d.support - 0.20).abs() < 1e-12);
    assert!((d.renewal - 0.01).abs() < 1e-12);
    assert!((d.total() - scorer.raw_probability(&a)).abs() < 1e-12);
    assert_eq!(d.primary_driver(), "support");
}

/// Custom weights flow through the scorer.
#[test]
fn custom_weights_change_the_score() {
    let config = EngineConfig::from_json(
        r#"{ "scoring": { "churn_formula": { "support_ticket_weight": 10.0 } } }"#,
    )
    .unwrap();
    let scorer = ChurnScorer::new(config.scoring);

    // (16 + 40 + 1) / 100
    let s = scorer.score(&account(1000, 60, 80, 4, 170));
    assert!((s.churn_probability - 0.57).abs() < 1e-12);
    assert_eq!(s.health_tier, HealthTier::Watchlist);
}
