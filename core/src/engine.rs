//! The pipeline engine: config → generator → scorer → portfolio.
//!
//! EXECUTION ORDER (fixed):
//!   1. Generate the synthetic account batch
//!   2. Score every account once
//!   3. Compute portfolio KPIs over the full, unfiltered set
//!
//! RULES:
//!   - Records are never mutated after scoring.
//!   - All randomness flows through the RngBank seeded from config.
//!   - Filters narrow what is displayed, never what the KPIs cover.

use crate::{
    account::Account,
    config::EngineConfig,
    error::RevenueResult,
    generator::AccountGenerator,
    scoring::{ChurnScorer, ScoredAccount},
    summary::{self, PortfolioSummary, TierFilter, TierTotal},
};

pub struct RevenueEngine {
    pub config: EngineConfig,
    generator:  AccountGenerator,
    scorer:     ChurnScorer,
}

impl RevenueEngine {
    /// Validate the config and wire the pipeline stages.
    pub fn build(config: EngineConfig) -> RevenueResult<Self> {
        config.validate()?;
        Ok(Self {
            generator: AccountGenerator::new(config.generator.clone()),
            scorer:    ChurnScorer::new(config.scoring.clone()),
            config,
        })
    }

    pub fn scorer(&self) -> &ChurnScorer {
        &self.scorer
    }

    /// Generate and score a fresh batch.
    pub fn run(&self) -> Portfolio {
        let accounts = self.generator.generate();
        self.score(&accounts)
    }

    /// Score caller-supplied accounts instead of a generated batch.
    pub fn score(&self, accounts: &[Account]) -> Portfolio {
        let scored = self.scorer.score_all(accounts);
        let portfolio = Portfolio::new(scored);

        log::debug!(
            "engine: portfolio ready (accounts={}, revenue_at_risk={:.2})",
            portfolio.summary.account_count,
            portfolio.summary.revenue_at_risk,
        );
        portfolio
    }
}

/// A scored batch plus KPIs computed over all of it.
#[derive(Debug, Clone)]
pub struct Portfolio {
    pub accounts: Vec<ScoredAccount>,
    pub summary:  PortfolioSummary,
}

/// What a presentation layer shows for one filter choice.
#[derive(Debug, Clone)]
pub struct PortfolioView<'a> {
    pub filter:    TierFilter,
    /// Matching rows, highest revenue at risk first.
    pub rows:      Vec<&'a ScoredAccount>,
    pub breakdown: Vec<TierTotal>,
}

impl Portfolio {
    pub fn new(accounts: Vec<ScoredAccount>) -> Self {
        let summary = PortfolioSummary::from_accounts(&accounts);
        Self { accounts, summary }
    }

    pub fn breakdown(&self) -> Vec<TierTotal> {
        summary::tier_breakdown(&self.accounts)
    }

    pub fn top(&self, n: usize) -> Vec<&ScoredAccount> {
        summary::top_by_revenue_at_risk(&self.accounts, n)
    }

    pub fn view(&self, filter: TierFilter) -> PortfolioView<'_> {
        let matching = filter.apply(&self.accounts);
        let breakdown = summary::tier_breakdown(matching.iter().copied());
        let rows = summary::sort_by_revenue_at_risk(matching);
        PortfolioView { filter, rows, breakdown }
    }
}
