//! Synthetic account generation.
//!
//! Every column is drawn from its own RNG stream (see rng.rs), so the
//! batch for a given seed is stable and a column can be regenerated
//! without touching its neighbours.

use crate::{
    account::{Account, ContractStatus},
    config::GeneratorConfig,
    rng::{FieldSlot, RngBank},
};

pub struct AccountGenerator {
    config: GeneratorConfig,
}

impl AccountGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Generate `num_accounts` fully-populated records.
    pub fn generate(&self) -> Vec<Account> {
        let cfg = &self.config;
        let bank = RngBank::new(cfg.seed);

        let mut revenue_rng  = bank.for_field(FieldSlot::MonthlyRevenue);
        let mut engage_rng   = bank.for_field(FieldSlot::Engagement);
        let mut ticket_rng   = bank.for_field(FieldSlot::SupportTickets);
        let mut renewal_rng  = bank.for_field(FieldSlot::DaysToRenewal);
        let mut contract_rng = bank.for_field(FieldSlot::ContractStatus);
        let mut noise_rng    = bank.for_field(FieldSlot::EngagementNoise);

        let (eng_low, eng_high) = cfg.engagement_bounds;

        let accounts: Vec<Account> = (0..cfg.num_accounts)
            .map(|i| {
                let monthly_revenue = revenue_rng
                    .range_i64(cfg.monthly_revenue_range.0, cfg.monthly_revenue_range.1);
                let engagement_score = engage_rng
                    .range_i64(cfg.engagement_range.0, cfg.engagement_range.1);
                let support_tickets = ticket_rng.poisson(cfg.support_ticket_mean);
                let days_to_renewal = renewal_rng
                    .range_i64(cfg.days_to_renewal_range.0, cfg.days_to_renewal_range.1);
                let contract_status = if contract_rng.chance(cfg.expired_probability) {
                    ContractStatus::Expired
                } else {
                    ContractStatus::Active
                };
                let noise = noise_rng
                    .range_i64(cfg.engagement_noise_range.0, cfg.engagement_noise_range.1);
                let prev_engagement_score = (engagement_score + noise).clamp(eng_low, eng_high);

                Account {
                    company: format!("{}{i}", cfg.company_prefix),
                    monthly_revenue,
                    engagement_score,
                    support_tickets,
                    days_to_renewal,
                    contract_status,
                    prev_engagement_score,
                }
            })
            .collect();

        log::debug!(
            "generator: {} accounts (seed={})",
            accounts.len(),
            cfg.seed,
        );

        accounts
    }
}
