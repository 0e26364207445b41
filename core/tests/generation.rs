//! Synthetic account generation tests.

use revenue_core::{
    account::ContractStatus,
    config::GeneratorConfig,
    generator::AccountGenerator,
};
use std::collections::HashSet;

fn generator(seed: u64, n: usize) -> AccountGenerator {
    let _ = env_logger::builder().is_test(true).try_init();
    AccountGenerator::new(GeneratorConfig {
        seed,
        num_accounts: n,
        ..GeneratorConfig::default()
    })
}

#[test]
fn default_batch_has_two_hundred_accounts() {
    let accounts = AccountGenerator::new(GeneratorConfig::default()).generate();
    assert_eq!(accounts.len(), 200, "Expected 200 accounts, got {}", accounts.len());
    assert_eq!(accounts[0].company, "Company_0");
    assert_eq!(accounts[199].company, "Company_199");
}

#[test]
fn company_names_are_unique() {
    let accounts = generator(42, 1_000).generate();
    let names: HashSet<&str> = accounts.iter().map(|a| a.company.as_str()).collect();
    assert_eq!(names.len(), accounts.len());
}

#[test]
fn every_field_stays_in_range() {
    let accounts = generator(123, 2_000).generate();

    for a in &accounts {
        assert!((500..10_000).contains(&a.monthly_revenue), "revenue {}", a.monthly_revenue);
        assert!((10..100).contains(&a.engagement_score), "engagement {}", a.engagement_score);
        assert!(a.support_tickets >= 0, "tickets {}", a.support_tickets);
        assert!((0..180).contains(&a.days_to_renewal), "renewal {}", a.days_to_renewal);
        assert!(
            (0..=100).contains(&a.prev_engagement_score),
            "prev engagement {}", a.prev_engagement_score
        );

        // Noise is drawn from [-20, 20) before clamping.
        let delta = a.prev_engagement_score - a.engagement_score;
        assert!(delta >= -20 && delta < 20, "noise {delta} outside [-20, 20)");
    }
}

#[test]
fn support_tickets_average_near_four() {
    let accounts = generator(99, 5_000).generate();
    let mean = accounts.iter().map(|a| a.support_tickets).sum::<i64>() as f64
        / accounts.len() as f64;
    assert!((mean - 4.0).abs() < 0.2, "mean tickets {mean:.3} too far from 4.0");
}

#[test]
fn roughly_a_quarter_of_contracts_expired() {
    let accounts = generator(5, 4_000).generate();
    let expired = accounts
        .iter()
        .filter(|a| a.contract_status == ContractStatus::Expired)
        .count();
    let share = expired as f64 / accounts.len() as f64;
    assert!((share - 0.25).abs() < 0.04, "expired share {share:.3} too far from 0.25");
}

#[test]
fn zero_accounts_yields_empty_batch() {
    assert!(generator(42, 0).generate().is_empty());
}

/// Growing the batch only appends; existing rows keep their values.
#[test]
fn larger_batch_extends_smaller_one() {
    let small = generator(42, 50).generate();
    let large = generator(42, 80).generate();
    assert_eq!(&large[..50], &small[..]);
}
