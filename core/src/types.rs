//! Shared primitive types used across the crate.

/// A company identifier, unique within one generated batch.
pub type CompanyId = String;

/// Whole-currency monthly revenue.
pub type Revenue = i64;

/// An engagement score on the 0..=100 scale.
pub type Engagement = i64;
