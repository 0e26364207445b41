//! Seeded column streams for the account generator.
//!
//! A batch is a table, and each column of it is drawn from a stream of
//! its own. The stream for a column depends only on the run seed and the
//! column's `FieldSlot`, so two runs with one seed produce the same table
//! and a new column never perturbs the existing ones.

use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Poisson};
use rand_pcg::Pcg64Mcg;

/// Odd 64-bit constant spreading slot indices across the seed space.
const SLOT_SPREAD: u64 = 0x9e37_79b9_7f4a_7c15;

/// The random source behind one generated column.
pub struct FieldRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl FieldRng {
    pub fn new(seed: u64, slot: FieldSlot) -> Self {
        Self {
            name: slot.name(),
            inner: Pcg64Mcg::seed_from_u64(seed ^ (slot as u64).wrapping_mul(SLOT_SPREAD)),
        }
    }

    /// Uniform integer in `[low, high)`. Callers pass ranges that passed
    /// config validation, so `high > low`.
    pub fn range_i64(&mut self, low: i64, high: i64) -> i64 {
        self.inner.gen_range(low..high)
    }

    /// True with probability `p`, clamped into `[0, 1]`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.inner.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Poisson-distributed count. A mean that is not a positive finite
    /// number yields zero.
    pub fn poisson(&mut self, mean: f64) -> i64 {
        match Poisson::new(mean) {
            Ok(dist) => dist.sample(&mut self.inner) as i64,
            Err(_) => 0,
        }
    }
}

/// Hands out the column streams for one generation run.
pub struct RngBank {
    seed: u64,
}

impl RngBank {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn for_field(&self, slot: FieldSlot) -> FieldRng {
        FieldRng::new(self.seed, slot)
    }
}

/// Column slots. The discriminant feeds the stream seed, so existing
/// values are fixed; new columns are appended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum FieldSlot {
    MonthlyRevenue = 0,
    Engagement = 1,
    SupportTickets = 2,
    DaysToRenewal = 3,
    ContractStatus = 4,
    EngagementNoise = 5,
}

impl FieldSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::MonthlyRevenue => "monthly_revenue",
            Self::Engagement => "engagement_score",
            Self::SupportTickets => "support_tickets",
            Self::DaysToRenewal => "days_to_renewal",
            Self::ContractStatus => "contract_status",
            Self::EngagementNoise => "engagement_noise",
        }
    }
}
