//! The account record, the only entity the pipeline deals in.

use crate::types::{CompanyId, Engagement, Revenue};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ContractStatus {
    Active,
    Expired,
}

impl ContractStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Expired => "Expired",
        }
    }
}

impl fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Base metrics for one account, as produced by the generator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    pub company:               CompanyId,
    pub monthly_revenue:       Revenue,
    pub engagement_score:      Engagement,
    pub support_tickets:       i64,
    pub days_to_renewal:       i64,
    pub contract_status:       ContractStatus,
    pub prev_engagement_score: Engagement,
}
