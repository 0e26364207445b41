//! Revenue intelligence core: synthetic accounts, churn scoring,
//! portfolio aggregation and report rendering.

pub mod account;
pub mod chart;
pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod generator;
pub mod report;
pub mod rng;
pub mod scoring;
pub mod summary;
pub mod types;
