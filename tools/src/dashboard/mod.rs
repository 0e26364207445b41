//! Interactive terminal dashboard over a scored portfolio.

mod app;
mod theme;
mod ui;

pub use app::App;

use anyhow::Result;
use revenue_core::{
    engine::{Portfolio, RevenueEngine},
    summary::TierFilter,
};

/// Open the dashboard and block until the user quits.
pub fn run(engine: RevenueEngine, portfolio: Portfolio, filter: TierFilter) -> Result<()> {
    log::info!(
        "dashboard: {} accounts, {} at risk",
        portfolio.summary.account_count,
        portfolio.summary.percent_label()
    );
    let mut app = App::new(engine, portfolio);
    app.set_filter(filter);
    app.run()
}
