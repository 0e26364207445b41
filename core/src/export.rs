//! CSV export of the scored portfolio.
//!
//! One header row, one row per account, no index column. Column order is
//! fixed: base fields as generated, then derived fields in scoring order.

use crate::{error::RevenueResult, scoring::ScoredAccount};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

pub const CSV_COLUMNS: [&str; 12] = [
    "company",
    "monthly_revenue",
    "engagement_score",
    "support_tickets",
    "days_to_renewal",
    "contract_status",
    "prev_engagement_score",
    "engagement_change",
    "trend_status",
    "churn_probability",
    "revenue_at_risk",
    "health_tier",
];

pub fn write_csv<'a, W, I>(writer: &mut W, accounts: I) -> RevenueResult<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a ScoredAccount>,
{
    writeln!(writer, "{}", CSV_COLUMNS.join(","))?;

    let mut rows = 0usize;
    for s in accounts {
        let a = &s.account;
        writeln!(
            writer,
            "{},{},{},{},{},{},{},{},{},{},{},{}",
            escape_field(&a.company),
            a.monthly_revenue,
            a.engagement_score,
            a.support_tickets,
            a.days_to_renewal,
            a.contract_status.label(),
            a.prev_engagement_score,
            s.engagement_change,
            s.trend_status.label(),
            s.churn_probability,
            s.revenue_at_risk,
            s.health_tier.label(),
        )?;
        rows += 1;
    }

    Ok(rows)
}

/// Write the CSV to `path`, replacing any existing file.
pub fn export_csv<'a, I>(path: impl AsRef<Path>, accounts: I) -> RevenueResult<usize>
where
    I: IntoIterator<Item = &'a ScoredAccount>,
{
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    let rows = write_csv(&mut writer, accounts)?;
    writer.flush()?;

    log::info!("export: wrote {rows} rows to {}", path.display());
    Ok(rows)
}

/// Quote a field only when it contains a delimiter, quote or line break.
fn escape_field(value: &str) -> std::borrow::Cow<'_, str> {
    if value.contains(|c: char| matches!(c, ',' | '"' | '\n' | '\r')) {
        format!("\"{}\"", value.replace('"', "\"\"")).into()
    } else {
        value.into()
    }
}
