//! Reporting utilities: delimited tables and formatted terminal output.

pub mod format;

pub use format::*;

use crate::domain::Statistics;

/// The three logical tables a run produces, as ready-to-write lines.
#[derive(Debug, Clone)]
pub struct ReportTables {
    /// `month,count` per month.
    pub counts: Vec<String>,
    /// Shared header, then `month,<row>` per month.
    pub months: Vec<String>,
    /// Header plus the single overall row.
    pub total: Vec<String>,
}

/// Assemble all three tables from the aggregated results.
pub fn build_tables(
    monthly_counts: &[(String, usize)],
    monthly: &[(String, Statistics)],
    overall: &Statistics,
) -> ReportTables {
    ReportTables {
        counts: format::counts_table(monthly_counts),
        months: format::months_table(monthly),
        total: format::total_table(overall),
    }
}
