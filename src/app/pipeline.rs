//! Shared report pipeline used by both subcommands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! fetch -> filter -> partition by month -> per-month + overall statistics
//!
//! The front-end then only decides between printing and writing files.

use crate::data::JisiluClient;
use crate::domain::{IpoRecord, ReportConfig, Statistics};
use crate::error::AppError;
use crate::stats::{partition_by_month, run_statistical};

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Every usable record, in feed order.
    pub records: Vec<IpoRecord>,
    /// Record count per month, first-seen month order.
    pub monthly_counts: Vec<(String, usize)>,
    /// Statistics per month, same order as `monthly_counts`.
    pub monthly: Vec<(String, Statistics)>,
    /// Statistics over the full record set.
    pub overall: Statistics,
}

/// Fetch the feed and aggregate it.
pub fn run_report(config: &ReportConfig) -> Result<RunOutput, AppError> {
    let client = JisiluClient::from_env(config.feed_url.as_deref());
    let records = client.fetch_records()?;
    aggregate_records(records)
}

/// Aggregate already-fetched records.
///
/// Every partition is aggregated before the caller gets anything back, so a
/// failing month aborts the whole run with nothing written. An empty record
/// set fails here for the same reason a single empty partition would.
pub fn aggregate_records(records: Vec<IpoRecord>) -> Result<RunOutput, AppError> {
    let overall = run_statistical(&records)?;

    let partitions = partition_by_month(&records);
    let mut monthly_counts = Vec::with_capacity(partitions.len());
    let mut monthly = Vec::with_capacity(partitions.len());
    for (month, group) in &partitions {
        monthly_counts.push((month.clone(), group.len()));
        monthly.push((month.clone(), run_statistical(group)?));
    }

    Ok(RunOutput {
        records,
        monthly_counts,
        monthly,
        overall,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, name: &str, date: &str, first: f64) -> IpoRecord {
        IpoRecord::new(id, name, date, 10.0, 5_000.0, 1.0, first).unwrap()
    }

    #[test]
    fn aggregates_per_month_and_overall() {
        let records = vec![
            record("1", "Alpha", "2021-02-01", 5.0),
            record("2", "Beta", "2021-02-15", -3.0),
            record("3", "Gamma", "2021-03-01", 0.0),
        ];
        let run = aggregate_records(records).unwrap();

        assert_eq!(
            run.monthly_counts,
            [("2021-02".to_string(), 2), ("2021-03".to_string(), 1)]
        );
        assert_eq!(run.monthly.len(), 2);
        assert_eq!(run.monthly[0].0, "2021-02");
        assert_eq!(run.monthly[0].1.count_up, 1);
        assert_eq!(run.monthly[0].1.count_down, 1);
        assert_eq!(run.monthly[1].1.count_up, 0);

        assert_eq!(run.overall.count_up, 1);
        assert_eq!(run.overall.count_down, 1);
        assert_eq!(run.overall.count_flat, 0);
    }

    #[test]
    fn empty_feed_fails_before_any_output_exists() {
        let err = aggregate_records(Vec::new()).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }
}
