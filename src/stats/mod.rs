//! Month partitioning and the aggregation engine.
//!
//! This is the computational core of the crate: it turns a flat list of
//! [`IpoRecord`]s into per-month and overall [`Statistics`]. Everything here
//! is a pure function of its input; identical input produces identical
//! output.

use indexmap::IndexMap;

use crate::domain::{ExtremePoint, IpoRecord, Statistics};
use crate::error::AppError;

/// Group records by their derived `YYYY-MM` key.
///
/// Months appear in first-seen order and records keep feed order within
/// each group, so downstream output is deterministic for a given feed.
pub fn partition_by_month(records: &[IpoRecord]) -> IndexMap<String, Vec<IpoRecord>> {
    let mut partitions: IndexMap<String, Vec<IpoRecord>> = IndexMap::new();
    for record in records {
        partitions
            .entry(record.month.clone())
            .or_default()
            .push(record.clone());
    }
    partitions
}

/// Compute summary statistics over a set of records.
///
/// The input must be non-empty: the averages divide by the record count, so
/// an empty set is rejected up front instead of producing NaN output.
pub fn run_statistical(records: &[IpoRecord]) -> Result<Statistics, AppError> {
    if records.is_empty() {
        return Err(AppError::data(
            "Cannot aggregate an empty record set (average would divide by zero).",
        ));
    }
    let n = records.len() as f64;

    let avg_lucky_draw_rate = records.iter().map(|r| r.lucky_draw_rate).sum::<f64>() / n;

    let count_up = records
        .iter()
        .filter(|r| r.first_day_return_rate > 0.0)
        .count() as u64;
    let count_down = records
        .iter()
        .filter(|r| r.first_day_return_rate < 0.0)
        .count() as u64;
    // A return of exactly zero counts as neither up nor down.
    let count_flat = records
        .iter()
        .filter(|r| (r.first_day_return_rate - 0.000001).abs() < 0.0)
        .count() as u64;

    let min_gray_rate = min_point(records, |r| r.gray_market_return_rate);
    let min_first_rate = min_point(records, |r| r.first_day_return_rate);
    let max_gray_rate = max_point(records, |r| r.gray_market_return_rate);
    let max_first_rate = max_point(records, |r| r.first_day_return_rate);
    let min_gray_money = min_point(records, gray_money);
    let min_first_money = min_point(records, first_money);
    let max_gray_money = max_point(records, gray_money);
    let max_first_money = max_point(records, first_money);

    // One pass for the amount average and both weighted totals.
    let mut sum_single_draw = 0.0;
    let mut gray_total = 0.0;
    let mut first_total = 0.0;
    for record in records {
        sum_single_draw += record.single_draw_amount;
        gray_total += record.gray_market_return_rate * record.single_draw_amount;
        first_total += record.first_day_return_rate * record.single_draw_amount;
    }

    Ok(Statistics {
        avg_lucky_draw_rate,
        count_up,
        count_down,
        count_flat,
        avg_single_draw_amount: sum_single_draw / n,
        gray_market_money_total: gray_total * 0.01,
        first_day_money_total: first_total * 0.01,
        min_gray_rate,
        min_first_rate,
        max_gray_rate,
        max_first_rate,
        min_gray_money,
        min_first_money,
        max_gray_money,
        max_first_money,
    })
}

/// Monetary gain/loss implied by the gray-market return (rates are percent).
fn gray_money(record: &IpoRecord) -> f64 {
    record.gray_market_return_rate * record.single_draw_amount * 0.01
}

/// Monetary gain/loss implied by the first-day return (rates are percent).
fn first_money(record: &IpoRecord) -> f64 {
    record.first_day_return_rate * record.single_draw_amount * 0.01
}

/// Single-scan minimum search; ties keep the first record in feed order.
fn min_point<F>(records: &[IpoRecord], metric: F) -> ExtremePoint
where
    F: Fn(&IpoRecord) -> f64,
{
    let mut name = String::new();
    let mut min = f64::MAX;
    for record in records {
        let value = metric(record);
        if value < min {
            min = value;
            name = record.name.clone();
        }
    }
    ExtremePoint { name, value: min }
}

/// Single-scan maximum search; ties keep the first record in feed order.
///
/// The search starts from the smallest positive normal value, so a set
/// whose candidates are all negative reports that sentinel with an empty
/// name.
fn max_point<F>(records: &[IpoRecord], metric: F) -> ExtremePoint
where
    F: Fn(&IpoRecord) -> f64,
{
    let mut name = String::new();
    let mut max = f64::MIN_POSITIVE;
    for record in records {
        let value = metric(record);
        if value > max {
            max = value;
            name = record.name.clone();
        }
    }
    ExtremePoint { name, value: max }
}
