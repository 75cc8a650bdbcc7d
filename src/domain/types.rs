//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they
//! can be:
//!
//! - held in-memory during aggregation
//! - exported to delimited text
//! - reused by future front-ends without dragging in I/O concerns

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// One IPO subscription entry from the listing feed.
///
/// Constructed once after ingestion and immutable afterwards. The `month`
/// key is derived at construction so grouping never re-parses the date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpoRecord {
    /// Opaque stable identifier from the feed.
    pub id: String,
    /// Display name of the listing.
    pub name: String,
    /// Listing date.
    pub date: NaiveDate,
    /// Grouping key: `YYYY-MM` truncation of `date`.
    pub month: String,
    /// Probability of a subscription allocation being granted (percent).
    pub lucky_draw_rate: f64,
    /// Capital committed per subscription allocation unit.
    pub single_draw_amount: f64,
    /// Pre-listing informal-market return (percent).
    pub gray_market_return_rate: f64,
    /// First trading day return relative to issue price (percent).
    pub first_day_return_rate: f64,
}

impl IpoRecord {
    /// Build a record from normalized feed fields.
    ///
    /// Fails if `date` is not a `YYYY-MM-DD` calendar date; a record with an
    /// unparsable date must never reach the grouping stage with a wrong key.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        date: &str,
        lucky_draw_rate: f64,
        single_draw_amount: f64,
        gray_market_return_rate: f64,
        first_day_return_rate: f64,
    ) -> Result<Self, AppError> {
        let id = id.into();
        let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|e| AppError::data(format!("Invalid listing date '{date}' for row {id}: {e}")))?;
        let month = parsed.format("%Y-%m").to_string();
        Ok(Self {
            id,
            name: name.into(),
            date: parsed,
            month,
            lucky_draw_rate,
            single_draw_amount,
            gray_market_return_rate,
            first_day_return_rate,
        })
    }
}

/// `(name, value)` pair identifying which record attained a minimum or
/// maximum of some derived metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtremePoint {
    pub name: String,
    pub value: f64,
}

/// Summary statistics over a non-empty set of records.
///
/// Built in one shot by [`crate::stats::run_statistical`]; there is no
/// partially-populated state to observe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Statistics {
    /// Arithmetic mean of the lucky-draw rate.
    pub avg_lucky_draw_rate: f64,
    /// Records whose first-day return was strictly positive.
    pub count_up: u64,
    /// Records whose first-day return was strictly negative.
    pub count_down: u64,
    /// Records classified as flat (see the aggregation engine for the
    /// classification rule; a return of exactly zero counts as neither
    /// direction).
    pub count_flat: u64,
    /// Arithmetic mean of the per-unit subscription amount.
    pub avg_single_draw_amount: f64,
    /// Σ(gray-market return × draw amount), scaled by 0.01.
    pub gray_market_money_total: f64,
    /// Σ(first-day return × draw amount), scaled by 0.01.
    pub first_day_money_total: f64,

    pub min_gray_rate: ExtremePoint,
    pub min_first_rate: ExtremePoint,
    pub max_gray_rate: ExtremePoint,
    pub max_first_rate: ExtremePoint,
    pub min_gray_money: ExtremePoint,
    pub min_first_money: ExtremePoint,
    pub max_gray_money: ExtremePoint,
    pub max_first_money: ExtremePoint,
}

impl Statistics {
    /// Column labels for the eight extremum slots, in report order.
    pub const EXTREME_LABELS: [&'static str; 8] = [
        "minGrayRate",
        "minFirstRate",
        "maxGrayRate",
        "maxFirstRate",
        "minGrayMoney",
        "minFirstMoney",
        "maxGrayMoney",
        "maxFirstMoney",
    ];

    /// The eight extremum slots as one ordered `(label, point)` collection.
    ///
    /// This is the single source of truth for extremum column order in the
    /// report formatter; the named fields above exist for direct access only.
    pub fn extremes(&self) -> [(&'static str, &ExtremePoint); 8] {
        let points = [
            &self.min_gray_rate,
            &self.min_first_rate,
            &self.max_gray_rate,
            &self.max_first_rate,
            &self.min_gray_money,
            &self.min_first_money,
            &self.max_gray_money,
            &self.max_first_money,
        ];
        let mut slot = 0;
        points.map(|point| {
            let pair = (Self::EXTREME_LABELS[slot], point);
            slot += 1;
            pair
        })
    }
}

/// Resolved run configuration, assembled from CLI flags and the environment.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Explicit feed URL override (`--url`); otherwise the environment or
    /// the built-in endpoint decides.
    pub feed_url: Option<String>,
    /// Root directory the date-stamped report directory is created under.
    pub output_root: PathBuf,
    /// Date used for the output directory name; defaults to today.
    pub run_date: Option<NaiveDate>,
    /// Suppress the terminal run summary.
    pub quiet: bool,
}
