//! Jisilu HK IPO listing feed integration.
//!
//! The feed returns every listing as a `{ id, cell: { ... } }` row. Rows
//! without a subscription outcome (`iporesult`) are not yet usable and are
//! skipped; for the rest, the cell fields are normalized into
//! [`IpoRecord`]s. Numeric cell values arrive either as JSON numbers or as
//! numeric strings, so both are accepted.

use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::domain::IpoRecord;
use crate::error::AppError;

const BASE_URL: &str = "https://www.jisilu.cn/data/new_stock/hkipo/";

pub struct JisiluClient {
    client: Client,
    base_url: String,
}

impl JisiluClient {
    /// Build a client, resolving the feed URL from (in order) an explicit
    /// override, the `HKIPO_FEED_URL` environment variable (a `.env` file
    /// is honored), or the built-in endpoint.
    pub fn from_env(override_url: Option<&str>) -> Self {
        dotenvy::dotenv().ok();
        let base_url = override_url
            .map(str::to_string)
            .or_else(|| std::env::var("HKIPO_FEED_URL").ok())
            .unwrap_or_else(|| BASE_URL.to_string());
        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// Fetch the listing feed and normalize it into records.
    ///
    /// Transport failures and non-success statuses are fatal; there is no
    /// retry. The single fetch returns the complete listing.
    pub fn fetch_records(&self) -> Result<Vec<IpoRecord>, AppError> {
        let url = listing_url(&self.base_url);
        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| AppError::data(format!("Listing feed request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::data(format!(
                "Listing feed request failed with status {}.",
                resp.status()
            )));
        }

        let body: ListingResponse = resp
            .json()
            .map_err(|e| AppError::data(format!("Failed to parse listing feed response: {e}")))?;

        normalize_rows(body.rows)
    }
}

/// Listing URL with the feed's cache-busting timestamp parameter.
fn listing_url(base_url: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    format!("{base_url}?___jsl=LST___t={millis}")
}

#[derive(Debug, Deserialize)]
pub struct ListingResponse {
    pub rows: Vec<ListingRow>,
}

#[derive(Debug, Deserialize)]
pub struct ListingRow {
    pub id: String,
    pub cell: ListingCell,
}

/// Raw cell payload; only the keys we consume are declared.
#[derive(Debug, Deserialize)]
pub struct ListingCell {
    /// Subscription outcome indicator; absent until allotment results exist.
    pub iporesult: Option<Value>,
    pub stock_nm: Option<String>,
    /// Listing date, `YYYY-MM-DD`.
    pub list_dt2: Option<String>,
    pub lucky_draw_rt: Option<Value>,
    pub single_draw_money: Option<Value>,
    pub gray_incr_rt: Option<Value>,
    pub first_incr_rt: Option<Value>,
}

/// Turn raw feed rows into records.
///
/// Rows without an outcome are silently dropped. For surviving rows every
/// consumed field is required; a hole is a fatal ingest error naming the
/// row so the feed problem is diagnosable.
pub fn normalize_rows(rows: Vec<ListingRow>) -> Result<Vec<IpoRecord>, AppError> {
    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        let cell = row.cell;
        if !has_outcome(&cell.iporesult) {
            continue;
        }

        let name = require_text(cell.stock_nm, "stock_nm", &row.id)?;
        let date = require_text(cell.list_dt2, "list_dt2", &row.id)?;
        let lucky_draw_rate = require_number(&cell.lucky_draw_rt, "lucky_draw_rt", &row.id)?;
        let single_draw_amount =
            require_number(&cell.single_draw_money, "single_draw_money", &row.id)?;
        let gray_market_return_rate = require_number(&cell.gray_incr_rt, "gray_incr_rt", &row.id)?;
        let first_day_return_rate = require_number(&cell.first_incr_rt, "first_incr_rt", &row.id)?;

        records.push(IpoRecord::new(
            row.id,
            name,
            &date,
            lucky_draw_rate,
            single_draw_amount,
            gray_market_return_rate,
            first_day_return_rate,
        )?);
    }
    Ok(records)
}

fn has_outcome(value: &Option<Value>) -> bool {
    matches!(value, Some(v) if !v.is_null())
}

fn require_text(value: Option<String>, key: &str, id: &str) -> Result<String, AppError> {
    value.ok_or_else(|| AppError::data(format!("Listing row {id} is missing '{key}'.")))
}

fn require_number(value: &Option<Value>, key: &str, id: &str) -> Result<f64, AppError> {
    value
        .as_ref()
        .and_then(parse_number)
        .ok_or_else(|| AppError::data(format!("Listing row {id} has no usable '{key}' value.")))
}

/// Accept a finite number from either a JSON number or a numeric string.
fn parse_number(value: &Value) -> Option<f64> {
    let v = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() || trimmed == "-" {
                return None;
            }
            trimmed.parse::<f64>().ok()?
        }
        _ => return None,
    };
    if v.is_finite() { Some(v) } else { None }
}
