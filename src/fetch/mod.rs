//! Fetching trip records from the `sailing_traffic` API.

mod client;
mod basic;
pub mod auth;

pub use client::HttpClient;
pub use basic::BasicClient;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::debug;

use crate::types::{DateRange, TripRecord};

/// Public endpoint serving the ferry traffic dataset.
pub const DEFAULT_API_URL: &str = "https://data.gov.gr/api/v1/query/sailing_traffic";

/// Builds the query URL for `range` against `base`.
pub fn records_url(base: &str, range: &DateRange) -> Result<reqwest::Url> {
    let url = reqwest::Url::parse_with_params(
        base,
        &[
            ("date_from", range.from.format("%Y-%m-%d").to_string()),
            ("date_to", range.to.format("%Y-%m-%d").to_string()),
        ],
    )?;
    Ok(url)
}

/// Issues a single GET for `range` and decodes the JSON array of records.
///
/// No retry: a failed request or a non-success status is returned as an error.
pub async fn fetch_records<C: HttpClient>(
    client: &C,
    base: &str,
    range: &DateRange,
) -> Result<Vec<TripRecord>> {
    let url = records_url(base, range)?;
    debug!(%url, "Requesting records");

    let req = reqwest::Request::new(reqwest::Method::GET, url);
    let resp = client.execute(req).await?.error_for_status()?;
    let bytes = resp.bytes().await?;

    parse_records(&bytes)
}

/// Decodes a `sailing_traffic` response body.
pub fn parse_records(bytes: &[u8]) -> Result<Vec<TripRecord>> {
    serde_json::from_slice(bytes).context("decoding sailing_traffic response")
}

/// The single sample record shown when the API cannot be reached.
pub fn fallback_records() -> Vec<TripRecord> {
    vec![TripRecord {
        date: NaiveDate::from_ymd_opt(2025, 4, 18).unwrap_or_default(),
        departure_port_code: "PIR".to_string(),
        arrival_port_code: "JMK".to_string(),
        departure_port_name: "ΠΕΙΡΑΙΑΣ".to_string(),
        arrival_port_name: "ΜΥΚΟΝΟΣ".to_string(),
        passenger_count: 789,
        vehicle_count: 127,
        route_code: "PIRJMKJNXJTR".to_string(),
        route_name: "ΠΕΙΡΑΙΑΣ-ΜΥΚΟΝΟΣ-ΝΑΞΟΣ-ΘΗΡΑ".to_string(),
    }]
}
