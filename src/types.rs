//! Record and summary types shared by the aggregation layer and the CLI.

use anyhow::{Result, bail};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// One observed ferry movement, as returned by the `sailing_traffic` API.
///
/// Field names on the wire are the API's flat lowercase names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripRecord {
    pub date: NaiveDate,
    #[serde(rename = "departureport")]
    pub departure_port_code: String,
    #[serde(rename = "arrivalport")]
    pub arrival_port_code: String,
    #[serde(rename = "departureportname")]
    pub departure_port_name: String,
    #[serde(rename = "arrivalportname")]
    pub arrival_port_name: String,
    #[serde(rename = "passengercount")]
    pub passenger_count: u64,
    #[serde(rename = "vehiclecount")]
    pub vehicle_count: u64,
    #[serde(rename = "routecode")]
    pub route_code: String,
    #[serde(rename = "routecodenames")]
    pub route_name: String,
}

/// Inclusive calendar range used to query and label a record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    /// Builds a range, rejecting `from` after `to`.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self> {
        if from > to {
            bail!("start date {from} is after end date {to}");
        }
        Ok(Self { from, to })
    }

    /// Parses two `YYYY-MM-DD` strings into a range.
    pub fn parse(from: &str, to: &str) -> Result<Self> {
        let from = NaiveDate::parse_from_str(from, "%Y-%m-%d")?;
        let to = NaiveDate::parse_from_str(to, "%Y-%m-%d")?;
        Self::new(from, to)
    }

    /// The `days` days before `today` through `today`. `days == 0` is today alone.
    ///
    /// # Errors
    ///
    /// Fails when the start date would fall outside the representable calendar.
    pub fn last_days(today: NaiveDate, days: u64) -> Result<Self> {
        let Some(from) = today.checked_sub_days(Days::new(days)) else {
            bail!("{days} days before {today} is out of range");
        };
        Ok(Self { from, to: today })
    }

    /// Whole days between `from` and `to`.
    pub fn span_days(&self) -> i64 {
        (self.to - self.from).num_days()
    }
}

/// Headline figures for a record set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub total_passengers: u64,
    pub total_vehicles: u64,
    pub total_routes: usize,
    pub total_ports: usize,
}

/// Departure and arrival activity for one named port.
///
/// `passengers` and `vehicles` are attributed to the departure side only.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PortTrafficEntry {
    pub port: String,
    pub departures: u64,
    pub arrivals: u64,
    pub passengers: u64,
    pub vehicles: u64,
    pub total: u64,
    pub efficiency: f64,
}

/// Passengers summed over every record sharing a route name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutePassengers {
    pub route: String,
    pub passengers: u64,
}

/// Per-route trip count, volumes and per-trip averages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutePerformanceEntry {
    pub route: String,
    pub count: u64,
    pub passengers: u64,
    pub vehicles: u64,
    pub avg_passengers: u64,
    pub avg_vehicles: u64,
}
