//! Everything the dashboard shows for one record set, in one serializable value.

use chrono::NaiveDate;
use serde::Serialize;

use crate::aggregate::{
    compute_port_traffic, compute_route_passenger_distribution, compute_route_performance,
    compute_totals,
};
use crate::label::format_date_range_label;
use crate::types::{
    DateRange, PortTrafficEntry, RoutePassengers, RoutePerformanceEntry, Totals, TripRecord,
};
use crate::utility::rounded_mean;

/// Headline cards above the route performance chart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PerformanceSummary {
    pub avg_passengers_per_route: u64,
    pub avg_vehicles_per_route: u64,
    pub routes_analyzed: usize,
}

impl PerformanceSummary {
    /// Averages the per-trip averages of the listed routes.
    pub fn from_entries(entries: &[RoutePerformanceEntry]) -> Self {
        let n = entries.len() as u64;
        let passengers: u64 = entries.iter().map(|e| e.avg_passengers).sum();
        let vehicles: u64 = entries.iter().map(|e| e.avg_vehicles).sum();

        PerformanceSummary {
            avg_passengers_per_route: rounded_mean(passengers, n),
            avg_vehicles_per_route: rounded_mean(vehicles, n),
            routes_analyzed: entries.len(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub range: DateRange,
    pub label: String,
    pub record_count: usize,
    pub totals: Totals,
    pub port_traffic: Vec<PortTrafficEntry>,
    pub route_distribution: Vec<RoutePassengers>,
    pub route_performance: Vec<RoutePerformanceEntry>,
    pub performance_summary: PerformanceSummary,
}

impl Dashboard {
    pub fn build(range: DateRange, records: &[TripRecord], today: NaiveDate) -> Self {
        let route_performance = compute_route_performance(records);
        let performance_summary = PerformanceSummary::from_entries(&route_performance);

        Dashboard {
            range,
            label: format_date_range_label(&range, today),
            record_count: records.len(),
            totals: compute_totals(records),
            port_traffic: compute_port_traffic(records),
            route_distribution: compute_route_passenger_distribution(records),
            route_performance,
            performance_summary,
        }
    }

    /// True when the period returned no records at all.
    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }
}
