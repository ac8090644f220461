//! The searchable record table: filtering, ordering and paging.

use crate::types::TripRecord;

/// Rows shown initially and added by each "load more".
pub const PAGE_SIZE: usize = 8;

/// Records whose departure port, arrival port or route name contains `query`
/// (case-insensitive), newest date first. An empty query keeps every record.
pub fn search<'a>(records: &'a [TripRecord], query: &str) -> Vec<&'a TripRecord> {
    let needle = query.to_lowercase();

    let mut rows: Vec<&TripRecord> = records
        .iter()
        .filter(|r| {
            needle.is_empty()
                || r.departure_port_name.to_lowercase().contains(&needle)
                || r.arrival_port_name.to_lowercase().contains(&needle)
                || r.route_name.to_lowercase().contains(&needle)
        })
        .collect();

    rows.sort_by(|a, b| b.date.cmp(&a.date));
    rows
}

/// The first `display_count` rows.
pub fn page<'a, T>(rows: &'a [T], display_count: usize) -> &'a [T] {
    &rows[..display_count.min(rows.len())]
}

/// Next display count after a "load more", never past `total`.
pub fn load_more(display_count: usize, total: usize) -> usize {
    (display_count + PAGE_SIZE).min(total)
}

/// Weight of one vehicle, in passengers, when sizing a sailing's load.
pub const VEHICLE_LOAD_WEIGHT: f64 = 2.5;

/// Passenger share of the record's weighted load, as a whole percentage.
pub fn utilization(record: &TripRecord) -> u64 {
    let passengers = record.passenger_count as f64;
    let load = passengers + record.vehicle_count as f64 * VEHICLE_LOAD_WEIGHT;
    (passengers / load.max(1.0) * 100.0).round() as u64
}
