//! Pure aggregations over a slice of [`TripRecord`]s.
//!
//! Every function recomputes from scratch, never mutates its input and never
//! fails; an empty slice yields zero-valued output. Grouped results keep the
//! order in which each key first appeared, and sorting is stable, so ties are
//! broken by first occurrence.

use crate::types::{PortTrafficEntry, RoutePassengers, RoutePerformanceEntry, Totals, TripRecord};
use crate::utility::{ratio, round_to, rounded_mean};
use std::collections::{HashMap, HashSet};

/// Maximum entries returned by [`compute_port_traffic`].
pub const PORT_TRAFFIC_LIMIT: usize = 10;
/// Maximum entries returned by the per-route aggregations.
pub const ROUTE_LIMIT: usize = 8;

/// Insertion-ordered map from a borrowed group key to its accumulator.
struct Grouped<'a, A> {
    index: HashMap<&'a str, usize>,
    entries: Vec<(&'a str, A)>,
}

impl<'a, A: Default> Grouped<'a, A> {
    fn new() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    /// Returns the accumulator for `key`, creating a zeroed one on first sight.
    fn entry(&mut self, key: &'a str) -> &mut A {
        let entries = &mut self.entries;
        let idx = *self.index.entry(key).or_insert_with(|| {
            entries.push((key, A::default()));
            entries.len() - 1
        });
        &mut self.entries[idx].1
    }

    fn into_entries(self) -> Vec<(&'a str, A)> {
        self.entries
    }
}

#[derive(Default)]
struct PortCounts {
    departures: u64,
    arrivals: u64,
    passengers: u64,
    vehicles: u64,
}

#[derive(Default)]
struct RouteCounts {
    count: u64,
    passengers: u64,
    vehicles: u64,
}

/// Sorts descending by `key` (stable) and keeps the first `limit` items.
fn top_by<T>(mut items: Vec<T>, limit: usize, key: impl Fn(&T) -> u64) -> Vec<T> {
    items.sort_by(|a, b| key(b).cmp(&key(a)));
    items.truncate(limit);
    items
}

fn group_routes(records: &[TripRecord]) -> Vec<(&str, RouteCounts)> {
    let mut routes: Grouped<RouteCounts> = Grouped::new();

    for r in records {
        let acc = routes.entry(&r.route_name);
        acc.count += 1;
        acc.passengers += r.passenger_count;
        acc.vehicles += r.vehicle_count;
    }

    routes.into_entries()
}

/// Sums passengers and vehicles and counts distinct routes and ports.
pub fn compute_totals(records: &[TripRecord]) -> Totals {
    let mut routes = HashSet::new();
    let mut ports = HashSet::new();
    let mut totals = Totals::default();

    for r in records {
        totals.total_passengers += r.passenger_count;
        totals.total_vehicles += r.vehicle_count;
        routes.insert(r.route_code.as_str());
        ports.insert(r.departure_port_name.as_str());
        ports.insert(r.arrival_port_name.as_str());
    }

    totals.total_routes = routes.len();
    totals.total_ports = ports.len();
    totals
}

/// Per-port departure/arrival activity, busiest ports first, at most
/// [`PORT_TRAFFIC_LIMIT`] entries.
///
/// Passengers and vehicles count toward the departure port only; an arrival
/// bumps nothing but `arrivals`.
pub fn compute_port_traffic(records: &[TripRecord]) -> Vec<PortTrafficEntry> {
    let mut ports: Grouped<PortCounts> = Grouped::new();

    for r in records {
        // both ports get an accumulator before either is updated
        ports.entry(&r.departure_port_name);
        ports.entry(&r.arrival_port_name);

        let dep = ports.entry(&r.departure_port_name);
        dep.departures += 1;
        dep.passengers += r.passenger_count;
        dep.vehicles += r.vehicle_count;

        ports.entry(&r.arrival_port_name).arrivals += 1;
    }

    let entries = ports
        .into_entries()
        .into_iter()
        .map(|(port, c)| {
            let total = c.departures + c.arrivals;
            PortTrafficEntry {
                port: port.to_string(),
                departures: c.departures,
                arrivals: c.arrivals,
                passengers: c.passengers,
                vehicles: c.vehicles,
                total,
                efficiency: round_to(ratio(c.passengers, total), 1),
            }
        })
        .collect();

    top_by(entries, PORT_TRAFFIC_LIMIT, |e| e.total)
}

/// Passengers per route name, largest first, at most [`ROUTE_LIMIT`] entries.
pub fn compute_route_passenger_distribution(records: &[TripRecord]) -> Vec<RoutePassengers> {
    let entries = group_routes(records)
        .into_iter()
        .map(|(route, c)| RoutePassengers {
            route: route.to_string(),
            passengers: c.passengers,
        })
        .collect();

    top_by(entries, ROUTE_LIMIT, |e| e.passengers)
}

/// Trip counts, volumes and per-trip averages per route name, ordered by
/// passengers, at most [`ROUTE_LIMIT`] entries.
///
/// Averages round half away from zero (see [`rounded_mean`]).
pub fn compute_route_performance(records: &[TripRecord]) -> Vec<RoutePerformanceEntry> {
    let entries = group_routes(records)
        .into_iter()
        .map(|(route, c)| RoutePerformanceEntry {
            route: route.to_string(),
            count: c.count,
            passengers: c.passengers,
            vehicles: c.vehicles,
            avg_passengers: rounded_mean(c.passengers, c.count),
            avg_vehicles: rounded_mean(c.vehicles, c.count),
        })
        .collect();

    top_by(entries, ROUTE_LIMIT, |e| e.passengers)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::NaiveDate;

    pub(crate) fn trip(
        from: &str,
        to: &str,
        route: &str,
        passengers: u64,
        vehicles: u64,
    ) -> TripRecord {
        TripRecord {
            date: NaiveDate::from_ymd_opt(2025, 4, 18).unwrap(),
            departure_port_code: from.chars().take(3).collect(),
            arrival_port_code: to.chars().take(3).collect(),
            departure_port_name: from.to_string(),
            arrival_port_name: to.to_string(),
            passenger_count: passengers,
            vehicle_count: vehicles,
            route_code: route.to_string(),
            route_name: route.to_string(),
        }
    }

    fn two_leg_sample() -> Vec<TripRecord> {
        vec![
            trip("PIREAS", "MYKONOS", "R1", 100, 10),
            trip("MYKONOS", "NAXOS", "R1", 50, 5),
        ]
    }

    #[test]
    fn test_totals_empty() {
        assert_eq!(compute_totals(&[]), Totals::default());
    }

    #[test]
    fn test_totals_two_legs() {
        let totals = compute_totals(&two_leg_sample());

        assert_eq!(totals.total_passengers, 150);
        assert_eq!(totals.total_vehicles, 15);
        assert_eq!(totals.total_routes, 1);
        assert_eq!(totals.total_ports, 3);
    }

    #[test]
    fn test_totals_count_duplicates() {
        let r = trip("A", "B", "R1", 10, 1);
        let totals = compute_totals(&[r.clone(), r]);

        assert_eq!(totals.total_passengers, 20);
        assert_eq!(totals.total_routes, 1);
        assert_eq!(totals.total_ports, 2);
    }

    #[test]
    fn test_port_traffic_two_legs() {
        let traffic = compute_port_traffic(&two_leg_sample());
        let mykonos = traffic.iter().find(|e| e.port == "MYKONOS").unwrap();

        assert_eq!(mykonos.departures, 1);
        assert_eq!(mykonos.arrivals, 1);
        assert_eq!(mykonos.passengers, 50);
        assert_eq!(mykonos.vehicles, 5);
        assert_eq!(mykonos.total, 2);
        assert_eq!(mykonos.efficiency, 25.0);
        // busiest port first
        assert_eq!(traffic[0].port, "MYKONOS");
    }

    #[test]
    fn test_port_traffic_arrival_only_port() {
        let traffic = compute_port_traffic(&two_leg_sample());
        let naxos = traffic.iter().find(|e| e.port == "NAXOS").unwrap();

        assert_eq!(naxos.departures, 0);
        assert_eq!(naxos.arrivals, 1);
        assert_eq!(naxos.passengers, 0);
        assert_eq!(naxos.vehicles, 0);
        assert_eq!(naxos.efficiency, 0.0);
    }

    #[test]
    fn test_port_traffic_ties_keep_first_occurrence() {
        let traffic = compute_port_traffic(&[trip("A", "B", "R1", 1, 0), trip("C", "D", "R2", 1, 0)]);
        let ports: Vec<_> = traffic.iter().map(|e| e.port.as_str()).collect();

        assert_eq!(ports, ["A", "B", "C", "D"]);
    }

    #[test]
    fn test_port_traffic_capped_and_sorted() {
        let records: Vec<_> = (0..15)
            .flat_map(|i| {
                let port = format!("P{i}");
                (0..=i).map(move |_| trip(&port, "HUB", "R", 3, 1))
            })
            .collect();
        let traffic = compute_port_traffic(&records);

        assert_eq!(traffic.len(), PORT_TRAFFIC_LIMIT);
        assert!(traffic.windows(2).all(|w| w[0].total >= w[1].total));
        assert_eq!(traffic[0].port, "HUB");
        assert_eq!(traffic[1].port, "P14");
    }

    #[test]
    fn test_efficiency_rounds_to_one_decimal() {
        let traffic = compute_port_traffic(&[
            trip("A", "B", "R1", 100, 0),
            trip("C", "A", "R1", 0, 0),
            trip("D", "A", "R1", 0, 0),
        ]);
        let a = traffic.iter().find(|e| e.port == "A").unwrap();

        assert_eq!(a.total, 3);
        assert_eq!(a.efficiency, 33.3);
    }

    #[test]
    fn test_route_distribution() {
        let records = vec![
            trip("A", "B", "R1", 10, 0),
            trip("A", "B", "R2", 30, 0),
            trip("B", "A", "R1", 5, 0),
        ];
        let dist = compute_route_passenger_distribution(&records);

        assert_eq!(
            dist,
            vec![
                RoutePassengers { route: "R2".into(), passengers: 30 },
                RoutePassengers { route: "R1".into(), passengers: 15 },
            ]
        );
    }

    #[test]
    fn test_route_distribution_capped() {
        let records: Vec<_> = (0..12u64)
            .map(|i| trip("A", "B", &format!("R{i}"), i * 10, 0))
            .collect();
        let dist = compute_route_passenger_distribution(&records);
        let totals = compute_totals(&records);

        assert_eq!(dist.len(), ROUTE_LIMIT);
        assert_eq!(dist[0].route, "R11");
        assert!(dist.iter().map(|d| d.passengers).sum::<u64>() <= totals.total_passengers);
    }

    #[test]
    fn test_route_distribution_sums_match_totals_when_few_routes() {
        let records = two_leg_sample();
        let dist = compute_route_passenger_distribution(&records);

        assert_eq!(
            dist.iter().map(|d| d.passengers).sum::<u64>(),
            compute_totals(&records).total_passengers
        );
    }

    #[test]
    fn test_route_performance_averages() {
        let records = vec![
            trip("A", "B", "R1", 10, 1),
            trip("A", "B", "R1", 15, 2),
            trip("A", "B", "R2", 7, 3),
        ];
        let perf = compute_route_performance(&records);

        assert_eq!(perf.len(), 2);
        assert_eq!(perf[0].route, "R1");
        assert_eq!(perf[0].count, 2);
        assert_eq!(perf[0].passengers, 25);
        assert_eq!(perf[0].avg_passengers, 13);
        assert_eq!(perf[0].avg_vehicles, 2);
        assert_eq!(perf[1].avg_passengers, 7);

        for e in &perf {
            assert_eq!(e.avg_passengers, (e.passengers as f64 / e.count as f64).round() as u64);
        }
    }

    #[test]
    fn test_empty_inputs() {
        assert!(compute_port_traffic(&[]).is_empty());
        assert!(compute_route_passenger_distribution(&[]).is_empty());
        assert!(compute_route_performance(&[]).is_empty());
    }

    #[test]
    fn test_input_is_untouched() {
        let records = two_leg_sample();
        let before = records.clone();

        compute_totals(&records);
        compute_port_traffic(&records);
        compute_route_performance(&records);

        assert_eq!(records, before);
    }
}
