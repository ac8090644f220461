pub mod aggregate;
pub mod config;
pub mod dashboard;
pub mod fetch;
pub mod label;
pub mod output;
pub mod table;
pub mod types;
pub mod utility;

pub use aggregate::{
    compute_port_traffic, compute_route_passenger_distribution, compute_route_performance,
    compute_totals,
};
pub use label::{format_date_range_label, format_date_range_label_now};
