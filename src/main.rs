//! CLI entry point for the ferry traffic dashboard.
//!
//! Fetches trip records for a date range and prints the aggregated dashboard,
//! a searchable record listing, or a CSV export.

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use ferry_stats::{
    config::Config,
    dashboard::Dashboard,
    fetch::{BasicClient, auth::ApiKey, fallback_records, fetch_records},
    output::{export_file_name, export_records, print_json, print_pretty},
    table::{self, PAGE_SIZE},
    types::{DateRange, TripRecord},
};
use std::ffi::OsStr;
use std::path::Path;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// Upper bound for `--last-days`: a century of history.
const MAX_LAST_DAYS: u64 = 36_525;

#[derive(Parser)]
#[command(name = "ferry_stats")]
#[command(about = "Aggregate Greek ferry traffic from data.gov.gr", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct RangeArgs {
    /// First day to include (YYYY-MM-DD); defaults to `--last-days` before today
    #[arg(long)]
    from: Option<String>,

    /// Last day to include (YYYY-MM-DD); defaults to today
    #[arg(long)]
    to: Option<String>,

    /// Days back from today when `--from` is not given (0 = today only)
    #[arg(
        short = 'l',
        long,
        default_value_t = 7,
        value_parser = clap::value_parser!(u64).range(0..=MAX_LAST_DAYS)
    )]
    last_days: u64,

    /// Use the built-in sample record if the API request fails
    #[arg(long, default_value_t = false)]
    fallback: bool,
}

impl RangeArgs {
    fn resolve(&self, today: NaiveDate) -> Result<DateRange> {
        let to = match &self.to {
            Some(to) => NaiveDate::parse_from_str(to, "%Y-%m-%d")?,
            None => today,
        };
        let from = match &self.from {
            Some(from) => NaiveDate::parse_from_str(from, "%Y-%m-%d")?,
            None => DateRange::last_days(to, self.last_days)?.from,
        };
        DateRange::new(from, to)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print totals, port traffic and route statistics for a date range
    Summary {
        #[command(flatten)]
        range: RangeArgs,

        /// Emit the full dashboard as JSON instead of a summary
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List records, newest first, optionally filtered by port or route name
    Records {
        #[command(flatten)]
        range: RangeArgs,

        /// Case-insensitive text matched against port and route names
        #[arg(short, long, default_value = "")]
        query: String,

        /// Number of rows to show
        #[arg(short = 'n', long, default_value_t = PAGE_SIZE)]
        limit: usize,

        /// Show every matching row
        #[arg(long, default_value_t = false)]
        all: bool,
    },
    /// Export records for a date range as CSV
    Export {
        #[command(flatten)]
        range: RangeArgs,

        /// Output path; defaults to greek_ferry_data_<from>_to_<to>.csv
        #[arg(short, long)]
        output: Option<String>,

        /// Gzip compress the CSV
        #[arg(long, default_value_t = false)]
        gzip: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let config = Config::from_env();

    // Logging setup: colored stderr + JSON rolling log file
    let log_dir = Path::new(&config.log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&config.log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("ferry_stats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let today = Local::now().date_naive();

    if let Err(e) = run(cli.command, &config, today).await {
        error!(error = %e, "Command failed");
        return Err(e);
    }

    Ok(())
}

async fn run(command: Commands, config: &Config, today: NaiveDate) -> Result<()> {
    match command {
        Commands::Summary { range, json } => {
            let date_range = range.resolve(today)?;
            let records = load_records(config, &date_range, range.fallback).await?;
            let dashboard = Dashboard::build(date_range, &records, today);

            if dashboard.is_empty() {
                warn!(label = %dashboard.label, "No data found for the selected period");
                return Ok(());
            }

            if json {
                print_json(&dashboard)?;
            } else {
                print_pretty(&dashboard);
                log_summary(&dashboard);
            }
        }
        Commands::Records {
            range,
            query,
            limit,
            all,
        } => {
            let date_range = range.resolve(today)?;
            let records = load_records(config, &date_range, range.fallback).await?;
            let rows = table::search(&records, &query);
            let shown = if all { rows.len() } else { limit };

            for r in table::page(&rows, shown) {
                log_row(r);
            }

            info!(
                shown = shown.min(rows.len()),
                matched = rows.len(),
                total = records.len(),
                "Record listing"
            );
        }
        Commands::Export {
            range,
            output,
            gzip,
        } => {
            let date_range = range.resolve(today)?;
            let records = load_records(config, &date_range, range.fallback).await?;
            let path = output.unwrap_or_else(|| export_file_name(&date_range, gzip));

            export_records(&path, &records, gzip)?;
            info!(path = %path, rows = records.len(), gzip, "Export complete");
        }
    }

    Ok(())
}

/// Fetches records for `range`, substituting the sample record on failure
/// when `fallback` is set.
#[tracing::instrument(skip(config, range), fields(from = %range.from, to = %range.to))]
async fn load_records(config: &Config, range: &DateRange, fallback: bool) -> Result<Vec<TripRecord>> {
    let client = BasicClient::with_timeout(REQUEST_TIMEOUT)?;

    let fetch_start = std::time::Instant::now();
    let result = match &config.api_token {
        Some(token) => {
            let client = ApiKey::token(client, token)?;
            fetch_records(&client, &config.api_url, range).await
        }
        None => fetch_records(&client, &config.api_url, range).await,
    };

    match result {
        Ok(records) => {
            info!(
                records = records.len(),
                elapsed_ms = fetch_start.elapsed().as_millis() as u64,
                "Records fetched"
            );
            Ok(records)
        }
        Err(e) if fallback => {
            warn!(error = %e, "Fetch failed, using sample record");
            Ok(fallback_records())
        }
        Err(e) => Err(e),
    }
}

fn log_summary(dashboard: &Dashboard) {
    let t = &dashboard.totals;
    info!(
        period = %dashboard.label,
        records = dashboard.record_count,
        passengers = t.total_passengers,
        vehicles = t.total_vehicles,
        routes = t.total_routes,
        ports = t.total_ports,
        "Totals"
    );

    for p in &dashboard.port_traffic {
        info!(
            port = %p.port,
            departures = p.departures,
            arrivals = p.arrivals,
            passengers = p.passengers,
            efficiency = p.efficiency,
            "Port traffic"
        );
    }

    for r in &dashboard.route_performance {
        info!(
            route = %r.route,
            trips = r.count,
            passengers = r.passengers,
            vehicles = r.vehicles,
            avg_passengers = r.avg_passengers,
            avg_vehicles = r.avg_vehicles,
            "Route performance"
        );
    }

    let s = &dashboard.performance_summary;
    info!(
        avg_passengers_per_route = s.avg_passengers_per_route,
        avg_vehicles_per_route = s.avg_vehicles_per_route,
        routes_analyzed = s.routes_analyzed,
        "Route performance summary"
    );
}

fn log_row(r: &TripRecord) {
    info!(
        date = %r.date,
        route = %r.route_name,
        from = %r.departure_port_name,
        to = %r.arrival_port_name,
        passengers = r.passenger_count,
        vehicles = r.vehicle_count,
        utilization = %format!("{}%", table::utilization(r)),
        "Trip"
    );
}
