//! Output formatting and export for dashboards and records.
//!
//! Supports pretty-printing, JSON logging, and CSV export (optionally gzipped).

use anyhow::{Result, bail};
use csv::WriterBuilder;
use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs::File;
use std::io::{BufWriter, Write};
use tracing::{debug, info};

use crate::dashboard::Dashboard;
use crate::types::{DateRange, TripRecord};

/// Header row of the exported CSV.
pub const CSV_HEADER: [&str; 7] = [
    "Ημερομηνία",
    "Λιμάνι Αναχώρησης",
    "Λιμάνι Άφιξης",
    "Επιβάτες",
    "Οχήματα",
    "Κωδικός Δρομολογίου",
    "Όνομα Δρομολογίου",
];

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Logs a dashboard using Rust's debug pretty-print format.
pub fn print_pretty(dashboard: &Dashboard) {
    debug!("{:#?}", dashboard);
}

/// Logs a dashboard as pretty-printed JSON.
pub fn print_json(dashboard: &Dashboard) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(dashboard)?);
    Ok(())
}

/// Default export file name for `range`, e.g. `greek_ferry_data_2025-04-01_to_2025-04-08.csv`.
pub fn export_file_name(range: &DateRange, gzip: bool) -> String {
    let name = format!("greek_ferry_data_{}_to_{}.csv", range.from, range.to);
    if gzip { format!("{name}.gz") } else { name }
}

/// Writes `records` as CSV, preceded by a UTF-8 BOM so spreadsheet tools
/// pick up the Greek text.
pub fn write_csv<W: Write>(out: &mut W, records: &[TripRecord]) -> Result<()> {
    out.write_all(UTF8_BOM)?;

    let mut writer = WriterBuilder::new().has_headers(false).from_writer(out);
    writer.write_record(CSV_HEADER)?;

    for r in records {
        writer.write_record([
            r.date.to_string(),
            r.departure_port_name.clone(),
            r.arrival_port_name.clone(),
            r.passenger_count.to_string(),
            r.vehicle_count.to_string(),
            r.route_code.clone(),
            r.route_name.clone(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Exports `records` to `path`, gzip-compressed when `gzip` is set.
///
/// # Errors
///
/// Fails on an empty record set; there is nothing to export.
pub fn export_records(path: &str, records: &[TripRecord], gzip: bool) -> Result<()> {
    if records.is_empty() {
        bail!("no records to export");
    }
    debug!(path, gzip, rows = records.len(), "Exporting CSV");

    let file = BufWriter::new(File::create(path)?);

    if gzip {
        let mut encoder = GzEncoder::new(file, Compression::default());
        write_csv(&mut encoder, records)?;
        encoder.finish()?.flush()?;
    } else {
        let mut file = file;
        write_csv(&mut file, records)?;
        file.flush()?;
    }

    Ok(())
}
