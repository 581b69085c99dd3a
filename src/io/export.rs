//! CSV export for the per-year simulation results.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sim::types::AnnualResult;

/// Column header for the annual results table.
const HEADER: &str = "year,pv_factor,heat_stored_kwh,storage_loss_kwh,start_temp_c,\
                      post_charge_temp_c,end_temp_c,operating_hours,electricity_kwh,\
                      heat_pump_electricity_kwh,heat_withdrawn_kwh,pv_to_building_kwh,\
                      building_savings,pv_to_grid_kwh,grid_revenue";

/// Exports annual results to a CSV file at the given path.
///
/// Writes a header row followed by one data row per year. Produces
/// deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(results: &[AnnualResult], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(results, buf)
}

/// Writes annual results as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(results: &[AnnualResult], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    // Header
    wtr.write_record(HEADER.split(',').map(str::trim))?;

    // Data rows
    for r in results {
        wtr.write_record(&[
            r.year.to_string(),
            format!("{:.4}", r.pv_factor),
            format!("{:.3}", r.heat_stored_kwh),
            format!("{:.3}", r.storage_loss_kwh),
            format!("{:.2}", r.start_temp_c),
            format!("{:.2}", r.post_charge_temp_c),
            format!("{:.2}", r.end_temp_c),
            r.operating_hours.to_string(),
            format!("{:.3}", r.electricity_kwh),
            format!("{:.3}", r.heat_pump_electricity_kwh),
            format!("{:.3}", r.heat_withdrawn_kwh),
            format!("{:.3}", r.pv_to_building_kwh),
            format!("{:.2}", r.building_savings),
            format!("{:.3}", r.pv_to_grid_kwh),
            format!("{:.2}", r.grid_revenue),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
