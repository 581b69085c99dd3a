//! Grid sale revenue: spot-indexed export minus an amortized standing charge.

use crate::config::TariffConfig;
use crate::sim::types::{HourlyReading, HourlyResult};

/// Fills the grid-revenue column of a finished year and returns the total.
///
/// The standing charge models a fixed grid-connection fee amortized over
/// metered export: the year's mean hourly PV-to-grid times the fixed sale
/// rate, subtracted uniformly from every hour. It depends on the whole
/// year's exports, so this must run only after the hourly fold is complete.
///
/// `hours` and `readings` must be parallel slices for the same year.
pub fn grid_sale_revenue(
    hours: &mut [HourlyResult],
    readings: &[HourlyReading],
    tariffs: &TariffConfig,
) -> f64 {
    if hours.is_empty() {
        return 0.0;
    }
    debug_assert_eq!(hours.len(), readings.len());

    let mean_export_kwh =
        hours.iter().map(|h| h.pv_to_grid_kwh).sum::<f64>() / hours.len() as f64;
    let standing_charge = mean_export_kwh * tariffs.fixed_sale_rate;

    let mut total = 0.0;
    for (hour, reading) in hours.iter_mut().zip(readings) {
        hour.grid_revenue =
            hour.pv_to_grid_kwh * (reading.spot_price - tariffs.sale_energy_adder) - standing_charge;
        total += hour.grid_revenue;
    }
    total
}
