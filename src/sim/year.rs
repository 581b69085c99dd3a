//! One simulated year: loss-adjusted start, hourly fold, withdrawal, aggregation.

use crate::config::{PvConfig, SystemConfig};
use crate::error::SimError;
use crate::sim::dispatch::dispatch_hour;
use crate::sim::revenue::grid_sale_revenue;
use crate::sim::types::{AnnualResult, HourlyReading, HourlyResult, StorageState};
use crate::sim::{WITHDRAWAL_FLOOR_C, WITHDRAWAL_START_YEAR};

/// Everything one year produces: the summary, the per-hour trace, and the
/// storage state handed to the next year.
#[derive(Debug, Clone)]
pub struct YearOutcome {
    pub result: AnnualResult,
    pub hours: Vec<HourlyResult>,
    pub state_out: StorageState,
}

/// PV yield factor for a 0-indexed simulation year.
///
/// Linear interpolation between the first-year and 25th-year yields:
/// exactly `year1_yield` at year 0 and `year25_yield` at year 24.
pub fn pv_degradation_factor(pv: &PvConfig, year: usize) -> f64 {
    let step = (pv.year1_yield - pv.year25_yield) / 24.0;
    pv.year1_yield - year as f64 * step
}

/// Simulates one year of charging, withdrawal, and economics.
///
/// The annual loss comes out of the carried-in temperature before the
/// season starts; the storage never cools below the undisturbed initial
/// temperature. The hourly fold threads the storage state through every
/// reading in order, then the end-of-year withdrawal serves the building
/// (years 3+ only, down to the 35 °C reserve), and the two-pass revenue
/// computation fills the grid column.
///
/// # Errors
///
/// A malformed reading aborts the year; nothing is carried forward.
///
/// # Panics
///
/// Panics if the loss series is shorter than `year + 1` entries; the
/// engine's fail-fast validation guarantees 25.
pub fn simulate_year(
    year: usize,
    state_in: StorageState,
    config: &SystemConfig,
    readings: &[HourlyReading],
) -> Result<YearOutcome, SimError> {
    let storage = &config.storage;
    let factor = pv_degradation_factor(&config.pv, year);
    let loss_kwh = storage.annual_loss_kwh[year];

    let start_temp =
        (state_in.temp_c - loss_kwh / storage.heat_capacity_kwh_per_k).max(storage.initial_temp_c);
    let mut state = StorageState::new(start_temp);

    let mut hours = Vec::with_capacity(readings.len());
    for reading in readings {
        let pv_kwh = reading.pv_export_kwh * factor;
        hours.push(dispatch_hour(reading, pv_kwh, &mut state, config)?);
    }
    let post_charge_temp = state.temp_c;

    let mut withdrawn = 0.0;
    if year >= WITHDRAWAL_START_YEAR && state.temp_c > WITHDRAWAL_FLOOR_C {
        let available = storage.heat_capacity_kwh_per_k * (state.temp_c - WITHDRAWAL_FLOOR_C);
        withdrawn = config.building.annual_heat_demand_kwh.min(available);
        state.temp_c -= withdrawn / storage.heat_capacity_kwh_per_k;
    }

    let grid_revenue = grid_sale_revenue(&mut hours, readings, &config.tariffs);

    let mut result = AnnualResult {
        year,
        pv_factor: factor,
        heat_stored_kwh: 0.0,
        storage_loss_kwh: loss_kwh,
        start_temp_c: start_temp,
        post_charge_temp_c: post_charge_temp,
        end_temp_c: state.temp_c,
        operating_hours: 0,
        electricity_kwh: 0.0,
        heat_pump_electricity_kwh: 0.0,
        heat_withdrawn_kwh: withdrawn,
        pv_to_building_kwh: 0.0,
        building_savings: 0.0,
        pv_to_grid_kwh: 0.0,
        grid_revenue,
    };
    for hour in &hours {
        result.heat_stored_kwh += hour.heat_to_storage_kwh;
        if hour.heat_pump_draw_kwh > 0.0 {
            result.operating_hours += 1;
        }
        result.electricity_kwh += hour.heat_pump_draw_kwh;
        result.pv_to_building_kwh += hour.pv_to_building_kwh;
        result.building_savings += hour.building_savings;
        result.pv_to_grid_kwh += hour.pv_to_grid_kwh;
    }
    result.heat_pump_electricity_kwh = result.heat_stored_kwh / config.plant.cop;

    Ok(YearOutcome {
        result,
        hours,
        state_out: state,
    })
}
