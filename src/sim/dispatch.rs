//! Hourly charge decision and residual PV routing.

use crate::config::SystemConfig;
use crate::error::SimError;
use crate::sim::STORAGE_FULL_TEMP_C;
use crate::sim::types::{HourlyReading, HourlyResult, StorageState};

/// Executes one hour of plant dispatch against the current storage state.
///
/// `pv_kwh` is the degradation-adjusted PV available this hour; the raw
/// reading stays untouched. Charging requires all of: storage not full,
/// outdoor temperature at or above the dry-cooler minimum, and available PV
/// at or above the plant minimum. The plant draws at most its aggregate
/// rating; only the heat pump's share of that draw becomes heat, the rest
/// feeds the circulation pump and dry coolers.
///
/// Residual PV goes to the building first, then to the grid. The grid
/// revenue field is left at zero here and filled by the year-level second
/// pass.
///
/// # Errors
///
/// Returns `SimError::MalformedReading` for non-finite or negative-energy
/// readings; the caller aborts the year.
pub fn dispatch_hour(
    reading: &HourlyReading,
    pv_kwh: f64,
    state: &mut StorageState,
    config: &SystemConfig,
) -> Result<HourlyResult, SimError> {
    reading.check()?;

    let plant = &config.plant;
    let system_max = plant.system_max_kw();

    let mut draw = 0.0;
    let mut heat = 0.0;

    let can_charge = !state.full
        && reading.outdoor_temp_c >= plant.dry_cooler_min_temp_c
        && pv_kwh >= plant.system_min_kw();
    if can_charge {
        draw = pv_kwh.min(system_max);
        heat = draw * (plant.heat_pump_kw / system_max) * plant.cop;
        state.temp_c += heat / config.storage.heat_capacity_kwh_per_k;
        if state.temp_c >= STORAGE_FULL_TEMP_C {
            state.temp_c = STORAGE_FULL_TEMP_C;
            state.full = true;
        }
    }

    let pv_after = (pv_kwh - draw).max(0.0);
    let pv_to_building = pv_after.min(reading.building_load_kwh);
    let pv_to_grid = pv_after - pv_to_building;
    let building_savings =
        pv_to_building * (reading.spot_price + config.tariffs.purchase_energy_adder);

    Ok(HourlyResult {
        timestamp: reading.timestamp,
        heat_pump_draw_kwh: draw,
        heat_to_storage_kwh: heat,
        storage_temp_c: state.temp_c,
        pv_to_building_kwh: pv_to_building,
        pv_to_grid_kwh: pv_to_grid,
        building_savings,
        grid_revenue: 0.0,
    })
}
