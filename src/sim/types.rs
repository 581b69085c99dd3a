//! Core simulation types: readings, storage state, and per-hour / per-year results.

use std::fmt;

use chrono::NaiveDateTime;

use crate::error::SimError;
use crate::sim::STORAGE_FULL_TEMP_C;

/// One hour of exogenous observations inside the operating season.
///
/// Readings are inputs only; the simulation never mutates them. PV
/// degradation is applied on the fly per simulated year.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyReading {
    /// Observation hour.
    pub timestamp: NaiveDateTime,
    /// Raw PV export available this hour (kWh).
    pub pv_export_kwh: f64,
    /// Outdoor temperature (°C).
    pub outdoor_temp_c: f64,
    /// Building electrical load (kWh).
    pub building_load_kwh: f64,
    /// Spot price for the hour.
    pub spot_price: f64,
}

impl HourlyReading {
    /// Rejects non-finite values and negative energies.
    ///
    /// # Errors
    ///
    /// Returns `SimError::MalformedReading` naming the offending field.
    pub fn check(&self) -> Result<(), SimError> {
        let fields = [
            ("pv_export_kwh", self.pv_export_kwh),
            ("outdoor_temp_c", self.outdoor_temp_c),
            ("building_load_kwh", self.building_load_kwh),
            ("spot_price", self.spot_price),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(SimError::MalformedReading {
                    timestamp: self.timestamp,
                    field,
                    value,
                });
            }
        }
        for (field, value) in [
            ("pv_export_kwh", self.pv_export_kwh),
            ("building_load_kwh", self.building_load_kwh),
        ] {
            if value < 0.0 {
                return Err(SimError::MalformedReading {
                    timestamp: self.timestamp,
                    field,
                    value,
                });
            }
        }
        Ok(())
    }
}

/// Mutable storage state threaded hour-by-hour and year-by-year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StorageState {
    /// Current storage temperature (°C).
    pub temp_c: f64,
    /// Latched once the temperature reaches the ceiling; stays set for the
    /// remainder of the year.
    pub full: bool,
}

impl StorageState {
    /// Creates a year-start state; the full flag is derived from the
    /// starting temperature.
    pub fn new(temp_c: f64) -> Self {
        Self {
            temp_c,
            full: temp_c >= STORAGE_FULL_TEMP_C,
        }
    }
}

/// Complete record of one dispatched hour.
#[derive(Debug, Clone)]
pub struct HourlyResult {
    /// Observation hour.
    pub timestamp: NaiveDateTime,
    /// Electrical draw of the charging plant (kWh).
    pub heat_pump_draw_kwh: f64,
    /// Heat delivered to storage (kWh).
    pub heat_to_storage_kwh: f64,
    /// Storage temperature after this hour (°C).
    pub storage_temp_c: f64,
    /// PV routed to the building (kWh).
    pub pv_to_building_kwh: f64,
    /// PV routed to the grid (kWh).
    pub pv_to_grid_kwh: f64,
    /// Avoided purchase cost from PV self-consumption.
    pub building_savings: f64,
    /// Grid sale revenue; filled by the year-level second pass.
    pub grid_revenue: f64,
}

/// Summary record of one simulated year.
#[derive(Debug, Clone)]
pub struct AnnualResult {
    /// Year index (0-based).
    pub year: usize,
    /// PV degradation factor applied throughout the year.
    pub pv_factor: f64,
    /// Heat delivered to storage over the season (kWh).
    pub heat_stored_kwh: f64,
    /// Heat lost from storage before the season started (kWh).
    pub storage_loss_kwh: f64,
    /// Storage temperature after the annual loss was applied (°C).
    pub start_temp_c: f64,
    /// Storage temperature at the end of the charging season (°C).
    pub post_charge_temp_c: f64,
    /// Storage temperature after withdrawal; seed for the next year (°C).
    pub end_temp_c: f64,
    /// Hours in which the plant charged the storage.
    pub operating_hours: usize,
    /// Electrical consumption of the whole plant, pumps included (kWh).
    pub electricity_kwh: f64,
    /// Electrical consumption attributable to the heat pump alone (kWh).
    pub heat_pump_electricity_kwh: f64,
    /// Heat withdrawn at year end to serve the building (kWh).
    pub heat_withdrawn_kwh: f64,
    /// PV routed to the building over the year (kWh).
    pub pv_to_building_kwh: f64,
    /// Avoided purchase cost from PV self-consumption.
    pub building_savings: f64,
    /// PV routed to the grid over the year (kWh).
    pub pv_to_grid_kwh: f64,
    /// Grid sale revenue after the amortized standing charge.
    pub grid_revenue: f64,
}

impl fmt::Display for AnnualResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "year {:>2} | pv={:.4} | stored={:>12.0} kWh  loss={:>10.0} kWh | \
             temp {:>5.2} -> {:>5.2} -> {:>5.2} C | {:>4} op-h | \
             withdrawn={:>10.0} kWh | bldg={:>10.0} kWh (save {:>10.0}) | \
             grid={:>10.0} kWh (rev {:>10.0})",
            self.year,
            self.pv_factor,
            self.heat_stored_kwh,
            self.storage_loss_kwh,
            self.start_temp_c,
            self.post_charge_temp_c,
            self.end_temp_c,
            self.operating_hours,
            self.heat_withdrawn_kwh,
            self.pv_to_building_kwh,
            self.building_savings,
            self.pv_to_grid_kwh,
            self.grid_revenue,
        )
    }
}
