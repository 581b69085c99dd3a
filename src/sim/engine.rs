//! Multi-year driver threading storage state across consecutive years.

use tracing::debug;

use crate::config::SystemConfig;
use crate::error::SimError;
use crate::sim::HORIZON_YEARS;
use crate::sim::types::{AnnualResult, HourlyReading, StorageState};
use crate::sim::year::simulate_year;

/// Simulation engine owning the configuration and the season's readings.
///
/// Years are strictly sequential: each consumes the previous year's ending
/// storage state, so nothing here can run out of order or concurrently.
pub struct Engine {
    config: SystemConfig,
    readings: Vec<HourlyReading>,
}

impl Engine {
    /// Creates an engine, validating the configuration up front.
    ///
    /// The readings are expected to be season-filtered, ascending, and
    /// gap-free; the importer enforces that before they get here.
    ///
    /// # Errors
    ///
    /// Returns `SimError::InvalidConfig` with the full validation list if
    /// the configuration is rejected. Nothing is simulated in that case.
    pub fn new(config: SystemConfig, readings: Vec<HourlyReading>) -> Result<Self, SimError> {
        let errors = config.validate();
        if !errors.is_empty() {
            return Err(SimError::InvalidConfig(errors));
        }
        Ok(Self { config, readings })
    }

    /// Returns a reference to the validated configuration.
    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    /// Returns the season's readings.
    pub fn readings(&self) -> &[HourlyReading] {
        &self.readings
    }

    /// Runs the full 25-year horizon and returns one record per year.
    ///
    /// # Errors
    ///
    /// The first failing year aborts the run; later years are never
    /// computed against a corrupt carried-forward state.
    pub fn run(&self) -> Result<Vec<AnnualResult>, SimError> {
        self.run_years(HORIZON_YEARS)
    }

    /// Runs the first `years` years of the horizon.
    ///
    /// # Panics
    ///
    /// Panics if `years` exceeds the configured loss series length.
    pub fn run_years(&self, years: usize) -> Result<Vec<AnnualResult>, SimError> {
        let mut results = Vec::with_capacity(years);
        let mut state = StorageState::new(self.config.storage.initial_temp_c);
        for year in 0..years {
            let outcome = simulate_year(year, state, &self.config, &self.readings)?;
            debug!(
                year,
                end_temp_c = outcome.state_out.temp_c,
                withdrawn_kwh = outcome.result.heat_withdrawn_kwh,
                "year complete"
            );
            state = outcome.state_out;
            results.push(outcome.result);
        }
        Ok(results)
    }
}
