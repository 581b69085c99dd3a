//! Post-hoc horizon summary computed from the per-year results.

use std::fmt;

use crate::sim::STORAGE_FULL_TEMP_C;
use crate::sim::types::AnnualResult;

/// Aggregate figures for a complete simulation horizon.
///
/// Computed post-hoc from the `AnnualResult` records so the reported totals
/// always match the exported table.
#[derive(Debug, Clone)]
pub struct HorizonReport {
    /// Number of years covered.
    pub years: usize,
    /// Heat delivered to storage across all years (kWh).
    pub total_heat_stored_kwh: f64,
    /// Heat withdrawn to serve the building across all years (kWh).
    pub total_heat_withdrawn_kwh: f64,
    /// Plant electricity consumed across all years, pumps included (kWh).
    pub total_electricity_kwh: f64,
    /// Hours in which the plant charged, summed over the horizon.
    pub total_operating_hours: usize,
    /// Avoided purchase cost from PV self-consumption, summed.
    pub total_building_savings: f64,
    /// Grid sale revenue, summed.
    pub total_grid_revenue: f64,
    /// Highest post-charge storage temperature seen (°C).
    pub peak_storage_temp_c: f64,
    /// Years in which the storage hit the temperature ceiling.
    pub years_at_ceiling: usize,
    /// Ending storage temperature of the final year (°C).
    pub final_temp_c: f64,
}

impl HorizonReport {
    /// Computes the report from the complete per-year record vector.
    pub fn from_results(results: &[AnnualResult]) -> Self {
        let mut report = Self {
            years: results.len(),
            total_heat_stored_kwh: 0.0,
            total_heat_withdrawn_kwh: 0.0,
            total_electricity_kwh: 0.0,
            total_operating_hours: 0,
            total_building_savings: 0.0,
            total_grid_revenue: 0.0,
            peak_storage_temp_c: 0.0,
            years_at_ceiling: 0,
            final_temp_c: 0.0,
        };
        if results.is_empty() {
            return report;
        }

        for r in results {
            report.total_heat_stored_kwh += r.heat_stored_kwh;
            report.total_heat_withdrawn_kwh += r.heat_withdrawn_kwh;
            report.total_electricity_kwh += r.electricity_kwh;
            report.total_operating_hours += r.operating_hours;
            report.total_building_savings += r.building_savings;
            report.total_grid_revenue += r.grid_revenue;
            report.peak_storage_temp_c = report.peak_storage_temp_c.max(r.post_charge_temp_c);
            if r.post_charge_temp_c >= STORAGE_FULL_TEMP_C {
                report.years_at_ceiling += 1;
            }
        }
        report.final_temp_c = results[results.len() - 1].end_temp_c;
        report
    }
}

impl fmt::Display for HorizonReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Horizon Report ({} years) ---", self.years)?;
        writeln!(f, "Heat stored:          {:.0} kWh", self.total_heat_stored_kwh)?;
        writeln!(f, "Heat withdrawn:       {:.0} kWh", self.total_heat_withdrawn_kwh)?;
        writeln!(f, "Plant electricity:    {:.0} kWh", self.total_electricity_kwh)?;
        writeln!(f, "Operating hours:      {}", self.total_operating_hours)?;
        writeln!(f, "Building savings:     {:.2}", self.total_building_savings)?;
        writeln!(f, "Grid revenue:         {:.2}", self.total_grid_revenue)?;
        writeln!(
            f,
            "Peak storage temp:    {:.2} C ({} year(s) at ceiling)",
            self.peak_storage_temp_c, self.years_at_ceiling
        )?;
        write!(f, "Final storage temp:   {:.2} C", self.final_temp_c)
    }
}
