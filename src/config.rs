//! TOML-based system configuration and well-field preset definitions.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::sim::{HORIZON_YEARS, MIN_POWER_FRACTION, STORAGE_FULL_TEMP_C};

/// Top-level system configuration parsed from TOML.
///
/// All fields have defaults matching the first well field. Load from TOML
/// with [`SystemConfig::from_toml_file`] or use one of the built-in presets
/// via [`SystemConfig::from_preset`].
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SystemConfig {
    /// Heat pump, circulation pump, and dry-cooler ratings.
    #[serde(default)]
    pub plant: PlantConfig,
    /// Borehole storage capacity, starting temperature, and loss series.
    #[serde(default)]
    pub storage: StorageConfig,
    /// PV yield degradation endpoints.
    #[serde(default)]
    pub pv: PvConfig,
    /// Grid tariff adders and the fixed feed-in rate.
    #[serde(default)]
    pub tariffs: TariffConfig,
    /// Building heat demand served from storage.
    #[serde(default)]
    pub building: BuildingConfig,
}

/// Heat pump, circulation pump, and dry-cooler ratings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlantConfig {
    /// Heat pump rated electrical power (kW).
    pub heat_pump_kw: f64,
    /// Circulation pump power (kW).
    pub circulation_pump_kw: f64,
    /// Power of a single dry cooler (kW).
    pub dry_cooler_kw: f64,
    /// Number of dry coolers installed.
    pub dry_cooler_count: u32,
    /// Heat pump coefficient of performance.
    pub cop: f64,
    /// Minimum outdoor temperature for dry-cooler operation (°C).
    pub dry_cooler_min_temp_c: f64,
}

impl PlantConfig {
    /// Aggregate rated power of the whole charging plant (kW).
    pub fn system_max_kw(&self) -> f64 {
        self.heat_pump_kw
            + self.circulation_pump_kw
            + self.dry_cooler_kw * self.dry_cooler_count as f64
    }

    /// Minimum aggregate power below which the plant does not start (kW).
    pub fn system_min_kw(&self) -> f64 {
        self.system_max_kw() * MIN_POWER_FRACTION
    }
}

impl Default for PlantConfig {
    fn default() -> Self {
        Self {
            heat_pump_kw: 537.1,
            circulation_pump_kw: 17.18,
            dry_cooler_kw: 10.12,
            dry_cooler_count: 4,
            cop: 3.7,
            dry_cooler_min_temp_c: 13.0,
        }
    }
}

/// Borehole storage capacity, starting temperature, and annual loss series.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    /// Storage heat capacity (kWh per kelvin).
    pub heat_capacity_kwh_per_k: f64,
    /// Undisturbed ground temperature; the storage never cools below it (°C).
    pub initial_temp_c: f64,
    /// Heat lost from storage per simulated year (kWh), indexed by year.
    pub annual_loss_kwh: Vec<f64>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            heat_capacity_kwh_per_k: 153_461.0,
            initial_temp_c: 7.2,
            annual_loss_kwh: vec![
                0.0, 0.0, 0.0, 1_990_622.0, 1_572_758.0, 1_386_540.0, 1_275_190.0, 1_199_096.0,
                1_142_917.0, 1_099_286.0, 1_064_169.0, 1_035_140.0, 1_010_646.0, 989_637.0,
                971_375.0, 955_323.0, 941_081.0, 928_344.0, 916_874.0, 906_482.0, 897_017.0,
                888_356.0, 880_397.0, 873_056.0, 866_261.0, 859_952.0, 854_080.0, 848_598.0,
            ],
        }
    }
}

/// PV yield degradation endpoints.
///
/// The per-year factor falls linearly from `year1_yield` to `year25_yield`
/// across the simulation horizon.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PvConfig {
    /// Yield factor in the first simulated year.
    pub year1_yield: f64,
    /// Yield factor in the 25th simulated year.
    pub year25_yield: f64,
}

impl Default for PvConfig {
    fn default() -> Self {
        Self {
            year1_yield: 0.9850,
            year25_yield: 0.8890,
        }
    }
}

/// Grid tariff adders and the fixed feed-in rate.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TariffConfig {
    /// Energy tariff added on top of spot when the building consumes PV.
    pub purchase_energy_adder: f64,
    /// Energy tariff subtracted from spot when selling; negative raises revenue.
    pub sale_energy_adder: f64,
    /// Fixed feed-in rate amortized over the year's mean hourly export.
    pub fixed_sale_rate: f64,
}

impl Default for TariffConfig {
    fn default() -> Self {
        Self {
            purchase_energy_adder: 0.05,
            sale_energy_adder: -0.05,
            fixed_sale_rate: 0.0198,
        }
    }
}

/// Building heat demand served from storage.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildingConfig {
    /// Annual building heat demand (kWh).
    pub annual_heat_demand_kwh: f64,
}

impl Default for BuildingConfig {
    fn default() -> Self {
        Self {
            annual_heat_demand_kwh: 1_528_173.0,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field} — {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"storage.heat_capacity_kwh_per_k"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl SystemConfig {
    /// Returns the first well-field configuration (the default constants).
    pub fn well_field_1() -> Self {
        Self {
            plant: PlantConfig::default(),
            storage: StorageConfig::default(),
            pv: PvConfig::default(),
            tariffs: TariffConfig::default(),
            building: BuildingConfig::default(),
        }
    }

    /// Returns the second well-field configuration: a larger circulation
    /// pump, more thermal mass, and cooler undisturbed ground.
    pub fn well_field_2() -> Self {
        Self {
            plant: PlantConfig {
                circulation_pump_kw: 23.40,
                ..PlantConfig::default()
            },
            storage: StorageConfig {
                heat_capacity_kwh_per_k: 166_176.0,
                initial_temp_c: 6.3,
                annual_loss_kwh: vec![
                    0.0, 0.0, 0.0, 1_344_465.0, 1_081_465.0, 965_630.0, 897_047.0, 850_594.0,
                    816_581.0, 790_371.0, 769_433.0, 752_252.0, 737_857.0, 725_596.0, 715_012.0,
                    705_772.0, 697_630.0, 690_398.0, 683_930.0, 678_109.0, 672_843.0, 668_058.0,
                    663_691.0, 659_691.0, 656_016.0, 652_627.0, 649_496.0, 646_594.0,
                ],
            },
            pv: PvConfig::default(),
            tariffs: TariffConfig::default(),
            building: BuildingConfig::default(),
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["well_field_1", "well_field_2"];

    /// Loads a configuration from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "well_field_1" => Ok(Self::well_field_1()),
            "well_field_2" => Ok(Self::well_field_2()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if the configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let p = &self.plant;
        if p.heat_pump_kw <= 0.0 {
            errors.push(ConfigError {
                field: "plant.heat_pump_kw".into(),
                message: "must be > 0".into(),
            });
        }
        if p.circulation_pump_kw < 0.0 {
            errors.push(ConfigError {
                field: "plant.circulation_pump_kw".into(),
                message: "must be >= 0".into(),
            });
        }
        if p.dry_cooler_kw < 0.0 {
            errors.push(ConfigError {
                field: "plant.dry_cooler_kw".into(),
                message: "must be >= 0".into(),
            });
        }
        if p.cop <= 0.0 {
            errors.push(ConfigError {
                field: "plant.cop".into(),
                message: "must be > 0".into(),
            });
        }

        let s = &self.storage;
        if s.heat_capacity_kwh_per_k <= 0.0 {
            errors.push(ConfigError {
                field: "storage.heat_capacity_kwh_per_k".into(),
                message: "must be > 0".into(),
            });
        }
        if s.initial_temp_c >= STORAGE_FULL_TEMP_C {
            errors.push(ConfigError {
                field: "storage.initial_temp_c".into(),
                message: format!("must be < {STORAGE_FULL_TEMP_C}"),
            });
        }
        if s.annual_loss_kwh.len() < HORIZON_YEARS {
            errors.push(ConfigError {
                field: "storage.annual_loss_kwh".into(),
                message: format!(
                    "must have at least {HORIZON_YEARS} entries, got {}",
                    s.annual_loss_kwh.len()
                ),
            });
        }
        if s.annual_loss_kwh.iter().any(|v| !v.is_finite() || *v < 0.0) {
            errors.push(ConfigError {
                field: "storage.annual_loss_kwh".into(),
                message: "entries must be finite and >= 0".into(),
            });
        }

        let pv = &self.pv;
        if !(pv.year1_yield > 0.0 && pv.year1_yield <= 1.0) {
            errors.push(ConfigError {
                field: "pv.year1_yield".into(),
                message: "must be in (0.0, 1.0]".into(),
            });
        }
        if !(pv.year25_yield > 0.0 && pv.year25_yield <= 1.0) {
            errors.push(ConfigError {
                field: "pv.year25_yield".into(),
                message: "must be in (0.0, 1.0]".into(),
            });
        }
        if pv.year25_yield > pv.year1_yield {
            errors.push(ConfigError {
                field: "pv.year25_yield".into(),
                message: "must be <= pv.year1_yield".into(),
            });
        }

        if self.tariffs.fixed_sale_rate < 0.0 {
            errors.push(ConfigError {
                field: "tariffs.fixed_sale_rate".into(),
                message: "must be >= 0".into(),
            });
        }

        if self.building.annual_heat_demand_kwh < 0.0 {
            errors.push(ConfigError {
                field: "building.annual_heat_demand_kwh".into(),
                message: "must be >= 0".into(),
            });
        }

        errors
    }
}
