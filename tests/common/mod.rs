//! Shared test fixtures for integration tests.

use btes_sim::config::{PlantConfig, SystemConfig};
use btes_sim::profile::SyntheticSeason;
use btes_sim::sim::types::HourlyReading;
use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Default system configuration (the first well field).
pub fn default_config() -> SystemConfig {
    SystemConfig::well_field_1()
}

/// Single-dry-cooler plant: aggregate rating 537.1 + 17.18 + 10.12 = 564.4 kW,
/// minimum 84.66 kW.
pub fn compact_plant_config() -> SystemConfig {
    let mut cfg = SystemConfig::well_field_1();
    cfg.plant = PlantConfig {
        heat_pump_kw: 537.1,
        circulation_pump_kw: 17.18,
        dry_cooler_kw: 10.12,
        dry_cooler_count: 1,
        cop: 3.7,
        dry_cooler_min_temp_c: 13.0,
    };
    cfg
}

/// First hour of the operating season.
pub fn season_start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 4, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("valid time")
}

/// A flat hourly series starting April 1 with identical readings.
pub fn flat_season(
    hours: usize,
    pv: f64,
    outdoor: f64,
    load: f64,
    price: f64,
) -> Vec<HourlyReading> {
    let start = season_start();
    (0..hours)
        .map(|i| HourlyReading {
            timestamp: start + Duration::hours(i as i64),
            pv_export_kwh: pv,
            outdoor_temp_c: outdoor,
            building_load_kwh: load,
            spot_price: price,
        })
        .collect()
}

/// The default synthetic season (seed 42).
pub fn default_season() -> Vec<HourlyReading> {
    SyntheticSeason::default().generate()
}
