//! Simulation core: hourly dispatch, annual cycle, and the multi-year driver.

pub mod dispatch;
pub mod engine;
/// Horizon-level summary derived from the per-year results.
pub mod report;
pub mod revenue;
pub mod types;
pub mod year;

/// Number of consecutive years covered by one simulation run.
pub const HORIZON_YEARS: usize = 25;

/// Storage temperature ceiling (°C); charging latches off once reached.
pub const STORAGE_FULL_TEMP_C: f64 = 55.0;

/// Reserve temperature below which no heat is withdrawn (°C).
pub const WITHDRAWAL_FLOOR_C: f64 = 35.0;

/// First year index (0-based) in which end-of-year withdrawal is permitted.
/// The storage builds a thermal reserve during the first three years.
pub const WITHDRAWAL_START_YEAR: usize = 3;

/// Minimum aggregate plant power as a fraction of the maximum.
pub const MIN_POWER_FRACTION: f64 = 0.15;

/// First calendar month of the charging season (inclusive).
pub const SEASON_FIRST_MONTH: u32 = 4;

/// Last calendar month of the charging season (inclusive).
pub const SEASON_LAST_MONTH: u32 = 10;
