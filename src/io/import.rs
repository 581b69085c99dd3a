//! CSV ingestion of hourly readings: parsing, season filtering, continuity.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{Datelike, NaiveDateTime, TimeDelta};
use serde::Deserialize;
use thiserror::Error;

use crate::sim::types::HourlyReading;
use crate::sim::{SEASON_FIRST_MONTH, SEASON_LAST_MONTH};

/// Expected column header for the readings CSV.
pub const READINGS_HEADER: &str =
    "timestamp,pv_export_kwh,outdoor_temp_c,building_load_kwh,spot_price";

/// Accepted timestamp layouts, tried in order.
const TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

/// Errors surfaced while reading the hourly series, before any simulation.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("cannot read readings: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: unrecognized timestamp {value:?}")]
    Timestamp { row: usize, value: String },
    #[error("readings out of order at {timestamp}")]
    OutOfOrder { timestamp: NaiveDateTime },
    #[error("gap in readings after {after} (expected one observation per hour)")]
    Gap { after: NaiveDateTime },
}

#[derive(Debug, Deserialize)]
struct RawReading {
    timestamp: String,
    pv_export_kwh: f64,
    outdoor_temp_c: f64,
    building_load_kwh: f64,
    spot_price: f64,
}

fn parse_timestamp(row: usize, value: &str) -> Result<NaiveDateTime, ImportError> {
    for format in TIMESTAMP_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(ts);
        }
    }
    Err(ImportError::Timestamp {
        row,
        value: value.to_string(),
    })
}

/// Returns `true` when the hour falls inside the April–October season.
pub fn is_in_season(timestamp: &NaiveDateTime) -> bool {
    (SEASON_FIRST_MONTH..=SEASON_LAST_MONTH).contains(&timestamp.month())
}

/// Keeps only the hours inside the charging season.
pub fn season_only(readings: Vec<HourlyReading>) -> Vec<HourlyReading> {
    readings
        .into_iter()
        .filter(|r| is_in_season(&r.timestamp))
        .collect()
}

/// Rejects out-of-order or gapped series.
///
/// The dispatch fold assumes exactly one observation per hour, ascending; a
/// gap would silently shift load, so it is refused here instead.
pub fn check_continuity(readings: &[HourlyReading]) -> Result<(), ImportError> {
    for pair in readings.windows(2) {
        let delta = pair[1].timestamp - pair[0].timestamp;
        if delta <= TimeDelta::zero() {
            return Err(ImportError::OutOfOrder {
                timestamp: pair[1].timestamp,
            });
        }
        if delta != TimeDelta::hours(1) {
            return Err(ImportError::Gap {
                after: pair[0].timestamp,
            });
        }
    }
    Ok(())
}

/// Parses readings from any CSV reader, header included.
///
/// # Errors
///
/// Returns an `ImportError` on I/O failure, CSV shape problems, or an
/// unrecognized timestamp.
pub fn readings_from_reader(reader: impl Read) -> Result<Vec<HourlyReading>, ImportError> {
    let mut rdr = csv::ReaderBuilder::new().from_reader(reader);
    let mut readings = Vec::new();
    for (index, record) in rdr.deserialize::<RawReading>().enumerate() {
        let raw = record?;
        // Rows are 1-based and the header occupies the first line.
        let row = index + 2;
        readings.push(HourlyReading {
            timestamp: parse_timestamp(row, &raw.timestamp)?,
            pv_export_kwh: raw.pv_export_kwh,
            outdoor_temp_c: raw.outdoor_temp_c,
            building_load_kwh: raw.building_load_kwh,
            spot_price: raw.spot_price,
        });
    }
    Ok(readings)
}

/// Reads a readings file, filters it to the operating season, and checks
/// hourly continuity.
///
/// # Errors
///
/// Returns an `ImportError` if the file cannot be read or the filtered
/// series is not a clean hourly sequence.
pub fn read_readings(path: &Path) -> Result<Vec<HourlyReading>, ImportError> {
    let file = File::open(path)?;
    let readings = season_only(readings_from_reader(file)?);
    check_continuity(&readings)?;
    Ok(readings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn make_reading(timestamp: NaiveDateTime) -> HourlyReading {
        HourlyReading {
            timestamp,
            pv_export_kwh: 100.0,
            outdoor_temp_c: 15.0,
            building_load_kwh: 50.0,
            spot_price: 0.8,
        }
    }

    fn hour(y: i32, mo: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .and_then(|date| date.and_hms_opt(h, 0, 0))
            .expect("valid time")
    }

    #[test]
    fn parses_a_clean_csv() {
        let csv = "timestamp,pv_export_kwh,outdoor_temp_c,building_load_kwh,spot_price\n\
                   2024-06-01T00:00:00,0.0,11.5,42.0,0.55\n\
                   2024-06-01T01:00:00,0.0,11.1,40.5,0.52\n";
        let readings = readings_from_reader(csv.as_bytes()).expect("clean csv");
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0].timestamp, hour(2024, 6, 1, 0));
        assert_eq!(readings[1].outdoor_temp_c, 11.1);
    }

    #[test]
    fn accepts_space_separated_timestamps() {
        let csv = "timestamp,pv_export_kwh,outdoor_temp_c,building_load_kwh,spot_price\n\
                   2024-06-01 13:00:00,120.0,18.0,40.0,0.9\n\
                   2024-06-01 14:00,130.0,18.5,41.0,0.92\n";
        let readings = readings_from_reader(csv.as_bytes()).expect("clean csv");
        assert_eq!(readings[0].timestamp, hour(2024, 6, 1, 13));
        assert_eq!(readings[1].timestamp, hour(2024, 6, 1, 14));
    }

    #[test]
    fn bad_timestamp_names_the_row() {
        let csv = "timestamp,pv_export_kwh,outdoor_temp_c,building_load_kwh,spot_price\n\
                   2024-06-01T00:00:00,0.0,11.5,42.0,0.55\n\
                   yesterday,0.0,11.1,40.5,0.52\n";
        let err = readings_from_reader(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("row 3"));
    }

    #[test]
    fn non_numeric_field_is_a_csv_error() {
        let csv = "timestamp,pv_export_kwh,outdoor_temp_c,building_load_kwh,spot_price\n\
                   2024-06-01T00:00:00,lots,11.5,42.0,0.55\n";
        assert!(matches!(
            readings_from_reader(csv.as_bytes()),
            Err(ImportError::Csv(_))
        ));
    }

    #[test]
    fn season_filter_drops_winter_months() {
        let readings = vec![
            make_reading(hour(2024, 3, 31, 23)),
            make_reading(hour(2024, 4, 1, 0)),
            make_reading(hour(2024, 10, 31, 23)),
            make_reading(hour(2024, 11, 1, 0)),
        ];
        let filtered = season_only(readings);
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].timestamp, hour(2024, 4, 1, 0));
        assert_eq!(filtered[1].timestamp, hour(2024, 10, 31, 23));
    }

    #[test]
    fn continuity_accepts_an_hourly_sequence() {
        let start = hour(2024, 5, 1, 0);
        let readings: Vec<HourlyReading> = (0..48)
            .map(|i| make_reading(start + Duration::hours(i)))
            .collect();
        assert!(check_continuity(&readings).is_ok());
    }

    #[test]
    fn continuity_rejects_a_gap() {
        let readings = vec![
            make_reading(hour(2024, 5, 1, 0)),
            make_reading(hour(2024, 5, 1, 1)),
            make_reading(hour(2024, 5, 1, 3)),
        ];
        assert!(matches!(
            check_continuity(&readings),
            Err(ImportError::Gap { .. })
        ));
    }

    #[test]
    fn continuity_rejects_disorder() {
        let readings = vec![
            make_reading(hour(2024, 5, 1, 1)),
            make_reading(hour(2024, 5, 1, 0)),
        ];
        assert!(matches!(
            check_continuity(&readings),
            Err(ImportError::OutOfOrder { .. })
        ));
    }
}
