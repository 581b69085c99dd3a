//! Runtime error taxonomy for the simulation core.

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that abort a simulation run.
///
/// Every year depends on the previous year's ending storage state, so the
/// first error propagates out and no later year is computed.
#[derive(Debug, Error)]
pub enum SimError {
    /// The configuration failed validation before the simulation started.
    #[error("invalid configuration: {}", join_errors(.0))]
    InvalidConfig(Vec<ConfigError>),
    /// An hourly reading carried a non-finite or negative-energy value.
    ///
    /// Substituting zero would silently corrupt the temperature
    /// carry-forward, so the year (and the run) is aborted instead.
    #[error("malformed reading at {timestamp}: {field} = {value}")]
    MalformedReading {
        timestamp: NaiveDateTime,
        field: &'static str,
        value: f64,
    },
}

fn join_errors(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_lists_every_error() {
        let err = SimError::InvalidConfig(vec![
            ConfigError {
                field: "plant.cop".into(),
                message: "must be > 0".into(),
            },
            ConfigError {
                field: "storage.annual_loss_kwh".into(),
                message: "must have at least 25 entries, got 3".into(),
            },
        ]);
        let text = err.to_string();
        assert!(text.contains("plant.cop"));
        assert!(text.contains("annual_loss_kwh"));
    }

    #[test]
    fn malformed_reading_names_the_field() {
        let timestamp = chrono::NaiveDate::from_ymd_opt(2024, 6, 1)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .expect("valid time");
        let err = SimError::MalformedReading {
            timestamp,
            field: "pv_export_kwh",
            value: f64::NAN,
        };
        assert!(err.to_string().contains("pv_export_kwh"));
    }
}
