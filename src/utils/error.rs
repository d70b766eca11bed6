use std::fmt;
use thiserror::Error;

/// Rule violations reported by [`crate::Vehicle`]. Each variant carries the
/// rejected value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VehicleError {
    #[error("Invalid number plate format")]
    InvalidIdentifier(String),

    #[error("Speed cannot be greater than {limit}")]
    SpeedExceedsLimit { value: i32, limit: i32 },

    #[error("Speed cannot be negative")]
    NegativeSpeed(i32),

    #[error("Invalid speed, expected a value between 0 and {max_speed}")]
    InvalidSpeed { value: i32, max_speed: i32 },
}

/// The offending value behind a [`VehicleError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectedValue<'a> {
    Text(&'a str),
    Speed(i32),
}

impl fmt::Display for RejectedValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectedValue::Text(text) => f.write_str(text),
            RejectedValue::Speed(speed) => write!(f, "{}", speed),
        }
    }
}

impl VehicleError {
    pub fn value(&self) -> RejectedValue<'_> {
        match self {
            VehicleError::InvalidIdentifier(plate) => RejectedValue::Text(plate),
            VehicleError::SpeedExceedsLimit { value, .. }
            | VehicleError::InvalidSpeed { value, .. } => RejectedValue::Speed(*value),
            VehicleError::NegativeSpeed(value) => RejectedValue::Speed(*value),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Vehicle(#[from] VehicleError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Scenario parsing error: {0}")]
    ScenarioParseError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl AppError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            AppError::Vehicle(e) => format!("{} (value: {})", e, e.value()),
            AppError::IoError(e) => format!("Could not read or write a file: {}", e),
            AppError::ScenarioParseError(e) => format!("The scenario file is not valid TOML: {}", e),
            AppError::SerializationError(e) => format!("Could not render the vehicle state: {}", e),
            AppError::InvalidConfigValueError { field, reason, .. } => {
                format!("Option '{}' is invalid: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AppError::Vehicle(VehicleError::InvalidIdentifier(_)) => {
                "Use a plate of two letters, four digits and two letters, e.g. AB1234CD"
            }
            AppError::Vehicle(VehicleError::SpeedExceedsLimit { .. }) => {
                "Lower the requested speed or raise the maximum speed (at most 360)"
            }
            AppError::Vehicle(VehicleError::NegativeSpeed(_)) => {
                "Decelerate by no more than the current speed"
            }
            AppError::Vehicle(VehicleError::InvalidSpeed { .. }) => {
                "Pick a speed between 0 and the vehicle's maximum speed"
            }
            AppError::IoError(_) => "Check that the scenario path exists and is readable",
            AppError::ScenarioParseError(_) => "Fix the TOML syntax reported above",
            AppError::SerializationError(_) => "Run again without --json",
            AppError::InvalidConfigValueError { .. } => "Run with --help to see accepted options",
        }
    }

    /// Rule violations exit with 2, everything else with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Vehicle(_) => 2,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_value_is_carried() {
        let err = VehicleError::InvalidIdentifier("XYg678ZW".to_string());
        assert_eq!(err.value(), RejectedValue::Text("XYg678ZW"));

        let err = VehicleError::SpeedExceedsLimit { value: 380, limit: 360 };
        assert_eq!(err.value(), RejectedValue::Speed(380));
        assert_eq!(err.to_string(), "Speed cannot be greater than 360");

        let err = VehicleError::NegativeSpeed(-300);
        assert_eq!(err.value().to_string(), "-300");
    }

    #[test]
    fn test_exit_codes() {
        let rule: AppError = VehicleError::NegativeSpeed(-1).into();
        assert_eq!(rule.exit_code(), 2);

        let config = AppError::InvalidConfigValueError {
            field: "plate".to_string(),
            value: String::new(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        };
        assert_eq!(config.exit_code(), 1);
    }

    #[test]
    fn test_user_friendly_message_includes_value() {
        let err: AppError = VehicleError::InvalidSpeed { value: 400, max_speed: 360 }.into();
        assert_eq!(
            err.user_friendly_message(),
            "Invalid speed, expected a value between 0 and 360 (value: 400)"
        );
    }
}
