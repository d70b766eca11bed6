use crate::utils::error::VehicleError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

// Two letters, four digits, two letters. ASCII classes only, any letter case.
const PLATE_PATTERN: &str = r"^[[:alpha:]]{2}[[:digit:]]{4}[[:alpha:]]{2}$";

fn plate_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(PLATE_PATTERN).expect("plate pattern compiles"))
}

/// A number plate in `LLDDDDLL` form, e.g. `AB1234CD`.
///
/// The text is stored exactly as given, so `as_str` returns the input
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NumberPlate(String);

impl NumberPlate {
    pub fn parse(plate: &str) -> Result<Self, VehicleError> {
        if plate_regex().is_match(plate) {
            Ok(Self(plate.to_string()))
        } else {
            Err(VehicleError::InvalidIdentifier(plate.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for NumberPlate {
    type Err = VehicleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for NumberPlate {
    type Error = VehicleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if plate_regex().is_match(&value) {
            Ok(Self(value))
        } else {
            Err(VehicleError::InvalidIdentifier(value))
        }
    }
}

impl TryFrom<&str> for NumberPlate {
    type Error = VehicleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<NumberPlate> for String {
    fn from(plate: NumberPlate) -> Self {
        plate.0
    }
}

impl AsRef<str> for NumberPlate {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NumberPlate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
