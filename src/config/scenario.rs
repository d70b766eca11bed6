use crate::domain::vehicle::{DEFAULT_SPEED_STEP, SPEED_CEILING};
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, Validate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// A scripted run: one starting vehicle and the operations to apply to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default = "default_name")]
    pub name: String,
    pub vehicle: VehicleSpec,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// Starting vehicle, checked by the constructor when the scenario runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleSpec {
    pub plate: String,
    pub current_speed: i32,
    #[serde(default = "default_max_speed")]
    pub max_speed: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    SetNumberPlate {
        plate: String,
    },
    SetMaxSpeed {
        speed: i32,
    },
    SetCurrentSpeed {
        speed: i32,
    },
    Accelerate {
        #[serde(default = "default_step")]
        by: i32,
    },
    Decelerate {
        #[serde(default = "default_step")]
        by: i32,
    },
}

fn default_name() -> String {
    "scenario".to_string()
}

fn default_max_speed() -> i32 {
    SPEED_CEILING
}

fn default_step() -> i32 {
    DEFAULT_SPEED_STEP
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::SetNumberPlate { plate } => write!(f, "set_number_plate({})", plate),
            Step::SetMaxSpeed { speed } => write!(f, "set_max_speed({})", speed),
            Step::SetCurrentSpeed { speed } => write!(f, "set_current_speed({})", speed),
            Step::Accelerate { by } => write!(f, "accelerate({})", by),
            Step::Decelerate { by } => write!(f, "decelerate({})", by),
        }
    }
}

impl Scenario {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_str(&content)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        let scenario: Scenario = toml::from_str(content)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Raise the maximum above the ceiling, then brake harder than the
    /// current speed allows. Both steps are expected to fail.
    pub fn builtin_demo() -> Self {
        Self {
            name: "demo".to_string(),
            vehicle: VehicleSpec {
                plate: "AB1234CD".to_string(),
                current_speed: 200,
                max_speed: SPEED_CEILING,
            },
            steps: vec![
                Step::SetMaxSpeed { speed: 380 },
                Step::Decelerate { by: 500 },
            ],
        }
    }
}

impl Validate for Scenario {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("name", &self.name)?;
        validate_non_empty_string("vehicle.plate", &self.vehicle.plate)?;
        for (index, step) in self.steps.iter().enumerate() {
            if let Step::SetNumberPlate { plate } = step {
                validate_non_empty_string(&format!("steps[{}].plate", index), plate)?;
            }
        }
        Ok(())
    }
}
