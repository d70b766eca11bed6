pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::scenario::{Scenario, Step, VehicleSpec};
pub use core::runner::{ScenarioReport, ScenarioRunner, StepOutcome};
pub use domain::plate::NumberPlate;
pub use domain::vehicle::{Vehicle, DEFAULT_SPEED_STEP, SPEED_CEILING};
pub use utils::error::{AppError, RejectedValue, Result, VehicleError};
