pub mod scenario;

#[cfg(feature = "cli")]
use crate::config::scenario::{Scenario, VehicleSpec};
#[cfg(feature = "cli")]
use crate::domain::vehicle::SPEED_CEILING;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_non_empty_string, validate_path, Validate};
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "speed-governor")]
#[command(about = "Drive a speed-regulated vehicle through a scripted scenario")]
pub struct CliConfig {
    /// TOML scenario to run instead of the built-in demo
    #[arg(long)]
    pub scenario: Option<String>,

    /// Override the starting number plate
    #[arg(long)]
    pub plate: Option<String>,

    /// Override the starting speed
    #[arg(long, allow_hyphen_values = true)]
    pub speed: Option<i32>,

    /// Override the starting maximum speed
    #[arg(long, allow_hyphen_values = true)]
    pub max_speed: Option<i32>,

    /// Keep applying steps after one is rejected
    #[arg(long)]
    pub keep_going: bool,

    /// Print the final vehicle as JSON on stdout
    #[arg(long)]
    pub json: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Loads the scenario file (or the built-in demo) and applies the
    /// starting-vehicle overrides.
    pub fn load_scenario(&self) -> Result<Scenario> {
        let mut scenario = match &self.scenario {
            Some(path) => Scenario::from_file(path)?,
            None => Scenario::builtin_demo(),
        };

        let VehicleSpec {
            plate,
            current_speed,
            max_speed,
        } = &mut scenario.vehicle;
        if let Some(p) = &self.plate {
            *plate = p.clone();
        }
        if let Some(s) = self.speed {
            *current_speed = s;
        }
        if let Some(m) = self.max_speed {
            *max_speed = m;
        }

        Ok(scenario)
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.scenario {
            validate_path("scenario", path)?;
        }
        if let Some(plate) = &self.plate {
            validate_non_empty_string("plate", plate)?;
        }
        if let Some(max_speed) = self.max_speed {
            if max_speed > SPEED_CEILING {
                tracing::warn!(
                    "--max-speed {} is above the ceiling of {}; the vehicle will accept it at construction",
                    max_speed,
                    SPEED_CEILING
                );
            }
        }
        Ok(())
    }
}
