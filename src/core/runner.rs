use crate::config::scenario::{Scenario, Step};
use crate::domain::vehicle::Vehicle;
use crate::utils::error::VehicleError;

#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    pub step: Step,
    pub result: Result<(), VehicleError>,
}

impl StepOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioReport {
    pub vehicle: Vehicle,
    pub outcomes: Vec<StepOutcome>,
}

impl ScenarioReport {
    pub fn failures(&self) -> impl Iterator<Item = &StepOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.is_ok())
    }

    pub fn first_error(&self) -> Option<&VehicleError> {
        self.outcomes.iter().find_map(|outcome| outcome.result.as_ref().err())
    }

    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(StepOutcome::is_ok)
    }
}

/// Applies a [`Scenario`] to a freshly built [`Vehicle`].
pub struct ScenarioRunner {
    keep_going: bool,
}

impl ScenarioRunner {
    /// Stops at the first failing step.
    pub fn new() -> Self {
        Self { keep_going: false }
    }

    pub fn keep_going(mut self, keep_going: bool) -> Self {
        self.keep_going = keep_going;
        self
    }

    /// Fails only when the starting vehicle cannot be built. Step failures
    /// are recorded in the report.
    pub fn run(&self, scenario: &Scenario) -> Result<ScenarioReport, VehicleError> {
        let spec = &scenario.vehicle;
        let mut vehicle = Vehicle::with_max_speed(&spec.plate, spec.current_speed, spec.max_speed)?;
        tracing::info!("🚗 {}: created {}", scenario.name, vehicle);

        let mut outcomes = Vec::with_capacity(scenario.steps.len());
        for (index, step) in scenario.steps.iter().enumerate() {
            let result = apply_step(&mut vehicle, step);

            match &result {
                Ok(()) => tracing::debug!(
                    "{}: step {}/{} {} -> {}",
                    scenario.name,
                    index + 1,
                    scenario.steps.len(),
                    step,
                    vehicle
                ),
                Err(e) => tracing::warn!(
                    "{}: step {}/{} {} rejected: {} (value: {})",
                    scenario.name,
                    index + 1,
                    scenario.steps.len(),
                    step,
                    e,
                    e.value()
                ),
            }

            let failed = result.is_err();
            outcomes.push(StepOutcome {
                step: step.clone(),
                result,
            });

            if failed && !self.keep_going {
                tracing::info!("{}: stopping after first rejected step", scenario.name);
                break;
            }
        }

        Ok(ScenarioReport { vehicle, outcomes })
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}

pub fn apply_step(vehicle: &mut Vehicle, step: &Step) -> Result<(), VehicleError> {
    match step {
        Step::SetNumberPlate { plate } => vehicle.set_number_plate(plate),
        Step::SetMaxSpeed { speed } => vehicle.set_max_speed(*speed),
        Step::SetCurrentSpeed { speed } => vehicle.set_current_speed(*speed),
        Step::Accelerate { by } => vehicle.accelerate_by(*by),
        Step::Decelerate { by } => vehicle.decelerate_by(*by),
    }
}
