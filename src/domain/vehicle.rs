use crate::domain::plate::NumberPlate;
use crate::utils::error::VehicleError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// System-wide ceiling for any maximum speed set through [`Vehicle::set_max_speed`].
pub const SPEED_CEILING: i32 = 360;

/// Step used by [`Vehicle::accelerate`] and [`Vehicle::decelerate`].
pub const DEFAULT_SPEED_STEP: i32 = 5;

/// A vehicle with a regulated speed.
///
/// Every setter validates before writing, so a failed call leaves the vehicle
/// exactly as it was.
///
/// Two checks are looser than `0 <= current_speed <= max_speed <= 360`:
/// construction accepts a negative starting speed and a maximum above the
/// ceiling, and [`Vehicle::set_max_speed`] does not compare against the
/// current speed. Both match the established behaviour of this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "VehicleRecord")]
pub struct Vehicle {
    number_plate: NumberPlate,
    current_speed: i32,
    max_speed: i32,
}

/// Unvalidated shape used to deserialize a [`Vehicle`].
#[derive(Debug, Deserialize)]
struct VehicleRecord {
    number_plate: String,
    current_speed: i32,
    #[serde(default = "default_max_speed")]
    max_speed: i32,
}

fn default_max_speed() -> i32 {
    SPEED_CEILING
}

impl TryFrom<VehicleRecord> for Vehicle {
    type Error = VehicleError;

    fn try_from(record: VehicleRecord) -> Result<Self, Self::Error> {
        Vehicle::with_max_speed(&record.number_plate, record.current_speed, record.max_speed)
    }
}

impl Vehicle {
    /// Creates a vehicle whose maximum speed is [`SPEED_CEILING`].
    pub fn new(plate: &str, current_speed: i32) -> Result<Self, VehicleError> {
        Self::with_max_speed(plate, current_speed, SPEED_CEILING)
    }

    pub fn with_max_speed(
        plate: &str,
        current_speed: i32,
        max_speed: i32,
    ) -> Result<Self, VehicleError> {
        let number_plate = NumberPlate::parse(plate)?;

        if current_speed > max_speed {
            return Err(VehicleError::SpeedExceedsLimit {
                value: current_speed,
                limit: max_speed,
            });
        }

        Ok(Self {
            number_plate,
            current_speed,
            max_speed,
        })
    }

    pub fn number_plate(&self) -> &str {
        self.number_plate.as_str()
    }

    pub fn plate(&self) -> &NumberPlate {
        &self.number_plate
    }

    pub fn set_number_plate(&mut self, plate: &str) -> Result<(), VehicleError> {
        self.number_plate = NumberPlate::parse(plate)?;
        Ok(())
    }

    pub fn max_speed(&self) -> i32 {
        self.max_speed
    }

    /// Fails above [`SPEED_CEILING`]. A maximum below the current speed is accepted.
    pub fn set_max_speed(&mut self, speed: i32) -> Result<(), VehicleError> {
        if speed > SPEED_CEILING {
            return Err(VehicleError::SpeedExceedsLimit {
                value: speed,
                limit: SPEED_CEILING,
            });
        }
        self.max_speed = speed;
        Ok(())
    }

    pub fn current_speed(&self) -> i32 {
        self.current_speed
    }

    pub fn set_current_speed(&mut self, speed: i32) -> Result<(), VehicleError> {
        if !(0..=self.max_speed).contains(&speed) {
            return Err(VehicleError::InvalidSpeed {
                value: speed,
                max_speed: self.max_speed,
            });
        }
        self.current_speed = speed;
        Ok(())
    }

    pub fn accelerate(&mut self) -> Result<(), VehicleError> {
        self.accelerate_by(DEFAULT_SPEED_STEP)
    }

    /// Only the upper bound is checked; a negative increment slows the vehicle down.
    pub fn accelerate_by(&mut self, increment: i32) -> Result<(), VehicleError> {
        let new_speed = self
            .current_speed
            .checked_add(increment)
            .ok_or_else(|| self.overflow_error(increment > 0))?;
        if new_speed > self.max_speed {
            return Err(VehicleError::SpeedExceedsLimit {
                value: new_speed,
                limit: self.max_speed,
            });
        }
        self.current_speed = new_speed;
        Ok(())
    }

    pub fn decelerate(&mut self) -> Result<(), VehicleError> {
        self.decelerate_by(DEFAULT_SPEED_STEP)
    }

    /// Only the lower bound is checked; a negative decrement speeds the vehicle up.
    pub fn decelerate_by(&mut self, decrement: i32) -> Result<(), VehicleError> {
        let new_speed = self
            .current_speed
            .checked_sub(decrement)
            .ok_or_else(|| self.overflow_error(decrement < 0))?;
        if new_speed < 0 {
            return Err(VehicleError::NegativeSpeed(new_speed));
        }
        self.current_speed = new_speed;
        Ok(())
    }

    // A step whose result does not fit in i32 is rejected with the bound it
    // crossed, reported at that bound.
    fn overflow_error(&self, upward: bool) -> VehicleError {
        if upward {
            VehicleError::SpeedExceedsLimit {
                value: i32::MAX,
                limit: self.max_speed,
            }
        } else {
            VehicleError::NegativeSpeed(i32::MIN)
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.current_speed == 0
    }

    /// How much faster the vehicle may go. Negative when the maximum was
    /// lowered below the current speed.
    pub fn speed_headroom(&self) -> i64 {
        i64::from(self.max_speed) - i64::from(self.current_speed)
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {}/{} km/h",
            self.number_plate, self.current_speed, self.max_speed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle() -> Vehicle {
        Vehicle::new("AB1234CD", 200).unwrap()
    }

    #[test]
    fn test_new_defaults_max_speed_to_ceiling() {
        let v = vehicle();
        assert_eq!(v.number_plate(), "AB1234CD");
        assert_eq!(v.current_speed(), 200);
        assert_eq!(v.max_speed(), 360);
    }

    #[test]
    fn test_construction_rejects_speed_above_max() {
        assert_eq!(
            Vehicle::with_max_speed("AB1234CD", 121, 120),
            Err(VehicleError::SpeedExceedsLimit { value: 121, limit: 120 })
        );
        assert!(Vehicle::with_max_speed("AB1234CD", 120, 120).is_ok());
    }

    #[test]
    fn test_construction_checks_plate_first() {
        assert_eq!(
            Vehicle::with_max_speed("bad", 500, 100),
            Err(VehicleError::InvalidIdentifier("bad".to_string()))
        );
    }

    #[test]
    fn test_construction_keeps_loose_checks() {
        let v = Vehicle::new("AB1234CD", -10).unwrap();
        assert_eq!(v.current_speed(), -10);

        let v = Vehicle::with_max_speed("AB1234CD", 100, 500).unwrap();
        assert_eq!(v.max_speed(), 500);
    }

    #[test]
    fn test_set_number_plate_failure_keeps_old_plate() {
        let mut v = vehicle();
        assert_eq!(
            v.set_number_plate("XYg678ZW"),
            Err(VehicleError::InvalidIdentifier("XYg678ZW".to_string()))
        );
        assert_eq!(v.number_plate(), "AB1234CD");

        v.set_number_plate("xy5678zw").unwrap();
        assert_eq!(v.number_plate(), "xy5678zw");
    }

    #[test]
    fn test_set_max_speed_ceiling() {
        let mut v = vehicle();
        assert_eq!(
            v.set_max_speed(380),
            Err(VehicleError::SpeedExceedsLimit { value: 380, limit: 360 })
        );
        assert_eq!(v.max_speed(), 360);

        v.set_max_speed(250).unwrap();
        assert_eq!(v.max_speed(), 250);
        v.set_max_speed(360).unwrap();
        assert_eq!(v.max_speed(), 360);
    }

    #[test]
    fn test_set_max_speed_below_current_is_accepted() {
        let mut v = vehicle();
        v.set_max_speed(100).unwrap();
        assert_eq!(v.current_speed(), 200);
        assert_eq!(v.speed_headroom(), -100);
    }

    #[test]
    fn test_set_current_speed_bounds() {
        let mut v = vehicle();
        v.set_current_speed(0).unwrap();
        assert!(v.is_stopped());
        v.set_current_speed(360).unwrap();
        assert_eq!(v.current_speed(), 360);

        assert_eq!(
            v.set_current_speed(-1),
            Err(VehicleError::InvalidSpeed { value: -1, max_speed: 360 })
        );
        assert_eq!(
            v.set_current_speed(361),
            Err(VehicleError::InvalidSpeed { value: 361, max_speed: 360 })
        );
        assert_eq!(v.current_speed(), 360);
    }

    #[test]
    fn test_set_current_speed_is_idempotent() {
        let mut once = vehicle();
        once.set_current_speed(90).unwrap();

        let mut twice = vehicle();
        twice.set_current_speed(90).unwrap();
        twice.set_current_speed(90).unwrap();

        assert_eq!(once, twice);
    }

    #[test]
    fn test_accelerate_default_step() {
        let mut v = vehicle();
        v.accelerate().unwrap();
        assert_eq!(v.current_speed(), 205);
    }

    #[test]
    fn test_accelerate_past_max_fails() {
        let mut v = vehicle();
        assert_eq!(
            v.accelerate_by(250),
            Err(VehicleError::SpeedExceedsLimit { value: 450, limit: 360 })
        );
        assert_eq!(v.current_speed(), 200);

        v.accelerate_by(160).unwrap();
        assert_eq!(v.current_speed(), 360);
    }

    #[test]
    fn test_accelerate_negative_increment_slows_down() {
        let mut v = vehicle();
        v.accelerate_by(-250).unwrap();
        assert_eq!(v.current_speed(), -50);
    }

    #[test]
    fn test_decelerate_default_step() {
        let mut v = vehicle();
        v.decelerate().unwrap();
        assert_eq!(v.current_speed(), 195);
    }

    #[test]
    fn test_decelerate_below_zero_fails() {
        let mut v = vehicle();
        assert_eq!(v.decelerate_by(500), Err(VehicleError::NegativeSpeed(-300)));
        assert_eq!(v.current_speed(), 200);

        v.decelerate_by(200).unwrap();
        assert!(v.is_stopped());
    }

    #[test]
    fn test_decelerate_negative_decrement_speeds_up() {
        let mut v = vehicle();
        v.decelerate_by(-1000).unwrap();
        assert_eq!(v.current_speed(), 1200);
    }

    #[test]
    fn test_overflowing_steps_fail_without_change() {
        let mut v = Vehicle::with_max_speed("AB1234CD", 10, i32::MAX).unwrap();
        assert_eq!(
            v.accelerate_by(i32::MAX),
            Err(VehicleError::SpeedExceedsLimit { value: i32::MAX, limit: i32::MAX })
        );
        assert_eq!(
            v.decelerate_by(i32::MIN),
            Err(VehicleError::SpeedExceedsLimit { value: i32::MAX, limit: i32::MAX })
        );
        assert_eq!(v.current_speed(), 10);

        let mut v = Vehicle::new("AB1234CD", -10).unwrap();
        assert_eq!(v.accelerate_by(i32::MIN), Err(VehicleError::NegativeSpeed(i32::MIN)));
        assert_eq!(v.decelerate_by(i32::MAX), Err(VehicleError::NegativeSpeed(i32::MIN)));
        assert_eq!(v.current_speed(), -10);
    }

    #[test]
    fn test_accelerate_up_to_largest_max_speed() {
        let mut v = Vehicle::with_max_speed("AB1234CD", 10, i32::MAX).unwrap();
        v.accelerate_by(i32::MAX - 10).unwrap();
        assert_eq!(v.current_speed(), i32::MAX);
        assert_eq!(v.speed_headroom(), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(vehicle().to_string(), "AB1234CD at 200/360 km/h");
    }

    #[test]
    fn test_deserialize_runs_construction_checks() {
        let v: Vehicle =
            serde_json::from_str(r#"{"number_plate":"AB1234CD","current_speed":50}"#).unwrap();
        assert_eq!(v.max_speed(), 360);

        let too_fast = r#"{"number_plate":"AB1234CD","current_speed":50,"max_speed":40}"#;
        assert!(serde_json::from_str::<Vehicle>(too_fast).is_err());

        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(
            json,
            r#"{"number_plate":"AB1234CD","current_speed":50,"max_speed":360}"#
        );
    }
}
