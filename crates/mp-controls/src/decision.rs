//! Gear/angle decision policy.
//!
//! Maps a clamped controller output onto the next actuator command:
//!
//! | output                 | angle has room        | angle would leave range |
//! |------------------------|-----------------------|-------------------------|
//! | `> upper` (more heat)  | angle − [`ANGLE_STEP`] | gear + 1, angle held    |
//! | `< lower` (less heat)  | angle + [`ANGLE_STEP`] | gear − 1, angle held    |
//! | otherwise              | hold                  | hold                    |
//!
//! The resulting gear is not clamped to the throttle table. Stepping up from
//! the last gear or down from gear 1 yields a gear the caller must handle.

use crate::config::{AngleRange, Thresholds};
use mp_core::Real;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Angle change applied per decision within a gear.
pub const ANGLE_STEP: Real = 5.0;

/// Actuator state: discrete burner gear (1-based) and continuous throttle angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActuatorCommand {
    pub gear: usize,
    pub angle: Real,
}

impl ActuatorCommand {
    pub const fn new(gear: usize, angle: Real) -> Self {
        Self { gear, angle }
    }
}

/// Which branch of the decision policy produced a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Output inside the dead-band.
    Hold,
    /// Angle lowered by one step within the gear.
    DecreaseAngle,
    /// Angle raised by one step within the gear.
    IncreaseAngle,
    /// Next gear, angle unchanged.
    GearUp,
    /// Previous gear, angle unchanged.
    GearDown,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::Hold => "hold",
            Action::DecreaseAngle => "decrease_angle",
            Action::IncreaseAngle => "increase_angle",
            Action::GearUp => "gear_up",
            Action::GearDown => "gear_down",
        };
        f.write_str(s)
    }
}

/// Decide the next command from `output`, the dead-band and the current gear's angle range.
pub fn decide(
    output: Real,
    thresholds: Thresholds,
    range: AngleRange,
    current: ActuatorCommand,
) -> (Action, ActuatorCommand) {
    let ActuatorCommand { gear, angle } = current;

    if output > thresholds.upper {
        if angle - ANGLE_STEP < range.min {
            (Action::GearUp, ActuatorCommand::new(gear.saturating_add(1), angle))
        } else {
            (
                Action::DecreaseAngle,
                ActuatorCommand::new(gear, angle - ANGLE_STEP),
            )
        }
    } else if output < thresholds.lower {
        if angle + ANGLE_STEP > range.max {
            (Action::GearDown, ActuatorCommand::new(gear.saturating_sub(1), angle))
        } else {
            (
                Action::IncreaseAngle,
                ActuatorCommand::new(gear, angle + ANGLE_STEP),
            )
        }
    } else {
        (Action::Hold, current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BAND: Thresholds = Thresholds::new(-10.0, 10.0);
    const GEAR1: AngleRange = AngleRange::new(30.0, 60.0);

    #[test]
    fn high_output_with_room_decreases_angle() {
        let (action, cmd) = decide(16.0, BAND, GEAR1, ActuatorCommand::new(1, 40.0));
        assert_eq!(action, Action::DecreaseAngle);
        assert_eq!(cmd, ActuatorCommand::new(1, 35.0));
    }

    #[test]
    fn high_output_at_min_angle_steps_gear_up() {
        let (action, cmd) = decide(16.0, BAND, GEAR1, ActuatorCommand::new(1, 28.0));
        assert_eq!(action, Action::GearUp);
        assert_eq!(cmd, ActuatorCommand::new(2, 28.0));
    }

    #[test]
    fn landing_exactly_on_min_angle_stays_in_gear() {
        // 35 - 5 = 30 is not below 30
        let (action, cmd) = decide(11.0, BAND, GEAR1, ActuatorCommand::new(1, 35.0));
        assert_eq!(action, Action::DecreaseAngle);
        assert_eq!(cmd.angle, 30.0);
    }

    #[test]
    fn low_output_with_room_increases_angle() {
        let (action, cmd) = decide(-12.0, BAND, GEAR1, ActuatorCommand::new(2, 50.0));
        assert_eq!(action, Action::IncreaseAngle);
        assert_eq!(cmd, ActuatorCommand::new(2, 55.0));
    }

    #[test]
    fn low_output_at_max_angle_steps_gear_down() {
        let (action, cmd) = decide(-12.0, BAND, GEAR1, ActuatorCommand::new(2, 58.0));
        assert_eq!(action, Action::GearDown);
        assert_eq!(cmd, ActuatorCommand::new(1, 58.0));
    }

    #[test]
    fn gear_down_from_first_gear_is_not_clamped_up() {
        let (action, cmd) = decide(-50.0, BAND, GEAR1, ActuatorCommand::new(1, 59.0));
        assert_eq!(action, Action::GearDown);
        assert_eq!(cmd.gear, 0);
    }

    #[test]
    fn thresholds_themselves_are_inside_the_dead_band() {
        for output in [-10.0, 0.0, 10.0] {
            let current = ActuatorCommand::new(3, 45.0);
            assert_eq!(decide(output, BAND, GEAR1, current), (Action::Hold, current));
        }
    }

    #[test]
    fn action_display_names() {
        assert_eq!(Action::GearUp.to_string(), "gear_up");
        assert_eq!(Action::Hold.to_string(), "hold");
    }
}
