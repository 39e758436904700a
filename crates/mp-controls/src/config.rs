//! Controller configuration.
//!
//! Every field has a default, so a partial configuration file (or an empty
//! one) describes a working three-gear burner controller.

use crate::error::{ControlError, ControlResult};
use mp_core::{Limits, Real};
use serde::{Deserialize, Serialize};

/// PID gain coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Gains {
    /// Proportional gain.
    pub kp: Real,
    /// Integral gain.
    pub ki: Real,
    /// Derivative gain.
    pub kd: Real,
}

impl Gains {
    pub const fn new(kp: Real, ki: Real, kd: Real) -> Self {
        Self { kp, ki, kd }
    }
}

impl Default for Gains {
    fn default() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }
}

/// Dead-band around zero output inside which no actuator change is issued.
///
/// `lower <= upper` is expected but not enforced here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub lower: Real,
    pub upper: Real,
}

impl Thresholds {
    pub const fn new(lower: Real, upper: Real) -> Self {
        Self { lower, upper }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::new(-10.0, 10.0)
    }
}

/// Allowed throttle angle range for one gear.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleRange {
    pub min: Real,
    pub max: Real,
}

impl AngleRange {
    pub const fn new(min: Real, max: Real) -> Self {
        Self { min, max }
    }
}

/// Per-gear angle ranges, addressed by 1-based gear number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThrottleLimits(Vec<AngleRange>);

impl ThrottleLimits {
    pub fn new(ranges: Vec<AngleRange>) -> Self {
        Self(ranges)
    }

    /// Number of gears.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `gear` addresses an entry of the table.
    pub fn contains_gear(&self, gear: usize) -> bool {
        (1..=self.len()).contains(&gear)
    }

    /// Angle range of `gear` (1-based).
    pub fn range(&self, gear: usize) -> ControlResult<AngleRange> {
        gear.checked_sub(1)
            .and_then(|idx| self.0.get(idx))
            .copied()
            .ok_or(ControlError::IndexOob {
                what: "gear",
                index: gear,
                len: self.len(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = &AngleRange> {
        self.0.iter()
    }
}

impl Default for ThrottleLimits {
    fn default() -> Self {
        Self(vec![
            AngleRange::new(30.0, 60.0),
            AngleRange::new(40.0, 65.0),
            AngleRange::new(50.0, 70.0),
        ])
    }
}

impl From<Vec<AngleRange>> for ThrottleLimits {
    fn from(ranges: Vec<AngleRange>) -> Self {
        Self(ranges)
    }
}

/// Full construction-time configuration of a [`crate::Controller`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    #[serde(flatten)]
    pub gains: Gains,
    /// Target pressure.
    pub set_point: Real,
    pub thresholds: Thresholds,
    pub throttle_limits: ThrottleLimits,
    pub output_limits: Limits,
    /// Start in auto mode (`true`) or manual pass-through (`false`).
    pub auto_mode: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            gains: Gains::default(),
            set_point: 0.5,
            thresholds: Thresholds::default(),
            throttle_limits: ThrottleLimits::default(),
            output_limits: Limits::unbounded(),
            auto_mode: true,
        }
    }
}

impl ControllerConfig {
    pub fn with_gains(mut self, kp: Real, ki: Real, kd: Real) -> Self {
        self.gains = Gains::new(kp, ki, kd);
        self
    }

    pub fn with_set_point(mut self, set_point: Real) -> Self {
        self.set_point = set_point;
        self
    }

    pub fn with_thresholds(mut self, lower: Real, upper: Real) -> Self {
        self.thresholds = Thresholds::new(lower, upper);
        self
    }

    pub fn with_throttle_limits(mut self, ranges: Vec<AngleRange>) -> Self {
        self.throttle_limits = ThrottleLimits::new(ranges);
        self
    }

    pub fn with_output_limits(mut self, limits: Limits) -> Self {
        self.output_limits = limits;
        self
    }

    pub fn with_auto_mode(mut self, auto_mode: bool) -> Self {
        self.auto_mode = auto_mode;
        self
    }
}
