//! Burner pressure controller.
//!
//! A windowed PID loop on boiler pressure whose output drives a gear/angle
//! decision (see [`crate::decision`]). Elapsed time comes from an injected
//! [`Clock`], read once per [`Controller::step`].
//!
//! Anti-windup works by clamping the integral accumulator to the same
//! output limits as the final output. The derivative acts on the measurement
//! rather than the error, so a set point change does not kick the output.

use crate::config::{ControllerConfig, Gains, Thresholds, ThrottleLimits};
use crate::decision::{Action, ActuatorCommand, decide};
use crate::error::{ControlError, ControlResult};
use mp_core::{Clock, Limits, MonotonicClock, Real, ensure_finite};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Substitute for a zero elapsed time between two steps.
pub const DT_EPSILON: Real = 1e-3;

/// P, I and D contributions from the most recent step.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PidTerms {
    pub proportional: Real,
    pub integral: Real,
    pub derivative: Real,
}

impl PidTerms {
    /// Sum of the three terms, before output clamping.
    pub fn sum(&self) -> Real {
        self.proportional + self.integral + self.derivative
    }
}

/// Pressure controller commanding a burner gear and throttle angle.
///
/// Not synchronized: one instance per actuator, stepped from one control loop.
#[derive(Debug, Clone)]
pub struct Controller<C: Clock = MonotonicClock> {
    gains: Gains,
    set_point: Real,
    thresholds: Thresholds,
    throttle_limits: ThrottleLimits,
    output_limits: Limits,
    auto_mode: bool,

    terms: PidTerms,
    last_time: Real,
    last_pressure: Option<Real>,
    last_output: Option<Real>,
    last_action: Option<Action>,

    clock: C,
}

impl Controller<MonotonicClock> {
    /// Create a controller timed by the process monotonic clock.
    pub fn new(config: ControllerConfig) -> ControlResult<Self> {
        Self::with_clock(config, MonotonicClock::new())
    }
}

impl<C: Clock> Controller<C> {
    /// Create a controller timed by `clock`.
    ///
    /// # Errors
    ///
    /// Returns error if the throttle table is empty or the output limits are inverted.
    pub fn with_clock(config: ControllerConfig, clock: C) -> ControlResult<Self> {
        if config.throttle_limits.is_empty() {
            return Err(ControlError::InvalidArg {
                what: "throttle_limits must define at least one gear",
            });
        }
        config.output_limits.validate()?;

        let last_time = clock.now();
        Ok(Self {
            gains: config.gains,
            set_point: config.set_point,
            thresholds: config.thresholds,
            throttle_limits: config.throttle_limits,
            output_limits: config.output_limits,
            auto_mode: config.auto_mode,
            terms: PidTerms::default(),
            last_time,
            last_pressure: None,
            last_output: None,
            last_action: None,
            clock,
        })
    }

    /// Run one control update.
    ///
    /// In manual mode `current` is returned as-is and nothing is updated.
    /// Otherwise the PID terms are recomputed from `pressure` and the clamped
    /// output is mapped onto the next gear/angle.
    ///
    /// # Errors
    ///
    /// `IndexOob` if `current.gear` is outside the throttle table, `Core` if
    /// `pressure` or `current.angle` is not finite. State is untouched on error.
    pub fn step(&mut self, pressure: Real, current: ActuatorCommand) -> ControlResult<ActuatorCommand> {
        if !self.auto_mode {
            return Ok(current);
        }

        let range = self.throttle_limits.range(current.gear)?;
        ensure_finite(pressure, "pressure")?;
        ensure_finite(current.angle, "angle")?;

        let now = self.clock.now();
        let elapsed = now - self.last_time;
        let dt = if elapsed == 0.0 { DT_EPSILON } else { elapsed };

        let error = self.set_point - pressure;
        let d_input = pressure - self.last_pressure.unwrap_or(pressure);

        let proportional = self.gains.kp * error;
        let integral = self
            .output_limits
            .clamp(self.terms.integral + self.gains.ki * error * dt);
        let derivative = -self.gains.kd * d_input / dt;

        let terms = PidTerms {
            proportional,
            integral,
            derivative,
        };
        let output = self.output_limits.clamp(terms.sum());

        self.terms = terms;
        self.last_pressure = Some(pressure);
        self.last_time = now;

        let (action, next) = decide(output, self.thresholds, range, current);
        self.last_output = Some(output);
        self.last_action = Some(action);

        debug!(
            pressure,
            dt,
            p = proportional,
            i = integral,
            d = derivative,
            output,
            %action,
            gear = next.gear,
            angle = next.angle,
            "controller step"
        );
        if !self.throttle_limits.contains_gear(next.gear) {
            warn!(
                gear = next.gear,
                gears = self.throttle_limits.len(),
                "commanded gear is outside the throttle table"
            );
        }

        Ok(next)
    }

    /// P, I and D terms from the last computation.
    pub fn components(&self) -> PidTerms {
        self.terms
    }

    /// Current gains as `(kp, ki, kd)`.
    pub fn tunings(&self) -> Gains {
        self.gains
    }

    pub fn set_tunings(&mut self, gains: Gains) {
        self.gains = gains;
    }

    pub fn auto_mode(&self) -> bool {
        self.auto_mode
    }

    /// Enable or disable automatic control.
    ///
    /// On a manual→auto transition the controller restarts from `seed`: the
    /// seed becomes both the previous pressure and the starting integral
    /// (clamped to the output limits), and the proportional term is zeroed.
    /// This lets the loop take over bumplessly from a manually held output.
    /// Any other transition only sets the flag.
    pub fn set_auto_mode(&mut self, enabled: bool, seed: Option<Real>) {
        if enabled && !self.auto_mode {
            self.last_pressure = seed;
            self.last_time = self.clock.now();
            self.terms.proportional = 0.0;
            self.terms.integral = self.output_limits.clamp(seed.unwrap_or(0.0));
            info!(?seed, integral = self.terms.integral, "controller switched to auto");
        } else if !enabled && self.auto_mode {
            info!("controller switched to manual");
        }
        self.auto_mode = enabled;
    }

    pub fn output_limits(&self) -> Limits {
        self.output_limits
    }

    /// Set the output limits and pull the integral and previous pressure back inside them.
    ///
    /// # Errors
    ///
    /// Returns error (and changes nothing) if both bounds are present and `upper < lower`.
    pub fn set_output_limits(&mut self, lower: Option<Real>, upper: Option<Real>) -> ControlResult<()> {
        let limits = Limits::new(lower, upper)?;
        self.output_limits = limits;
        self.terms.integral = limits.clamp(self.terms.integral);
        self.last_pressure = limits.clamp_opt(self.last_pressure);
        info!(?lower, ?upper, integral = self.terms.integral, "output limits updated");
        Ok(())
    }

    /// Remove both output bounds. Internal state is left as-is.
    pub fn clear_output_limits(&mut self) {
        self.output_limits = Limits::unbounded();
        info!("output limits cleared");
    }

    pub fn set_point(&self) -> Real {
        self.set_point
    }

    pub fn set_set_point(&mut self, set_point: Real) {
        self.set_point = set_point;
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    pub fn set_thresholds(&mut self, thresholds: Thresholds) {
        self.thresholds = thresholds;
    }

    pub fn throttle_limits(&self) -> &ThrottleLimits {
        &self.throttle_limits
    }

    /// Clamped output of the last auto-mode step.
    pub fn last_output(&self) -> Option<Real> {
        self.last_output
    }

    /// Decision taken on the last auto-mode step.
    pub fn last_action(&self) -> Option<Action> {
        self.last_action
    }

    /// Pressure remembered for the next derivative computation.
    pub fn last_pressure(&self) -> Option<Real> {
        self.last_pressure
    }

    /// Snapshot of the live configuration.
    pub fn config(&self) -> ControllerConfig {
        ControllerConfig {
            gains: self.gains,
            set_point: self.set_point,
            thresholds: self.thresholds,
            throttle_limits: self.throttle_limits.clone(),
            output_limits: self.output_limits,
            auto_mode: self.auto_mode,
        }
    }
}
