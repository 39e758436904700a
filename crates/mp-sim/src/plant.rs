//! First-order boiler pressure plant.
//!
//! Heat input rises with the burner gear and falls as the throttle angle
//! increases. Pressure relaxes toward the equilibrium set by the current
//! heat input:
//!
//! ```text
//! p_eq  = base_pressure + gear_gain * gear - angle_gain * angle
//! dp/dt = (p_eq - p) / tau
//! ```
//!
//! Integrated with explicit Euler; pressure never goes below zero.

use mp_controls::ActuatorCommand;
use mp_core::{CoreResult, Real, ensure_finite, ensure_positive};
use serde::{Deserialize, Serialize};

/// Boiler response parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoilerPlant {
    /// Time constant in seconds (must be positive).
    pub tau_s: Real,
    /// Equilibrium pressure with zero gear and zero angle.
    pub base_pressure: Real,
    /// Equilibrium pressure gained per gear.
    pub gear_gain: Real,
    /// Equilibrium pressure lost per degree of throttle angle.
    pub angle_gain: Real,
}

impl Default for BoilerPlant {
    fn default() -> Self {
        Self {
            tau_s: 20.0,
            base_pressure: 0.6,
            gear_gain: 0.1,
            angle_gain: 0.008,
        }
    }
}

impl BoilerPlant {
    /// Create a plant, validating its parameters.
    pub fn new(tau_s: Real, base_pressure: Real, gear_gain: Real, angle_gain: Real) -> CoreResult<Self> {
        let plant = Self {
            tau_s,
            base_pressure,
            gear_gain,
            angle_gain,
        };
        plant.validate()?;
        Ok(plant)
    }

    pub fn validate(&self) -> CoreResult<()> {
        ensure_positive(self.tau_s, "tau_s")?;
        ensure_finite(self.base_pressure, "base_pressure")?;
        ensure_finite(self.gear_gain, "gear_gain")?;
        ensure_finite(self.angle_gain, "angle_gain")?;
        Ok(())
    }

    /// Pressure the boiler settles at under a fixed command.
    pub fn equilibrium(&self, command: ActuatorCommand) -> Real {
        self.base_pressure + self.gear_gain * command.gear as Real - self.angle_gain * command.angle
    }

    /// Rate of pressure change.
    pub fn dpdt(&self, pressure: Real, command: ActuatorCommand) -> Real {
        (self.equilibrium(command) - pressure) / self.tau_s
    }

    /// Advance pressure by `dt` seconds under `command`.
    pub fn step(&self, pressure: Real, dt: Real, command: ActuatorCommand) -> Real {
        (pressure + self.dpdt(pressure, command) * dt).max(0.0)
    }
}
