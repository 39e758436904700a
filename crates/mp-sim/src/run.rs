//! Closed-loop runner: controller + boiler plant on a manual clock.

use crate::error::{SimError, SimResult};
use crate::plant::BoilerPlant;
use mp_controls::{Action, ActuatorCommand, Controller, ControllerConfig, PidTerms};
use mp_core::{Clock, ManualClock, Real, ensure_finite, ensure_positive};
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use tracing::info;

/// Sampling and initial conditions for a closed-loop run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Sample period in seconds.
    pub dt_s: Real,
    /// Number of controller samples.
    pub steps: usize,
    pub initial_pressure: Real,
    pub initial_gear: usize,
    pub initial_angle: Real,
    pub plant: BoilerPlant,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            dt_s: 1.0,
            steps: 600,
            initial_pressure: 0.2,
            initial_gear: 1,
            initial_angle: 45.0,
            plant: BoilerPlant::default(),
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> SimResult<()> {
        ensure_positive(self.dt_s, "dt_s")?;
        ensure_finite(self.initial_pressure, "initial_pressure")?;
        ensure_finite(self.initial_angle, "initial_angle")?;
        if self.steps == 0 {
            return Err(SimError::InvalidArg {
                what: "steps must be at least 1",
            });
        }
        if self.initial_gear == 0 {
            return Err(SimError::InvalidArg {
                what: "initial_gear is 1-based",
            });
        }
        self.plant.validate()?;
        Ok(())
    }
}

/// One controller sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimSample {
    pub step: usize,
    pub time_s: Real,
    /// Pressure fed to the controller at this sample.
    pub pressure: Real,
    /// Command returned by the controller.
    pub command: ActuatorCommand,
    pub action: Option<Action>,
    pub output: Option<Real>,
    pub terms: PidTerms,
}

/// Result of a closed-loop run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimRun {
    pub samples: Vec<SimSample>,
}

/// Aggregate figures for a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimSummary {
    pub final_pressure: Real,
    pub final_command: ActuatorCommand,
    pub min_pressure: Real,
    pub max_pressure: Real,
    pub gear_changes: usize,
}

impl SimRun {
    /// Summary of the run, `None` if no samples were taken.
    pub fn summary(&self) -> Option<SimSummary> {
        let last = self.samples.last()?;
        let (min_pressure, max_pressure) = self
            .samples
            .iter()
            .fold((Real::INFINITY, Real::NEG_INFINITY), |(lo, hi), s| {
                (lo.min(s.pressure), hi.max(s.pressure))
            });
        let gear_changes = self
            .samples
            .iter()
            .filter(|s| matches!(s.action, Some(Action::GearUp | Action::GearDown)))
            .count();
        Some(SimSummary {
            final_pressure: last.pressure,
            final_command: last.command,
            min_pressure,
            max_pressure,
            gear_changes,
        })
    }

    /// Render samples as CSV with a header row.
    pub fn to_csv(&self) -> String {
        let mut out = String::from("step,time_s,pressure,gear,angle,action,output,p,i,d\n");
        for s in &self.samples {
            let action = s.action.map(|a| a.to_string()).unwrap_or_default();
            let output = s.output.map(|o| o.to_string()).unwrap_or_default();
            // Writing to a String cannot fail.
            let _ = writeln!(
                out,
                "{},{},{},{},{},{},{},{},{},{}",
                s.step,
                s.time_s,
                s.pressure,
                s.command.gear,
                s.command.angle,
                action,
                output,
                s.terms.proportional,
                s.terms.integral,
                s.terms.derivative
            );
        }
        out
    }
}

/// Drive a controller built from `controller_config` against the plant in `sim`.
///
/// Each sample advances the clock by `dt_s`, integrates the plant under the
/// previous command, then asks the controller for the next command.
pub fn run_closed_loop(controller_config: &ControllerConfig, sim: &SimulationConfig) -> SimResult<SimRun> {
    sim.validate()?;

    let clock = ManualClock::new(0.0);
    let mut controller = Controller::with_clock(controller_config.clone(), clock.clone())?;
    if !controller.throttle_limits().contains_gear(sim.initial_gear) {
        return Err(SimError::InvalidArg {
            what: "initial_gear is outside the throttle table",
        });
    }

    info!(steps = sim.steps, dt_s = sim.dt_s, "starting closed-loop run");

    let mut pressure = sim.initial_pressure;
    let mut command = ActuatorCommand::new(sim.initial_gear, sim.initial_angle);
    let mut samples = Vec::with_capacity(sim.steps);

    for step in 0..sim.steps {
        clock.advance(sim.dt_s)?;
        pressure = sim.plant.step(pressure, sim.dt_s, command);
        command = controller
            .step(pressure, command)
            .map_err(|source| SimError::Control { step, source })?;
        samples.push(SimSample {
            step,
            time_s: clock.now(),
            pressure,
            command,
            action: controller.last_action(),
            output: controller.last_output(),
            terms: controller.components(),
        });
    }

    let run = SimRun { samples };
    if let Some(summary) = run.summary() {
        info!(
            final_pressure = summary.final_pressure,
            gear = summary.final_command.gear,
            angle = summary.final_command.angle,
            gear_changes = summary.gear_changes,
            "closed-loop run finished"
        );
    }
    Ok(run)
}
