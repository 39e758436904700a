//! Project validation logic.
//!
//! Stricter than the controller itself: a file is also rejected for inverted
//! thresholds and inverted per-gear angle ranges.

use crate::schema::ProjectFile;
use mp_controls::ControllerConfig;
use mp_sim::SimulationConfig;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_project(project: &ProjectFile) -> Result<(), ValidationError> {
    if project.version == 0 || project.version > crate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }

    validate_controller(&project.controller)?;
    if let Some(sim) = &project.simulation {
        validate_simulation(sim, &project.controller)?;
    }
    Ok(())
}

pub fn validate_controller(cfg: &ControllerConfig) -> Result<(), ValidationError> {
    validate_finite("controller.kp", cfg.gains.kp)?;
    validate_finite("controller.ki", cfg.gains.ki)?;
    validate_finite("controller.kd", cfg.gains.kd)?;
    validate_finite("controller.set_point", cfg.set_point)?;
    validate_finite("controller.thresholds.lower", cfg.thresholds.lower)?;
    validate_finite("controller.thresholds.upper", cfg.thresholds.upper)?;

    if cfg.thresholds.lower > cfg.thresholds.upper {
        return Err(ValidationError::InvalidValue {
            field: "controller.thresholds".to_string(),
            value: format!("({}, {})", cfg.thresholds.lower, cfg.thresholds.upper),
            reason: "lower threshold must not exceed upper threshold".to_string(),
        });
    }

    if cfg.throttle_limits.is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "controller.throttle_limits".to_string(),
            value: "[]".to_string(),
            reason: "at least one gear is required".to_string(),
        });
    }
    for (idx, range) in cfg.throttle_limits.iter().enumerate() {
        let gear = idx + 1;
        validate_finite(&format!("controller.throttle_limits[gear {gear}].min"), range.min)?;
        validate_finite(&format!("controller.throttle_limits[gear {gear}].max"), range.max)?;
        if range.min > range.max {
            return Err(ValidationError::InvalidValue {
                field: format!("controller.throttle_limits[gear {gear}]"),
                value: format!("({}, {})", range.min, range.max),
                reason: "min angle must not exceed max angle".to_string(),
            });
        }
    }

    let limits = cfg.output_limits;
    for (side, bound) in [("lower", limits.lower), ("upper", limits.upper)] {
        if let Some(v) = bound {
            validate_finite(&format!("controller.output_limits.{side}"), v)?;
        }
    }
    if let Err(e) = limits.validate() {
        return Err(ValidationError::InvalidValue {
            field: "controller.output_limits".to_string(),
            value: format!("({:?}, {:?})", limits.lower, limits.upper),
            reason: e.to_string(),
        });
    }

    Ok(())
}

fn validate_simulation(sim: &SimulationConfig, cfg: &ControllerConfig) -> Result<(), ValidationError> {
    if !sim.dt_s.is_finite() || sim.dt_s <= 0.0 {
        return Err(ValidationError::InvalidValue {
            field: "simulation.dt_s".to_string(),
            value: sim.dt_s.to_string(),
            reason: "must be positive and finite".to_string(),
        });
    }
    if sim.steps == 0 {
        return Err(ValidationError::InvalidValue {
            field: "simulation.steps".to_string(),
            value: "0".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    if !cfg.throttle_limits.contains_gear(sim.initial_gear) {
        return Err(ValidationError::InvalidValue {
            field: "simulation.initial_gear".to_string(),
            value: sim.initial_gear.to_string(),
            reason: format!("must be between 1 and {}", cfg.throttle_limits.len()),
        });
    }
    validate_finite("simulation.initial_pressure", sim.initial_pressure)?;
    validate_finite("simulation.initial_angle", sim.initial_angle)?;
    if let Err(e) = sim.plant.validate() {
        return Err(ValidationError::InvalidValue {
            field: "simulation.plant".to_string(),
            value: format!("{:?}", sim.plant),
            reason: e.to_string(),
        });
    }
    Ok(())
}

fn validate_finite(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: "must be finite".to_string(),
        });
    }
    Ok(())
}
