//! Burner pressure control for mixpid.
//!
//! A single [`Controller`] turns a measured boiler pressure into the next
//! actuator command: a discrete burner gear and a continuous throttle angle,
//! each gear bounded by its own angle range.
//!
//! # Example
//!
//! ```
//! use mp_controls::{ActuatorCommand, Controller, ControllerConfig};
//!
//! let config = ControllerConfig::default()
//!     .with_gains(20.0, 0.0, 0.0)
//!     .with_set_point(0.8);
//! let mut controller = Controller::new(config).unwrap();
//!
//! // Far below set point at the bottom of gear 1: step up a gear.
//! let next = controller.step(0.0, ActuatorCommand::new(1, 28.0)).unwrap();
//! assert_eq!(next, ActuatorCommand::new(2, 28.0));
//! ```

pub mod config;
pub mod controller;
pub mod decision;
pub mod error;

pub use config::{AngleRange, ControllerConfig, Gains, Thresholds, ThrottleLimits};
pub use controller::{Controller, DT_EPSILON, PidTerms};
pub use decision::{ANGLE_STEP, Action, ActuatorCommand, decide};
pub use error::{ControlError, ControlResult};
