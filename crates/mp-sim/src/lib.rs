//! Closed-loop simulation of the burner controller against a boiler model.

pub mod error;
pub mod plant;
pub mod run;

pub use error::{SimError, SimResult};
pub use plant::BoilerPlant;
pub use run::{SimRun, SimSample, SimSummary, SimulationConfig, run_closed_loop};
