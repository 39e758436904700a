//! mp-core: stable foundation for mixpid.
//!
//! Contains:
//! - numeric (Real + tolerances + float helpers)
//! - limits (optional lower/upper bounds and the clamp primitive)
//! - clock (monotonic time source injected into controllers)
//! - error (shared error types)

pub mod clock;
pub mod error;
pub mod limits;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use error::{CoreError, CoreResult};
pub use limits::Limits;
pub use numeric::*;
