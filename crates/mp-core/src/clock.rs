//! Time sources for sampled controllers.
//!
//! Elapsed time feeds straight into the integral and derivative terms, so a
//! clock must never run backwards. Controllers take the clock as a type
//! parameter and read it once per update.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use crate::{CoreError, CoreResult, Real};

/// A monotonically non-decreasing time source, in seconds from an arbitrary origin.
pub trait Clock {
    fn now(&self) -> Real;
}

/// Wall-adjustment-immune clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Real {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Explicitly advanced clock for simulation and tests.
///
/// Clones share the same underlying time, so a handle kept by the caller can
/// drive a clock that has been moved into a controller.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    bits: Arc<AtomicU64>,
}

impl ManualClock {
    /// Create a clock starting at `t0` seconds.
    pub fn new(t0: Real) -> Self {
        Self {
            bits: Arc::new(AtomicU64::new(t0.to_bits())),
        }
    }

    /// Move time forward by `dt` seconds.
    pub fn advance(&self, dt: Real) -> CoreResult<()> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(CoreError::InvalidArg {
                what: "clock advance must be finite and non-negative",
            });
        }
        self.bits
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |bits| {
                let t = Real::from_bits(bits) + dt;
                t.is_finite().then(|| t.to_bits())
            })
            .map(|_| ())
            .map_err(|_| CoreError::InvalidArg {
                what: "clock time overflowed",
            })
    }

    /// Jump to an absolute time. Refuses to go backwards.
    pub fn set(&self, t: Real) -> CoreResult<()> {
        if !t.is_finite() {
            return Err(CoreError::InvalidArg {
                what: "clock time must be finite",
            });
        }
        self.bits
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |bits| {
                (t >= Real::from_bits(bits)).then(|| t.to_bits())
            })
            .map(|_| ())
            .map_err(|_| CoreError::InvalidArg {
                what: "clock must not move backwards",
            })
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Real {
        Real::from_bits(self.bits.load(Ordering::Acquire))
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Real {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monotonic_clock_never_decreases() {
        let clock = MonotonicClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(a >= 0.0);
        assert!(b >= a);
    }

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::new(1.0);
        let handle = clock.clone();
        handle.advance(0.25).unwrap();
        assert_eq!(clock.now(), 1.25);
    }

    #[test]
    fn manual_clock_rejects_going_backwards() {
        let clock = ManualClock::new(5.0);
        assert!(clock.set(4.0).is_err());
        assert!(clock.advance(-1.0).is_err());
        assert_eq!(clock.now(), 5.0);
        clock.set(5.0).unwrap();
        assert_eq!(clock.now(), 5.0);
    }

    #[test]
    fn concurrent_advances_are_not_lost() {
        let clock = ManualClock::new(0.0);
        let workers: Vec<_> = (0..4)
            .map(|_| {
                let handle = clock.clone();
                std::thread::spawn(move || {
                    for _ in 0..10_000 {
                        handle.advance(1.0).unwrap();
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }
        assert_eq!(clock.now(), 40_000.0);
    }

    #[test]
    fn default_manual_clock_starts_at_zero() {
        assert_eq!(ManualClock::default().now(), 0.0);
    }
}
