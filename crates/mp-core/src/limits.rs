//! Optional lower/upper bounds and the clamp primitive.
//!
//! A missing bound means "unbounded on that side". Both the controller output
//! and the integral accumulator are clamped through [`Limits`], which is what
//! keeps the integral from winding up while the output is saturated.

use crate::{CoreError, CoreResult, Real};

/// A pair of optional bounds `(lower, upper)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Limits {
    #[cfg_attr(feature = "serde", serde(default))]
    pub lower: Option<Real>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub upper: Option<Real>,
}

impl Limits {
    /// No bound on either side.
    pub const fn unbounded() -> Self {
        Self {
            lower: None,
            upper: None,
        }
    }

    /// Create limits, rejecting `upper < lower` when both bounds are present.
    pub fn new(lower: Option<Real>, upper: Option<Real>) -> CoreResult<Self> {
        let limits = Self { lower, upper };
        limits.validate()?;
        Ok(limits)
    }

    /// Check the ordering invariant. Useful for limits built by deserialization.
    pub fn validate(&self) -> CoreResult<()> {
        if let (Some(lower), Some(upper)) = (self.lower, self.upper) {
            if upper < lower {
                return Err(CoreError::InvalidLimits { lower, upper });
            }
        }
        Ok(())
    }

    /// Whether `value` lies within the bounds (inclusive).
    pub fn contains(&self, value: Real) -> bool {
        self.lower.is_none_or(|lo| value >= lo) && self.upper.is_none_or(|hi| value <= hi)
    }

    /// Clamp `value` into the bounds.
    ///
    /// The upper bound is tested first, so with inverted bounds (which
    /// [`Limits::new`] refuses) the upper bound wins.
    pub fn clamp(&self, value: Real) -> Real {
        match (self.lower, self.upper) {
            (_, Some(hi)) if value > hi => hi,
            (Some(lo), _) if value < lo => lo,
            _ => value,
        }
    }

    /// Clamp an optional value. An absent value stays absent.
    pub fn clamp_opt(&self, value: Option<Real>) -> Option<Real> {
        value.map(|v| self.clamp(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbounded_passes_everything_through() {
        let limits = Limits::unbounded();
        assert_eq!(limits.clamp(1e9), 1e9);
        assert_eq!(limits.clamp(-1e9), -1e9);
    }

    #[test]
    fn clamps_to_each_side() {
        let limits = Limits::new(Some(0.0), Some(10.0)).unwrap();
        assert_eq!(limits.clamp(15.0), 10.0);
        assert_eq!(limits.clamp(-2.0), 0.0);
        assert_eq!(limits.clamp(4.0), 4.0);
    }

    #[test]
    fn one_sided_bounds() {
        let upper_only = Limits::new(None, Some(3.0)).unwrap();
        assert_eq!(upper_only.clamp(-100.0), -100.0);
        assert_eq!(upper_only.clamp(4.0), 3.0);

        let lower_only = Limits::new(Some(-1.0), None).unwrap();
        assert_eq!(lower_only.clamp(100.0), 100.0);
        assert_eq!(lower_only.clamp(-4.0), -1.0);
    }

    #[test]
    fn absent_value_stays_absent() {
        let limits = Limits::new(Some(0.0), Some(1.0)).unwrap();
        assert_eq!(limits.clamp_opt(None), None);
        assert_eq!(limits.clamp_opt(Some(2.0)), Some(1.0));
    }

    #[test]
    fn inverted_bounds_rejected() {
        let err = Limits::new(Some(5.0), Some(1.0)).unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidLimits {
                lower: 5.0,
                upper: 1.0
            }
        );
        // equal bounds are fine
        assert!(Limits::new(Some(2.0), Some(2.0)).is_ok());
    }

    #[test]
    fn contains_is_inclusive() {
        let limits = Limits::new(Some(0.0), Some(10.0)).unwrap();
        assert!(limits.contains(0.0));
        assert!(limits.contains(10.0));
        assert!(!limits.contains(10.5));
        assert!(Limits::unbounded().contains(Real::MAX));
    }
}
