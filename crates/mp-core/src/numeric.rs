//! Scalar type and float helpers shared by the controller, plant and config layers.

use crate::CoreError;

/// Floating point type used for pressures, angles, gains and times.
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Like [`ensure_finite`], but also rejects zero and negative values.
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, CoreError> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(CoreError::InvalidArg { what })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "pressure").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
        assert!(msg.contains("pressure"));
    }

    #[test]
    fn ensure_positive_rejects_zero_and_infinity() {
        assert_eq!(ensure_positive(0.1, "tau").unwrap(), 0.1);
        assert_eq!(
            ensure_positive(0.0, "tau"),
            Err(CoreError::InvalidArg { what: "tau" })
        );
        assert!(matches!(
            ensure_positive(Real::INFINITY, "tau"),
            Err(CoreError::NonFinite { .. })
        ));
    }
}
