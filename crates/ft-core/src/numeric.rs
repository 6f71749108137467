use crate::{FtError, FtResult};

/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-9,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

/// `a >= b`, allowing `a` to fall short of `b` by the tolerance.
pub fn at_least(a: Real, b: Real, tol: Tolerances) -> bool {
    a >= b || nearly_equal(a, b, tol)
}

pub fn ensure_finite(v: Real, what: impl Into<String>) -> FtResult<Real> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(FtError::NonFinite {
            what: what.into(),
            value: v,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn at_least_accepts_rounding_shortfall() {
        let tol = Tolerances::default();
        assert!(at_least(100.0, 100.0 + 1e-10, tol));
        assert!(at_least(101.0, 100.0, tol));
        assert!(!at_least(99.0, 100.0, tol));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    proptest! {
        #[test]
        fn nearly_equal_is_symmetric(a in -1e6_f64..1e6, b in -1e6_f64..1e6) {
            let tol = Tolerances::default();
            prop_assert_eq!(nearly_equal(a, b, tol), nearly_equal(b, a, tol));
        }
    }
}
