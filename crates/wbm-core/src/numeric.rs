use crate::WbmError;

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
            abs: 1e-12,
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

/// Check every entry of a buffer, reporting the first offending value.
pub fn ensure_all_finite(values: &[Real], what: &'static str) -> Result<(), WbmError> {
    match values.iter().find(|v| !v.is_finite()) {
        Some(&value) => Err(WbmError::NonFinite { what, value }),
        None => Ok(()),
    }
}

/// Element-wise `nearly_equal` over two slices of equal length.
pub fn slices_nearly_equal(a: &[Real], b: &[Real], tol: Tolerances) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(&x, &y)| nearly_equal(x, y, tol))
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn non_finite_error_message() {
        let err = ensure_all_finite(&[Real::NAN], "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn ensure_all_finite_reports_first_bad_value() {
        assert!(ensure_all_finite(&[0.0, 1.0, -2.5], "qj").is_ok());
        assert!(ensure_all_finite(&[], "qj").is_ok());

        let err = ensure_all_finite(&[0.0, Real::INFINITY, Real::NAN], "qj_dot").unwrap_err();
        match err {
            WbmError::NonFinite { what, value } => {
                assert_eq!(what, "qj_dot");
                assert!(value.is_infinite());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn slices_nearly_equal_requires_same_length() {
        let tol = Tolerances::default();
        assert!(slices_nearly_equal(&[1.0, 2.0], &[1.0, 2.0 + 1e-13], tol));
        assert!(!slices_nearly_equal(&[1.0, 2.0], &[1.0], tol));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn nearly_equal_is_symmetric(a in -1e6_f64..1e6, b in -1e6_f64..1e6) {
            let tol = Tolerances::default();
            prop_assert_eq!(nearly_equal(a, b, tol), nearly_equal(b, a, tol));
        }

        #[test]
        fn finite_buffers_pass(values in prop::collection::vec(-1e9_f64..1e9, 0..32)) {
            prop_assert!(ensure_all_finite(&values, "buffer").is_ok());
        }
    }
}
