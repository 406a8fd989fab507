//! Common argument and output helpers shared by components.

use crate::buffer::HostArray;
use crate::error::{ComponentError, ComponentResult};
use wbm_core::{WbmError, ensure_all_finite};
use wbm_engine::ModelEngine;

/// Fail with an arity error unless `actual == expected`.
pub fn check_arity(what: &'static str, actual: usize, expected: usize) -> ComponentResult<()> {
    if actual != expected {
        return Err(ComponentError::Arity {
            what,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Borrow `arg` as a vector of exactly `expected` elements.
pub fn vector_arg<'a>(
    arg: &'a HostArray,
    what: &'static str,
    expected: usize,
) -> ComponentResult<&'a [f64]> {
    if !arg.is_vector() || arg.len() != expected {
        return Err(ComponentError::Shape {
            what,
            expected,
            rows: arg.rows(),
            cols: arg.cols(),
        });
    }
    Ok(arg.as_slice())
}

/// Ensure every value is finite, returning ComponentError if not.
pub fn check_finite(values: &[f64], what: &'static str) -> ComponentResult<()> {
    ensure_all_finite(values, what).map_err(|e| match e {
        WbmError::NonFinite { what, value } => ComponentError::NonFinite { what, value },
        _ => ComponentError::NonFinite { what, value: f64::NAN },
    })
}

/// Query the live model DoF and compare it with the DoF cached at creation.
pub fn live_dof(engine: &dyn ModelEngine, cached: usize) -> ComponentResult<usize> {
    let model = engine.degrees_of_freedom()?;
    if model != cached {
        return Err(ComponentError::DofChanged { cached, model });
    }
    Ok(model)
}

/// Bind one zero-filled `dof x 1` array per slot.
pub fn bind_outputs(outputs: &mut [Option<HostArray>], dof: usize) {
    for slot in outputs.iter_mut() {
        *slot = Some(HostArray::zeros(dof, 1));
    }
}

/// Borrow a previously bound output, checking it is exactly `dof` long.
pub fn bound_output<'a>(
    slot: &'a mut Option<HostArray>,
    what: &'static str,
    dof: usize,
) -> ComponentResult<&'a mut [f64]> {
    let array = slot.as_mut().ok_or(ComponentError::Allocation { what })?;
    if array.len() != dof {
        return Err(ComponentError::DofMismatch {
            what,
            allocated: array.len(),
            model: dof,
        });
    }
    Ok(array.as_mut_slice())
}
