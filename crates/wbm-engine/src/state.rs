//! Call-scoped robot state.

use crate::error::{EngineError, EngineResult};

/// Length of a base twist (linear + angular velocity or acceleration).
pub const TWIST_LEN: usize = 6;

/// Length of the gravity vector.
pub const GRAVITY_LEN: usize = 3;

/// Borrowed view of the state vectors needed for a dynamics query.
///
/// A `RobotState` never outlives the host call that produced it: every field
/// borrows from the caller's buffers. Engines that need the state after
/// `set_state` returns must copy it.
#[derive(Clone, Copy, Debug)]
pub struct RobotState<'a> {
    /// Joint positions, length = DoF
    pub qj: &'a [f64],
    /// Joint velocities, length = DoF
    pub qj_dot: &'a [f64],
    /// Joint accelerations, length = DoF
    pub qj_ddot: &'a [f64],
    /// Base twist (linear, angular), length = 6
    pub vb: &'a [f64],
    /// Base twist derivative, length = 6
    pub vb_dot: &'a [f64],
    /// Gravity vector, length = 3
    pub g: &'a [f64],
}

impl<'a> RobotState<'a> {
    pub fn new(
        qj: &'a [f64],
        qj_dot: &'a [f64],
        qj_ddot: &'a [f64],
        vb: &'a [f64],
        vb_dot: &'a [f64],
        g: &'a [f64],
    ) -> Self {
        Self {
            qj,
            qj_dot,
            qj_ddot,
            vb,
            vb_dot,
            g,
        }
    }

    /// Field names paired with their buffers, in host argument order.
    pub fn fields(&self) -> [(&'static str, &'a [f64]); 6] {
        [
            ("qj", self.qj),
            ("qj_dot", self.qj_dot),
            ("qj_ddot", self.qj_ddot),
            ("vb", self.vb),
            ("vb_dot", self.vb_dot),
            ("g", self.g),
        ]
    }

    /// Expected length of every field for a model with `dof` joints.
    pub fn expected_lengths(dof: usize) -> [usize; 6] {
        [dof, dof, dof, TWIST_LEN, TWIST_LEN, GRAVITY_LEN]
    }

    /// Verify that every field has the length a `dof`-joint model expects.
    pub fn check_dimensions(&self, dof: usize) -> EngineResult<()> {
        for ((what, values), expected) in self.fields().into_iter().zip(Self::expected_lengths(dof)) {
            if values.len() != expected {
                return Err(EngineError::Dimension {
                    what,
                    expected,
                    actual: values.len(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_dimensions_accepts_matching_state() {
        let q = [0.0; 4];
        let twist = [0.0; 6];
        let g = [0.0, 0.0, -9.81];
        let state = RobotState::new(&q, &q, &q, &twist, &twist, &g);
        assert!(state.check_dimensions(4).is_ok());
    }

    #[test]
    fn check_dimensions_names_offending_field() {
        let q = [0.0; 4];
        let short = [0.0; 3];
        let twist = [0.0; 6];
        let g = [0.0, 0.0, -9.81];
        let state = RobotState::new(&q, &q, &q, &twist, &short, &g);

        let err = state.check_dimensions(4).unwrap_err();
        assert_eq!(
            err,
            EngineError::Dimension {
                what: "vb_dot",
                expected: 6,
                actual: 3
            }
        );
    }
}
