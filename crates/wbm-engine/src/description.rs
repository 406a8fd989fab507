//! Serializable description of a frozen (linearized) dynamics model.
//!
//! Matrices are written as lists of rows. An omitted matrix is all zeros, so a
//! description with only joints and limits describes a massless model.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::state::{GRAVITY_LEN, TWIST_LEN};

pub type DescriptionResult<T> = Result<T, DescriptionError>;

#[derive(thiserror::Error, Debug)]
pub enum DescriptionError {
    #[error("Invalid model description: {what}")]
    Invalid { what: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DescriptionError {
    fn invalid(what: impl Into<String>) -> Self {
        DescriptionError::Invalid { what: what.into() }
    }
}

/// One actuated joint with its position limits [rad or m].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JointDescription {
    pub name: String,
    pub lower: f64,
    pub upper: f64,
}

/// Linearized rigid-body dynamics frozen at an operating point:
///
/// ```text
/// tau = M*qj_ddot + C*qj_dot + S*(qj - q_ref) + B*vb_dot + K*vb - G*g
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrozenModelDescription {
    pub name: String,
    pub joints: Vec<JointDescription>,
    /// Operating-point joint positions (empty = zeros)
    #[serde(default)]
    pub q_ref: Vec<f64>,
    /// Joint-space mass matrix M (n x n)
    #[serde(default)]
    pub mass: Vec<Vec<f64>>,
    /// Velocity-proportional term C (n x n)
    #[serde(default)]
    pub damping: Vec<Vec<f64>>,
    /// Position-proportional term S (n x n)
    #[serde(default)]
    pub stiffness: Vec<Vec<f64>>,
    /// Base acceleration coupling B (n x 6)
    #[serde(default)]
    pub base_acceleration_coupling: Vec<Vec<f64>>,
    /// Base velocity coupling K (n x 6)
    #[serde(default)]
    pub base_velocity_coupling: Vec<Vec<f64>>,
    /// Gravity coupling G (n x 3)
    #[serde(default)]
    pub gravity_coupling: Vec<Vec<f64>>,
}

impl FrozenModelDescription {
    /// A model whose dynamics terms are all zero, with the given limits.
    pub fn zero_dynamics(limits: &[(f64, f64)]) -> Self {
        Self {
            name: "zero-dynamics".into(),
            joints: limits
                .iter()
                .enumerate()
                .map(|(i, &(lower, upper))| JointDescription {
                    name: format!("joint_{i}"),
                    lower,
                    upper,
                })
                .collect(),
            q_ref: Vec::new(),
            mass: Vec::new(),
            damping: Vec::new(),
            stiffness: Vec::new(),
            base_acceleration_coupling: Vec::new(),
            base_velocity_coupling: Vec::new(),
            gravity_coupling: Vec::new(),
        }
    }

    pub fn dof(&self) -> usize {
        self.joints.len()
    }

    pub fn from_yaml_str(content: &str) -> DescriptionResult<Self> {
        let desc: Self = serde_yaml::from_str(content)?;
        desc.validate()?;
        Ok(desc)
    }

    pub fn load_yaml(path: &Path) -> DescriptionResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn load_json(path: &Path) -> DescriptionResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let desc: Self = serde_json::from_str(&content)?;
        desc.validate()?;
        Ok(desc)
    }

    pub fn save_yaml(&self, path: &Path) -> DescriptionResult<()> {
        self.validate()?;
        std::fs::write(path, serde_yaml::to_string(self)?)?;
        Ok(())
    }

    /// Check joint names, limits and matrix shapes.
    pub fn validate(&self) -> DescriptionResult<()> {
        let n = self.dof();
        if n == 0 {
            return Err(DescriptionError::invalid("model must have at least one joint"));
        }

        let mut seen = HashSet::new();
        for joint in &self.joints {
            if joint.name.is_empty() {
                return Err(DescriptionError::invalid("joint name must not be empty"));
            }
            if !seen.insert(joint.name.as_str()) {
                return Err(DescriptionError::invalid(format!(
                    "duplicate joint name '{}'",
                    joint.name
                )));
            }
            if !joint.lower.is_finite() || !joint.upper.is_finite() {
                return Err(DescriptionError::invalid(format!(
                    "joint '{}' has non-finite limits",
                    joint.name
                )));
            }
            if joint.lower > joint.upper {
                return Err(DescriptionError::invalid(format!(
                    "joint '{}' has lower limit {} above upper limit {}",
                    joint.name, joint.lower, joint.upper
                )));
            }
        }

        if !self.q_ref.is_empty() && self.q_ref.len() != n {
            return Err(DescriptionError::invalid(format!(
                "q_ref has {} entries, expected {}",
                self.q_ref.len(),
                n
            )));
        }
        if self.q_ref.iter().any(|v| !v.is_finite()) {
            return Err(DescriptionError::invalid("q_ref contains non-finite entries"));
        }

        check_shape("mass", &self.mass, n, n)?;
        check_shape("damping", &self.damping, n, n)?;
        check_shape("stiffness", &self.stiffness, n, n)?;
        check_shape(
            "base_acceleration_coupling",
            &self.base_acceleration_coupling,
            n,
            TWIST_LEN,
        )?;
        check_shape(
            "base_velocity_coupling",
            &self.base_velocity_coupling,
            n,
            TWIST_LEN,
        )?;
        check_shape("gravity_coupling", &self.gravity_coupling, n, GRAVITY_LEN)?;
        Ok(())
    }

    pub(crate) fn q_ref_vector(&self) -> DVector<f64> {
        if self.q_ref.is_empty() {
            DVector::zeros(self.dof())
        } else {
            DVector::from_column_slice(&self.q_ref)
        }
    }
}

fn check_shape(
    what: &'static str,
    rows: &[Vec<f64>],
    n_rows: usize,
    n_cols: usize,
) -> DescriptionResult<()> {
    if rows.is_empty() {
        return Ok(());
    }
    if rows.len() != n_rows || rows.iter().any(|r| r.len() != n_cols) {
        return Err(DescriptionError::invalid(format!(
            "{what} must be {n_rows}x{n_cols}"
        )));
    }
    if rows.iter().flatten().any(|v| !v.is_finite()) {
        return Err(DescriptionError::invalid(format!(
            "{what} contains non-finite entries"
        )));
    }
    Ok(())
}

/// Dense matrix from a list of rows; an empty list yields zeros.
pub(crate) fn to_matrix(rows: &[Vec<f64>], n_rows: usize, n_cols: usize) -> DMatrix<f64> {
    if rows.is_empty() {
        DMatrix::zeros(n_rows, n_cols)
    } else {
        DMatrix::from_fn(n_rows, n_cols, |i, j| rows[i][j])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_LINK: &str = r#"
name: two-link
joints:
  - name: shoulder
    lower: -1.5
    upper: 1.5
  - name: elbow
    lower: 0.0
    upper: 2.5
mass:
  - [2.0, 0.1]
  - [0.1, 1.0]
gravity_coupling:
  - [0.0, 0.0, 1.2]
  - [0.0, 0.0, 0.4]
"#;

    #[test]
    fn parses_yaml_with_defaults() {
        let desc = FrozenModelDescription::from_yaml_str(TWO_LINK).unwrap();
        assert_eq!(desc.dof(), 2);
        assert_eq!(desc.joints[1].name, "elbow");
        assert!(desc.damping.is_empty());
        assert_eq!(desc.q_ref_vector(), DVector::zeros(2));
    }

    #[test]
    fn rejects_inverted_limits() {
        let desc = FrozenModelDescription::zero_dynamics(&[(1.0, -1.0)]);
        let err = desc.validate().unwrap_err();
        assert!(err.to_string().contains("lower limit"));
    }

    #[test]
    fn rejects_duplicate_joint_names() {
        let mut desc = FrozenModelDescription::zero_dynamics(&[(-1.0, 1.0), (-1.0, 1.0)]);
        desc.joints[1].name = desc.joints[0].name.clone();
        assert!(desc.validate().is_err());
    }

    #[test]
    fn rejects_misshaped_matrix() {
        let mut desc = FrozenModelDescription::zero_dynamics(&[(-1.0, 1.0), (-1.0, 1.0)]);
        desc.gravity_coupling = vec![vec![0.0, 0.0, 1.0]];
        let err = desc.validate().unwrap_err();
        assert!(err.to_string().contains("gravity_coupling must be 2x3"));
    }

    #[test]
    fn rejects_non_finite_reference_pose() {
        let mut desc = FrozenModelDescription::zero_dynamics(&[(-1.0, 1.0), (-1.0, 1.0)]);
        desc.q_ref = vec![0.0, f64::NAN];
        let err = desc.validate().unwrap_err();
        assert!(err.to_string().contains("q_ref contains non-finite"));

        desc.q_ref = vec![f64::INFINITY, 0.0];
        assert!(desc.validate().is_err());

        desc.q_ref = vec![0.5, -0.5];
        desc.validate().unwrap();
    }

    #[test]
    fn rejects_empty_model() {
        let desc = FrozenModelDescription::zero_dynamics(&[]);
        assert!(desc.validate().is_err());
    }

    #[test]
    fn to_matrix_is_row_major_input() {
        let m = to_matrix(&[vec![1.0, 2.0], vec![3.0, 4.0]], 2, 2);
        assert_eq!(m[(0, 1)], 2.0);
        assert_eq!(m[(1, 0)], 3.0);
        assert_eq!(to_matrix(&[], 2, 3), DMatrix::zeros(2, 3));
    }
}
