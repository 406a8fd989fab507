//! Host-owned numeric buffers.
//!
//! A `HostArray` models a double-precision array handed across the host
//! boundary: `rows x cols`, stored column-major. Components read inputs from
//! borrowed arrays and bind freshly allocated arrays into output slots; the
//! host owns both once the call returns.

use crate::error::{ComponentError, ComponentResult};

#[derive(Debug, Clone, PartialEq)]
pub struct HostArray {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl HostArray {
    /// Zero-filled `rows x cols` array.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Column vector (`n x 1`).
    pub fn column(data: Vec<f64>) -> Self {
        Self {
            rows: data.len(),
            cols: 1,
            data,
        }
    }

    /// Row vector (`1 x n`).
    pub fn row(data: Vec<f64>) -> Self {
        Self {
            rows: 1,
            cols: data.len(),
            data,
        }
    }

    /// Wrap column-major storage, checking that it fills the shape exactly.
    pub fn from_column_major(rows: usize, cols: usize, data: Vec<f64>) -> ComponentResult<Self> {
        if data.len() != rows * cols {
            return Err(ComponentError::Shape {
                what: "column-major storage",
                expected: rows * cols,
                rows: data.len(),
                cols: 1,
            });
        }
        Ok(Self { rows, cols, data })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// True for row and column vectors (either orientation is accepted).
    pub fn is_vector(&self) -> bool {
        self.rows == 1 || self.cols == 1
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Element at (`row`, `col`), or `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            Some(self.data[row + col * self.rows])
        } else {
            None
        }
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }
}

impl From<Vec<f64>> for HostArray {
    fn from(data: Vec<f64>) -> Self {
        Self::column(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_major_indexing() {
        // [1 3 5]
        // [2 4 6]
        let a = HostArray::from_column_major(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(a.get(0, 0), Some(1.0));
        assert_eq!(a.get(1, 0), Some(2.0));
        assert_eq!(a.get(0, 2), Some(5.0));
        assert_eq!(a.get(1, 2), Some(6.0));
        assert_eq!(a.get(2, 0), None);
        assert!(!a.is_vector());
    }

    #[test]
    fn from_column_major_checks_size() {
        assert!(HostArray::from_column_major(2, 2, vec![0.0; 3]).is_err());
    }

    #[test]
    fn vectors_in_either_orientation() {
        let c = HostArray::column(vec![1.0, 2.0, 3.0]);
        let r = HostArray::row(vec![1.0, 2.0, 3.0]);
        assert_eq!(c.shape(), (3, 1));
        assert_eq!(r.shape(), (1, 3));
        assert!(c.is_vector() && r.is_vector());
        assert_eq!(c.as_slice(), r.as_slice());
    }

    #[test]
    fn zeros_allocates_exact_length() {
        let mut z = HostArray::zeros(4, 1);
        assert_eq!(z.len(), 4);
        z.as_mut_slice()[3] = 2.0;
        assert_eq!(z.into_vec(), vec![0.0, 0.0, 0.0, 2.0]);
    }
}
