//! 3x3 Tensor Type
//!
//! Fixed-size second-order tensor with column-major storage, used for
//! Jacobians and for the symmetric tensors of diffusion-like fields.

use serde::{Deserialize, Serialize};

use crate::Vec3;
use crate::matrix_ops::{mat3_mul, mat3_trace, mat3_transform, mat3_transpose};

/// 3x3 matrix, column-major: `[m00, m10, m20, m01, m11, m21, m02, m12, m22]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Mat3(pub [f64; 9]);

impl Mat3 {
    /// The zero matrix.
    pub const ZERO: Mat3 = Mat3([0.0; 9]);

    /// The identity matrix.
    pub const IDENTITY: Mat3 = Mat3([1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);

    /// Build from row-major nested arrays (`rows[i][j]` = entry at row i, column j).
    pub fn from_rows(rows: [[f64; 3]; 3]) -> Self {
        let mut m = [0.0; 9];
        for (i, row) in rows.iter().enumerate() {
            for (j, value) in row.iter().enumerate() {
                m[j * 3 + i] = *value;
            }
        }
        Self(m)
    }

    /// Build from three column vectors.
    pub fn from_columns(c0: Vec3, c1: Vec3, c2: Vec3) -> Self {
        Self([
            c0[0], c0[1], c0[2], c1[0], c1[1], c1[2], c2[0], c2[1], c2[2],
        ])
    }

    /// Diagonal matrix.
    pub fn diagonal(d: Vec3) -> Self {
        Self([d[0], 0.0, 0.0, 0.0, d[1], 0.0, 0.0, 0.0, d[2]])
    }

    /// Scaled identity `s · I`.
    pub fn scaled_identity(s: f64) -> Self {
        Self::diagonal([s, s, s])
    }

    /// Symmetric outer product `v vᵀ`.
    pub fn outer(v: Vec3) -> Self {
        Self::from_columns(
            [v[0] * v[0], v[1] * v[0], v[2] * v[0]],
            [v[0] * v[1], v[1] * v[1], v[2] * v[1]],
            [v[0] * v[2], v[1] * v[2], v[2] * v[2]],
        )
    }

    /// Entry at (row, col).
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.0[col * 3 + row]
    }

    /// Set entry at (row, col).
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.0[col * 3 + row] = value;
    }

    /// Column `col` as a vector.
    #[inline]
    pub fn column(&self, col: usize) -> Vec3 {
        [self.0[col * 3], self.0[col * 3 + 1], self.0[col * 3 + 2]]
    }

    /// Row-major nested copy.
    pub fn to_rows(&self) -> [[f64; 3]; 3] {
        let mut rows = [[0.0; 3]; 3];
        for (i, row) in rows.iter_mut().enumerate() {
            for (j, value) in row.iter_mut().enumerate() {
                *value = self.get(i, j);
            }
        }
        rows
    }

    /// Matrix-vector product `M · v`.
    #[inline]
    pub fn transform(&self, v: Vec3) -> Vec3 {
        mat3_transform(self.0, v)
    }

    /// Matrix product `self · rhs`.
    #[inline]
    pub fn mul_mat(&self, rhs: &Mat3) -> Mat3 {
        Mat3(mat3_mul(self.0, rhs.0))
    }

    #[inline]
    pub fn transpose(&self) -> Mat3 {
        Mat3(mat3_transpose(self.0))
    }

    #[inline]
    pub fn trace(&self) -> f64 {
        mat3_trace(self.0)
    }

    /// Sum of two matrices.
    pub fn add_mat(&self, rhs: &Mat3) -> Mat3 {
        let mut m = self.0;
        for (a, b) in m.iter_mut().zip(rhs.0.iter()) {
            *a += b;
        }
        Mat3(m)
    }

    /// Matrix scaled by `s`.
    pub fn scale(&self, s: f64) -> Mat3 {
        Mat3(self.0.map(|x| x * s))
    }

    /// Average of the matrix and its transpose.
    pub fn symmetrized(&self) -> Mat3 {
        self.add_mat(&self.transpose()).scale(0.5)
    }

    /// Whether every entry is finite.
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|x| x.is_finite())
    }
}
