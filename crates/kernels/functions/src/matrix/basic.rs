//! Eigenframes
//!
//! Orthonormal bases built from an [`EigenDecomposition`].

use serde::{Deserialize, Serialize};
use tensorfield_foundation::vector_ops::{
    any_perpendicular, cross, dot, norm, normalize_or_zero, scale, sub,
};
use tensorfield_foundation::{Mat3, Vec3};

use super::EigenDecomposition;

/// Right-handed orthonormal eigenframe.
///
/// `minor × medium = major`, so the frame maps unit-space x, y, z onto the
/// minor, medium and major eigenvectors without reflection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EigenFrame {
    pub minor: Vec3,
    pub medium: Vec3,
    pub major: Vec3,
}

impl EigenFrame {
    /// Gram–Schmidt the solver output against the principal eigenvector.
    ///
    /// The principal eigenvector is kept (normalized), the median one is
    /// made orthogonal to it, and the minor one is rebuilt from the cross
    /// product. A median vector that collapses to zero is replaced by an
    /// arbitrary perpendicular. Returns `None` when the principal
    /// eigenvector itself is zero.
    pub fn from_decomposition(decomposition: &EigenDecomposition) -> Option<Self> {
        let major = normalize_or_zero(decomposition.vectors[2]);
        if norm(major) == 0.0 {
            return None;
        }

        let candidate = decomposition.vectors[1];
        let mut medium = normalize_or_zero(sub(candidate, scale(major, dot(candidate, major))));
        if norm(medium) == 0.0 {
            medium = any_perpendicular(major);
        }

        let minor = cross(medium, major);
        Some(Self {
            minor,
            medium,
            major,
        })
    }

    /// Rotation matrix with columns (minor, medium, major).
    pub fn rotation(&self) -> Mat3 {
        Mat3::from_columns(self.minor, self.medium, self.major)
    }
}
