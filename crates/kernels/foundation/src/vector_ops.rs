//! Vector Operations (Shared Implementation)
//!
//! Low-level 3D vector operations used by the differential operator, the
//! eigensolver consumers and the tracing passes.

use crate::Vec3;

/// Component-wise sum.
#[inline]
pub fn add(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

/// Component-wise difference `a - b`.
#[inline]
pub fn sub(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

/// Scale a vector by a scalar.
#[inline]
pub fn scale(v: Vec3, s: f64) -> Vec3 {
    [v[0] * s, v[1] * s, v[2] * s]
}

/// Negate a vector.
#[inline]
pub fn neg(v: Vec3) -> Vec3 {
    [-v[0], -v[1], -v[2]]
}

/// `a + s * b`.
#[inline]
pub fn add_scaled(a: Vec3, b: Vec3, s: f64) -> Vec3 {
    [a[0] + s * b[0], a[1] + s * b[1], a[2] + s * b[2]]
}

/// Dot product.
#[inline]
pub fn dot(a: Vec3, b: Vec3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// Cross product `a × b`.
#[inline]
pub fn cross(a: Vec3, b: Vec3) -> Vec3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

/// Squared Euclidean norm.
#[inline]
pub fn norm_sq(v: Vec3) -> f64 {
    dot(v, v)
}

/// Euclidean norm.
#[inline]
pub fn norm(v: Vec3) -> f64 {
    norm_sq(v).sqrt()
}

/// Smallest norm that is still normalized. Anything shorter maps to zero.
pub const MIN_NORMALIZE_NORM: f64 = 1e-30;

/// Normalize a vector, mapping (near-)zero vectors to the zero vector.
///
/// Never produces NaN.
#[inline]
pub fn normalize_or_zero(v: Vec3) -> Vec3 {
    let n = norm(v);
    if n > MIN_NORMALIZE_NORM {
        scale(v, 1.0 / n)
    } else {
        [0.0, 0.0, 0.0]
    }
}

/// Component-wise absolute value.
#[inline]
pub fn abs(v: Vec3) -> Vec3 {
    [v[0].abs(), v[1].abs(), v[2].abs()]
}

/// Squared distance between two 3D points.
#[inline]
pub fn distance_sq_vec3(a: Vec3, b: Vec3) -> f64 {
    norm_sq(sub(a, b))
}

/// Euclidean distance between two 3D points.
#[inline]
pub fn distance_vec3(a: Vec3, b: Vec3) -> f64 {
    distance_sq_vec3(a, b).sqrt()
}

/// Some unit vector perpendicular to `v`.
///
/// Crosses `v` with the coordinate axis it is least aligned with. Returns
/// the zero vector when `v` itself is zero.
pub fn any_perpendicular(v: Vec3) -> Vec3 {
    let a = abs(v);
    let axis = if a[0] <= a[1] && a[0] <= a[2] {
        [1.0, 0.0, 0.0]
    } else if a[1] <= a[2] {
        [0.0, 1.0, 0.0]
    } else {
        [0.0, 0.0, 1.0]
    };
    normalize_or_zero(cross(v, axis))
}
