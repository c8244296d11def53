//! Matrix Operations (Shared Implementation)
//!
//! Low-level 3x3 matrix operations backing [`crate::Mat3`].
//! All matrices use column-major storage:
//! `[m00, m10, m20, m01, m11, m21, m02, m12, m22]`.

/// Matrix-matrix multiplication for 3x3 matrices.
#[inline]
pub fn mat3_mul(a: [f64; 9], b: [f64; 9]) -> [f64; 9] {
    let mut result = [0.0; 9];
    for col in 0..3 {
        for row in 0..3 {
            let mut sum = 0.0;
            for k in 0..3 {
                sum += a[k * 3 + row] * b[col * 3 + k];
            }
            result[col * 3 + row] = sum;
        }
    }
    result
}

/// Transform a 3D vector by a 3x3 matrix.
#[inline]
pub fn mat3_transform(m: [f64; 9], v: [f64; 3]) -> [f64; 3] {
    [
        m[0] * v[0] + m[3] * v[1] + m[6] * v[2], // row 0
        m[1] * v[0] + m[4] * v[1] + m[7] * v[2], // row 1
        m[2] * v[0] + m[5] * v[1] + m[8] * v[2], // row 2
    ]
}

/// Transpose of a 3x3 matrix.
#[inline]
pub fn mat3_transpose(m: [f64; 9]) -> [f64; 9] {
    [m[0], m[3], m[6], m[1], m[4], m[7], m[2], m[5], m[8]]
}

/// Sum of the diagonal.
#[inline]
pub fn mat3_trace(m: [f64; 9]) -> f64 {
    m[0] + m[4] + m[8]
}

/// Largest absolute entry difference between two matrices.
#[inline]
pub fn mat3_max_abs_diff(a: [f64; 9], b: [f64; 9]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mat3_mul_identity() {
        let id = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];
        let m = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0];
        assert_eq!(mat3_mul(id, m), m);
        assert_eq!(mat3_mul(m, id), m);
    }

    #[test]
    fn test_mat3_transform_column_major() {
        // Column 0 is (1, 2, 3), so transforming e_x picks it out
        let m = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0];
        assert_eq!(mat3_transform(m, [1.0, 0.0, 0.0]), [1.0, 2.0, 3.0]);
        assert_eq!(mat3_transform(m, [0.0, 0.0, 1.0]), [7.0, 8.0, 9.0]);
    }

    #[test]
    fn test_mat3_transpose_and_trace() {
        let m = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0];
        assert_eq!(
            mat3_transpose(m),
            [1.0, 4.0, 7.0, 2.0, 5.0, 8.0, 3.0, 6.0, 9.0]
        );
        assert_eq!(mat3_trace(m), 15.0);
        assert_eq!(mat3_max_abs_diff(m, mat3_transpose(m)), 4.0);
    }
}
