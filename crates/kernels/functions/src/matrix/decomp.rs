//! Symmetric Eigendecomposition
//!
//! Cyclic Jacobi rotations for real symmetric 3x3 tensors.

use serde::{Deserialize, Serialize};
use tensorfield_foundation::vector_ops::normalize_or_zero;
use tensorfield_foundation::{Mat3, Vec3};
use tracing::trace;

/// Hard cap on Jacobi rotations per decomposition.
pub const JACOBI_MAX_ITERATIONS: usize = 60;

/// Off-diagonal magnitude below which the working matrix counts as diagonal.
pub const JACOBI_OFFDIAG_EPSILON: f64 = 1e-12;

/// Eigenvalues and eigenvectors of a symmetric 3x3 tensor.
///
/// `values` are ascending (λ₁ ≤ λ₂ ≤ λ₃) and `vectors[i]` belongs to
/// `values[i]`. Each vector is unit length, or zero if the rotation
/// accumulation degenerated. Signs are arbitrary: consumers that need a
/// consistent orientation must re-orthogonalize
/// (see [`EigenFrame`](super::EigenFrame)) or enforce sign continuity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EigenDecomposition {
    pub values: [f64; 3],
    pub vectors: [Vec3; 3],
}

impl EigenDecomposition {
    /// Smallest eigenvalue and its eigenvector.
    pub fn minor(&self) -> (f64, Vec3) {
        (self.values[0], self.vectors[0])
    }

    /// Middle eigenvalue and its eigenvector.
    pub fn median(&self) -> (f64, Vec3) {
        (self.values[1], self.vectors[1])
    }

    /// Largest eigenvalue and its eigenvector.
    pub fn major(&self) -> (f64, Vec3) {
        (self.values[2], self.vectors[2])
    }

    /// Gaps between neighbouring eigenvalues: `(|λ₂−λ₁|, |λ₃−λ₂|)`.
    pub fn gaps(&self) -> (f64, f64) {
        (
            (self.values[1] - self.values[0]).abs(),
            (self.values[2] - self.values[1]).abs(),
        )
    }

    /// Eigenvalues in descending order (λ_major, λ_median, λ_minor).
    pub fn values_descending(&self) -> [f64; 3] {
        [self.values[2], self.values[1], self.values[0]]
    }

    /// `V · diag(λ) · Vᵀ`, the tensor described by this decomposition.
    pub fn reconstruct(&self) -> Mat3 {
        (0..3).fold(Mat3::ZERO, |acc, i| {
            acc.add_mat(&Mat3::outer(self.vectors[i]).scale(self.values[i]))
        })
    }
}

/// Decompose a 3x3 tensor into ascending eigenvalues and unit eigenvectors.
///
/// The input is symmetrized first by averaging `(i, j)` and `(j, i)`. Each
/// iteration zeroes the largest off-diagonal entry `(p, q)` with a Givens
/// rotation of angle `½·atan2(2·A(p,q), A(q,q) − A(p,p))` and accumulates it
/// into the eigenvector matrix by right-multiplication. Iteration stops once
/// the largest off-diagonal magnitude drops below
/// [`JACOBI_OFFDIAG_EPSILON`] or after [`JACOBI_MAX_ITERATIONS`] rotations.
///
/// Always returns a result. Hitting the iteration cap is not reported to
/// the caller; the last approximation is returned as-is.
///
/// # Determinism
/// Pure function of its input: equal inputs give bit-identical outputs.
pub fn eigendecompose(tensor: &Mat3) -> EigenDecomposition {
    let mut a = tensor.symmetrized().to_rows();
    let mut v = Mat3::IDENTITY.to_rows();

    let mut converged = false;
    for _ in 0..JACOBI_MAX_ITERATIONS {
        let (largest, p, q) = largest_off_diagonal(&a);
        if largest < JACOBI_OFFDIAG_EPSILON {
            converged = true;
            break;
        }

        let phi = 0.5 * (2.0 * a[p][q]).atan2(a[q][q] - a[p][p]);
        let (s, c) = phi.sin_cos();

        // Rows p, q then columns p, q: A' = G A Gᵀ
        for k in 0..3 {
            let apk = a[p][k];
            let aqk = a[q][k];
            a[p][k] = c * apk - s * aqk;
            a[q][k] = s * apk + c * aqk;
        }
        for row in a.iter_mut() {
            let akp = row[p];
            let akq = row[q];
            row[p] = c * akp - s * akq;
            row[q] = s * akp + c * akq;
        }
        a[p][q] = 0.0;
        a[q][p] = 0.0;

        // V = V · Gᵀ
        for row in v.iter_mut() {
            let vrp = row[p];
            let vrq = row[q];
            row[p] = c * vrp - s * vrq;
            row[q] = s * vrp + c * vrq;
        }
    }

    if !converged {
        let (residual, _, _) = largest_off_diagonal(&a);
        if residual >= JACOBI_OFFDIAG_EPSILON {
            trace!(
                residual,
                iterations = JACOBI_MAX_ITERATIONS,
                "jacobi iteration cap reached"
            );
        }
    }

    let values = [a[0][0], a[1][1], a[2][2]];
    let columns = [
        [v[0][0], v[1][0], v[2][0]],
        [v[0][1], v[1][1], v[2][1]],
        [v[0][2], v[1][2], v[2][2]],
    ];

    let mut order = [0usize, 1, 2];
    order.sort_by(|&i, &j| values[i].total_cmp(&values[j]));

    EigenDecomposition {
        values: order.map(|i| values[i]),
        vectors: order.map(|i| normalize_or_zero(columns[i])),
    }
}

/// Largest off-diagonal magnitude and its (p, q) position, p < q.
///
/// Ties keep the earlier pair in (0,1), (0,2), (1,2) order.
fn largest_off_diagonal(a: &[[f64; 3]; 3]) -> (f64, usize, usize) {
    let mut best = (a[0][1].abs(), 0, 1);
    if a[0][2].abs() > best.0 {
        best = (a[0][2].abs(), 0, 2);
    }
    if a[1][2].abs() > best.0 {
        best = (a[1][2].abs(), 1, 2);
    }
    best
}
