//! Matrix Operations
//!
//! Symmetric eigendecomposition and the eigenframes derived from it.

mod basic;
mod decomp;

pub use basic::EigenFrame;
pub use decomp::{
    EigenDecomposition, JACOBI_MAX_ITERATIONS, JACOBI_OFFDIAG_EPSILON, eigendecompose,
};
