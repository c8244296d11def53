//! Tensor Field Numerical Core
//!
//! Pure numerical building blocks for analysing vector and tensor fields:
//!
//! - [`differential`]: finite-difference Jacobian, divergence, curl and
//!   curvature of a vector field
//! - [`matrix`]: Jacobi eigensolver for symmetric 3x3 tensors and the
//!   right-handed eigenframes derived from it
//! - [`anisotropy`]: Westin metrics and superquadric form exponents
//! - [`superquadric`]: glyph surface, data-space placement, tessellation
//! - [`tensor_lines`]: eigenvector integral curves with sign continuity
//!
//! Everything here is infallible and deterministic. Conditions such as
//! points outside the domain or degenerate eigenvalues come back as zero
//! fallbacks, `Option`s or [`tensor_lines::Termination`] reasons.

pub mod anisotropy;
pub mod differential;
pub mod matrix;
pub mod superquadric;
pub mod tensor_lines;

pub use anisotropy::{FormMode, FormParameters, WestinMetrics, form_parameters, westin_metrics};
pub use differential::{DifferentialQuantities, compute_differentials};
pub use matrix::{EigenDecomposition, EigenFrame, eigendecompose};
pub use superquadric::{GlyphMesh, GlyphPlacement, tessellate, to_data_space};
pub use tensor_lines::{
    EigenFamily, LineParams, TensorLine, TensorLineTracer, Termination, TracerState,
    trace_tensor_line,
};
