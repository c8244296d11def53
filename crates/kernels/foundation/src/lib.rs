//! Tensorfield Foundation
//!
//! Core value types shared by the tensorfield analysis crates: 3D vectors
//! and points, column-major 3x3 matrices, field samples, the evaluator
//! contract used to query vector and tensor fields, grid domains and the
//! cooperative cancellation token.
//!
//! Nothing in this crate interpolates or stores grid topology. Fields are
//! black boxes queried through [`FieldEvaluator`]; a [`GridDomain`] only
//! exposes the ordered sample points and their bounding box.

pub mod cancel;
pub mod field;
pub mod grid;
pub mod matrix_ops;
pub mod tensor;
pub mod value;
pub mod vector_ops;

pub use cancel::CancellationToken;
pub use field::{Field, FieldEvaluator};
pub use grid::{Bounds, GridDomain};
pub use tensor::Mat3;
pub use value::{FieldSample, FieldValue};

/// Direction or displacement in ℝ³.
pub type Vec3 = [f64; 3];

/// Position in ℝ³.
///
/// Same representation as [`Vec3`]; the alias documents intent at call sites.
pub type Point3 = [f64; 3];

/// Simulation or acquisition time at which a field is evaluated.
pub type Time = f64;
