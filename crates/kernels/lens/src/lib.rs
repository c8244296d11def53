//! Tensor Field Lens
//!
//! Sampling and tracing passes over grid-backed vector and tensor fields.
//!
//! Each pass takes an optional field, a validated configuration and a
//! cancellation token, and returns a self-contained result set:
//!
//! - [`run_flow_probes`]: differential quantities of a vector field on a
//!   regular lattice
//! - [`run_tensor_glyphs`]: superquadric glyph meshes of a tensor field
//! - [`run_tensor_lines`]: eigenvector integral curves seeded on the grid
//!
//! Passes are single-threaded and own their evaluator exclusively. The
//! cancellation token is polled once per lattice point or integration
//! step; a cancelled pass returns everything computed so far with
//! `cancelled` set.

mod config;
mod error;
mod glyphs;
mod lattice;
mod lines;
mod probe;
mod reconstruction;

pub use config::{
    GlyphConfig, MAX_GLYPH_RESOLUTION, MIN_GLYPH_RESOLUTION, ProbeConfig, TensorLineConfig,
};
pub use error::{AnalysisError, Result};
pub use glyphs::{GlyphSet, TensorGlyph, glyph_color, run_tensor_glyphs};
pub use lattice::{DEGENERATE_EXTENT, SamplingLattice};
pub use lines::{TensorLineSet, run_tensor_lines};
pub use probe::{FlowProbeSet, ProbeSample, run_flow_probes};
pub use reconstruction::{AnalyticField, SampledField};

#[cfg(test)]
mod tests;
