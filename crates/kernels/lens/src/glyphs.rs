//! Superquadric tensor glyph pass.
//!
//! Places one superquadric per lattice point of a tensor field. The glyph
//! is scaled by the eigenvalues, oriented along the eigenframe and shaped by
//! the Westin anisotropy of the tensor.

use serde::{Deserialize, Serialize};
use tensorfield_foundation::vector_ops::{abs, add, scale};
use tensorfield_foundation::{CancellationToken, Field, Mat3, Point3, Vec3};
use tensorfield_functions::anisotropy::MIN_EIGENVALUE;
use tensorfield_functions::{
    EigenFrame, FormParameters, GlyphMesh, GlyphPlacement, WestinMetrics, eigendecompose,
    form_parameters, tessellate, westin_metrics,
};
use tracing::{debug, info, warn};

use crate::config::GlyphConfig;
use crate::error::Result;
use crate::lattice::{SamplingLattice, grid_bounds};

/// Per-glyph attribute bundle. Its surface lives in the shared mesh at
/// `first_vertex..first_vertex + vertex_count`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TensorGlyph {
    pub center: Point3,
    /// Clamped to `>= 0`, descending.
    pub eigenvalues: [f64; 3],
    pub frame: EigenFrame,
    pub metrics: WestinMetrics,
    pub form: FormParameters,
    pub color: Vec3,
    pub first_vertex: usize,
    pub vertex_count: usize,
}

/// Output of [`run_tensor_glyphs`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlyphSet {
    pub glyphs: Vec<TensorGlyph>,
    pub mesh: GlyphMesh,
    pub cancelled: bool,
}

/// Glyph color: absolute principal eigenvector, washed towards white as
/// the tensor becomes spherical.
pub fn glyph_color(principal: Vec3, c_s: f64) -> Vec3 {
    let c_s = c_s.clamp(0.0, 1.0);
    add(scale(abs(principal), 1.0 - c_s), [c_s; 3])
}

/// Generate superquadric glyphs over the bounding box of the field's grid.
///
/// The lattice spacing is the shortest non-flat extent over
/// `sample_count + 1`; with `normalize_to_cell` it also sizes the glyphs.
/// Samples outside the domain and tensors whose
/// largest clamped eigenvalue is below `1e-9` produce no glyph.
///
/// A missing field yields an empty set; a field without a grid is a
/// [`DomainMismatch`](crate::AnalysisError::DomainMismatch).
pub fn run_tensor_glyphs<F>(
    field: Option<&F>,
    config: &GlyphConfig,
    cancel: &CancellationToken,
) -> Result<GlyphSet>
where
    F: Field<Value = Mat3> + ?Sized,
{
    config.validate()?;
    let (res_theta, res_phi) = config.resolution();
    debug!(
        gamma = config.gamma,
        res_theta,
        res_phi,
        mode = ?config.form_mode,
        normalize = config.normalize_to_cell,
        "starting tensor glyph pass"
    );

    let Some(field) = field else {
        warn!("tensor glyph pass: no tensor field supplied");
        return Ok(GlyphSet::default());
    };
    let Some(bounds) = grid_bounds(field, "tensor field")? else {
        return Ok(GlyphSet::default());
    };

    let lattice = SamplingLattice::spanning_shortest_axis(&bounds, config.sample_count);
    debug!(
        min = ?bounds.min,
        max = ?bounds.max,
        spacing = lattice.spacing,
        points = lattice.len(),
        "tensor glyph lattice"
    );

    let mut evaluator = field.make_evaluator();
    let mut result = GlyphSet::default();

    for center in lattice.points() {
        if cancel.is_cancelled() {
            info!(glyphs = result.glyphs.len(), "tensor glyph pass cancelled");
            result.cancelled = true;
            return Ok(result);
        }

        let Some(tensor) = evaluator.evaluate(center, config.time) else {
            continue;
        };

        let decomposition = eigendecompose(&tensor);
        let eigenvalues = decomposition.values_descending().map(|l| l.max(0.0));
        if eigenvalues[0] < MIN_EIGENVALUE {
            continue;
        }
        let Some(frame) = EigenFrame::from_decomposition(&decomposition) else {
            continue;
        };

        let metrics = westin_metrics(eigenvalues[0], eigenvalues[1], eigenvalues[2]);
        let form = form_parameters(&metrics, config.gamma, config.form_mode);
        let placement = GlyphPlacement {
            center,
            eigenvalues,
            frame,
            scale: config.placement_scale(eigenvalues[0], lattice.spacing),
        };
        let (first_vertex, vertex_count) =
            tessellate(&form, &placement, res_theta, res_phi, &mut result.mesh);

        result.glyphs.push(TensorGlyph {
            center,
            eigenvalues,
            frame,
            metrics,
            form,
            color: glyph_color(frame.major, metrics.c_s),
            first_vertex,
            vertex_count,
        });
    }

    info!(
        glyphs = result.glyphs.len(),
        vertices = result.mesh.vertex_count(),
        triangles = result.mesh.triangle_count(),
        "tensor glyph pass finished"
    );
    Ok(result)
}
