//! Flow-probe pass.
//!
//! Samples a vector field on a regular lattice and records the local
//! differential quantities at every point where the flow is non-stagnant.

use serde::{Deserialize, Serialize};
use tensorfield_foundation::vector_ops::norm;
use tensorfield_foundation::{CancellationToken, Field, Mat3, Point3, Vec3};
use tensorfield_functions::compute_differentials;
use tensorfield_functions::differential::MIN_DIRECTION_NORM;
use tracing::{debug, info, warn};

use crate::config::ProbeConfig;
use crate::error::Result;
use crate::lattice::{SamplingLattice, grid_bounds};

/// Attribute bundle of one flow probe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProbeSample {
    pub position: Point3,
    pub velocity: Vec3,
    /// `J · v`
    pub acceleration: Vec3,
    pub jacobian: Mat3,
    pub divergence: f64,
    pub curl: Vec3,
    pub curvature: Vec3,
}

/// Output of [`run_flow_probes`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowProbeSet {
    pub samples: Vec<ProbeSample>,
    /// Set when cancellation cut the pass short; `samples` holds what was
    /// computed until then.
    pub cancelled: bool,
}

/// Compute flow probes over the bounding box of the field's grid.
///
/// The lattice spacing is the longest extent over `sample_count + 1`.
/// Lattice points outside the domain or with `|v| < 1e-9` are skipped.
///
/// A missing field yields an empty set; a field without a grid is a
/// [`DomainMismatch`](crate::AnalysisError::DomainMismatch).
pub fn run_flow_probes<F>(
    field: Option<&F>,
    config: &ProbeConfig,
    cancel: &CancellationToken,
) -> Result<FlowProbeSet>
where
    F: Field<Value = Vec3> + ?Sized,
{
    config.validate()?;
    debug!(
        sample_count = config.sample_count,
        h = config.step_size,
        "starting flow probe pass"
    );

    let Some(field) = field else {
        warn!("flow probe pass: no vector field supplied");
        return Ok(FlowProbeSet::default());
    };
    let Some(bounds) = grid_bounds(field, "vector field")? else {
        return Ok(FlowProbeSet::default());
    };

    let lattice = SamplingLattice::spanning_longest_axis(&bounds, config.sample_count);
    debug!(
        min = ?bounds.min,
        max = ?bounds.max,
        spacing = lattice.spacing,
        counts = ?lattice.counts,
        "flow probe lattice"
    );

    let mut evaluator = field.make_evaluator();
    let mut result = FlowProbeSet::default();

    for position in lattice.points() {
        if cancel.is_cancelled() {
            info!(samples = result.samples.len(), "flow probe pass cancelled");
            result.cancelled = true;
            return Ok(result);
        }

        let Some(velocity) = evaluator.evaluate(position, config.time) else {
            continue;
        };
        if norm(velocity) < MIN_DIRECTION_NORM {
            continue;
        }

        let d = compute_differentials(evaluator.as_mut(), position, config.time, config.step_size);
        result.samples.push(ProbeSample {
            position,
            velocity: d.velocity,
            acceleration: d.acceleration,
            jacobian: d.jacobian,
            divergence: d.divergence,
            curl: d.curl,
            curvature: d.curvature,
        });
    }

    if result.samples.is_empty() {
        warn!("flow probe pass produced no samples; the field may vanish everywhere");
    }
    info!(samples = result.samples.len(), "flow probe pass finished");
    Ok(result)
}
