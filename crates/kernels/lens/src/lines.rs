//! Tensor-line pass.
//!
//! Seeds tensor lines on every `seed_stride`-th grid point and integrates
//! each along the configured eigenvector family.

use serde::{Deserialize, Serialize};
use tensorfield_foundation::{CancellationToken, Field, Mat3};
use tensorfield_functions::tensor_lines::seed_indices;
use tensorfield_functions::{TensorLine, Termination, trace_tensor_line};
use tracing::{debug, info, warn};

use crate::config::TensorLineConfig;
use crate::error::{AnalysisError, Result};

/// Output of [`run_tensor_lines`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TensorLineSet {
    pub lines: Vec<TensorLine>,
    pub cancelled: bool,
}

impl TensorLineSet {
    pub fn point_count(&self) -> usize {
        self.lines.iter().map(TensorLine::len).sum()
    }
}

/// Trace tensor lines seeded on the field's grid points.
///
/// Seeds are grid points `k, 2k, …` with `index + k < len`, for stride
/// `k`. Lines with fewer than two points are dropped. A missing field, or
/// one not defined at the configured time, yields an empty set; a field
/// without a grid is a [`AnalysisError::DomainMismatch`].
pub fn run_tensor_lines<F>(
    field: Option<&F>,
    config: &TensorLineConfig,
    cancel: &CancellationToken,
) -> Result<TensorLineSet>
where
    F: Field<Value = Mat3> + ?Sized,
{
    config.validate()?;
    let Some(field) = field else {
        warn!("tensor line pass: no tensor field supplied");
        return Ok(TensorLineSet::default());
    };

    let mut evaluator = field.make_evaluator();
    if !evaluator.contains_time(config.time) {
        warn!(time = config.time, "tensor field is not defined at the requested time");
        return Ok(TensorLineSet::default());
    }

    let grid = field.domain().ok_or_else(|| {
        AnalysisError::DomainMismatch("tensor field is not defined on a grid".to_string())
    })?;
    let seeds = grid.points();
    let stride = config.stride();
    debug!(
        family = %config.family,
        h = config.step,
        stride,
        grid_points = seeds.len(),
        "starting tensor line pass"
    );

    let params = config.line_params();
    let mut result = TensorLineSet::default();

    for index in seed_indices(seeds.len(), stride) {
        if cancel.is_cancelled() {
            result.cancelled = true;
            break;
        }
        if let Some(line) = trace_tensor_line(evaluator.as_mut(), seeds[index], &params, cancel) {
            if line.termination == Termination::Cancelled {
                result.cancelled = true;
            }
            result.lines.push(line);
        }
    }

    if result.cancelled {
        info!(lines = result.lines.len(), "tensor line pass cancelled");
    } else {
        info!(
            lines = result.lines.len(),
            points = result.point_count(),
            "tensor line pass finished"
        );
    }
    Ok(result)
}
