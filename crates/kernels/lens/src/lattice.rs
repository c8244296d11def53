//! Sampling lattices.
//!
//! Regular point lattices laid over a grid's bounding box. Probes and
//! glyphs are placed on lattice points, not on the grid's own points, so
//! their density is controlled independently of the data resolution.

use serde::{Deserialize, Serialize};
use tensorfield_foundation::{Bounds, Field, Point3};
use tracing::warn;

use crate::error::{AnalysisError, Result};

/// Extent below which an axis counts as flat and collapses to one layer.
pub const DEGENERATE_EXTENT: f64 = 1e-6;

/// Cubic lattice `origin + (i, j, k)·spacing` with `i ∈ 0..=counts[0]`, etc.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingLattice {
    pub origin: Point3,
    pub spacing: f64,
    /// Highest index per axis (inclusive).
    pub counts: [usize; 3],
}

impl SamplingLattice {
    /// Lattice for flow probes: spacing from the longest axis.
    ///
    /// `spacing = max extent / (sample_count + 1)`. Lattice points beyond a
    /// shorter axis fall outside the domain and are skipped by the caller.
    pub fn spanning_longest_axis(bounds: &Bounds, sample_count: usize) -> Self {
        let extent = bounds.extent();
        let longest = extent[0].max(extent[1]).max(extent[2]);
        Self::with_spacing(bounds, sample_count, longest)
    }

    /// Lattice for glyphs: spacing from the shortest non-flat axis.
    ///
    /// `spacing = min extent / (sample_count + 1)`, ignoring flat axes. A
    /// bounding box that is flat on every axis yields a single point.
    pub fn spanning_shortest_axis(bounds: &Bounds, sample_count: usize) -> Self {
        let shortest = bounds
            .extent()
            .into_iter()
            .filter(|e| *e >= DEGENERATE_EXTENT)
            .fold(f64::INFINITY, f64::min);
        let shortest = if shortest.is_finite() { shortest } else { 0.0 };
        Self::with_spacing(bounds, sample_count, shortest)
    }

    fn with_spacing(bounds: &Bounds, sample_count: usize, reference: f64) -> Self {
        let extent = bounds.extent();
        let count = |d: usize| {
            if extent[d] < DEGENERATE_EXTENT {
                0
            } else {
                sample_count
            }
        };
        Self {
            origin: bounds.min,
            spacing: reference / (sample_count as f64 + 1.0),
            counts: [count(0), count(1), count(2)],
        }
    }

    /// Number of lattice points, saturating at `usize::MAX`.
    pub fn len(&self) -> usize {
        self.counts
            .iter()
            .map(|c| c.saturating_add(1))
            .fold(1, usize::saturating_mul)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lattice points with x varying slowest and z fastest.
    pub fn points(&self) -> impl Iterator<Item = Point3> + '_ {
        let [nx, ny, nz] = self.counts;
        (0..=nx).flat_map(move |i| {
            (0..=ny).flat_map(move |j| (0..=nz).map(move |k| self.point(i, j, k)))
        })
    }

    fn point(&self, i: usize, j: usize, k: usize) -> Point3 {
        [
            self.origin[0] + i as f64 * self.spacing,
            self.origin[1] + j as f64 * self.spacing,
            self.origin[2] + k as f64 * self.spacing,
        ]
    }
}

/// Bounding box of the grid a field is defined on.
///
/// A field without a grid is a [`AnalysisError::DomainMismatch`]; a grid
/// without points yields `Ok(None)` and a warning.
pub(crate) fn grid_bounds<F>(field: &F, what: &str) -> Result<Option<Bounds>>
where
    F: Field + ?Sized,
{
    let domain = field
        .domain()
        .ok_or_else(|| AnalysisError::DomainMismatch(format!("{what} is not defined on a grid")))?;
    let bounds = domain.bounds();
    if bounds.is_none() {
        warn!("{what} grid has no points");
    }
    Ok(bounds)
}
