//! Tensor Line Integration
//!
//! Integral curves of one eigenvector family of a symmetric tensor field,
//! traced with fixed-step explicit Euler.
//!
//! Eigenvectors carry no intrinsic sign, so every step flips the freshly
//! selected eigenvector to agree with the previous direction. Tracing stops
//! where the requested eigenvalue becomes degenerate with a neighbour, since
//! the direction is not defined there.
//!
//! # State machine
//!
//! ```text
//! Seeded ──seed evaluates──▶ Stepping ──step──▶ Stepping
//!    │                          │
//!    └──seed outside──▶ Terminated(reason) ◀──┘
//! ```

use serde::{Deserialize, Serialize};
use tensorfield_foundation::vector_ops::{
    abs, add, add_scaled, dot, neg, norm, normalize_or_zero, sub,
};
use tensorfield_foundation::{CancellationToken, FieldEvaluator, Mat3, Point3, Time, Vec3};
use tracing::trace;

use crate::matrix::{EigenDecomposition, eigendecompose};

/// Eigenvector norm below which no direction is taken.
pub const MIN_DIRECTION_NORM: f64 = 1e-12;

/// Which eigenvector a tensor line follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EigenFamily {
    /// Eigenvector of the largest eigenvalue.
    #[default]
    Major,
    Median,
    /// Eigenvector of the smallest eigenvalue.
    Minor,
}

impl EigenFamily {
    /// `0 = major`, `1 = median`, `2 = minor`; out-of-range values clamp.
    pub fn from_index(index: i64) -> Self {
        match index.clamp(0, 2) {
            0 => EigenFamily::Major,
            1 => EigenFamily::Median,
            _ => EigenFamily::Minor,
        }
    }

    pub fn index(self) -> usize {
        match self {
            EigenFamily::Major => 0,
            EigenFamily::Median => 1,
            EigenFamily::Minor => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            EigenFamily::Major => "major",
            EigenFamily::Median => "median",
            EigenFamily::Minor => "minor",
        }
    }

    /// Eigenvector of this family from an ascending decomposition.
    pub fn eigenvector(self, decomposition: &EigenDecomposition) -> Vec3 {
        match self {
            EigenFamily::Major => decomposition.vectors[2],
            EigenFamily::Median => decomposition.vectors[1],
            EigenFamily::Minor => decomposition.vectors[0],
        }
    }

    /// Whether this family's eigenvalue is within `epsilon` of a neighbour.
    pub fn is_degenerate(self, decomposition: &EigenDecomposition, epsilon: f64) -> bool {
        let (d01, d12) = decomposition.gaps();
        match self {
            EigenFamily::Major => d12 < epsilon,
            EigenFamily::Minor => d01 < epsilon,
            EigenFamily::Median => d01 < epsilon || d12 < epsilon,
        }
    }
}

impl std::fmt::Display for EigenFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Integration parameters for a single tensor line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineParams {
    pub family: EigenFamily,
    /// Euler step `h`; may be negative to trace backwards.
    pub step: f64,
    pub max_length: f64,
    pub max_steps: usize,
    pub degeneracy_epsilon: f64,
    pub time: Time,
}

impl Default for LineParams {
    fn default() -> Self {
        Self {
            family: EigenFamily::Major,
            step: 0.05,
            max_length: 200.0,
            max_steps: 1000,
            degeneracy_epsilon: 1e-4,
            time: 0.0,
        }
    }
}

/// Why a tensor line stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// The seed, the current point or the next point left the domain.
    OutsideDomain,
    /// The followed eigenvalue is degenerate with a neighbour.
    Degenerate,
    /// The selected eigenvector vanished.
    ZeroDirection,
    MaxLength,
    MaxSteps,
    Cancelled,
}

/// Lifecycle of one tracer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TracerState {
    Seeded,
    Stepping,
    Terminated(Termination),
}

impl TracerState {
    pub fn is_terminated(&self) -> bool {
        matches!(self, TracerState::Terminated(_))
    }
}

/// A finished tensor line with at least two points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TensorLine {
    pub family: EigenFamily,
    pub points: Vec<Point3>,
    /// Accumulated arc length, `|h|` per accepted step.
    pub length: f64,
    pub termination: Termination,
    /// See [`line_color`].
    pub color: Vec3,
}

impl TensorLine {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Direction to step along for `family`, continuous with `previous`.
///
/// Fails with [`Termination::Degenerate`] when the family's eigenvalue is
/// within `degeneracy_epsilon` of a neighbour, and with
/// [`Termination::ZeroDirection`] when the eigenvector vanished. The result
/// is unit length and never points against `previous`.
pub fn select_direction(
    decomposition: &EigenDecomposition,
    family: EigenFamily,
    previous: Option<Vec3>,
    degeneracy_epsilon: f64,
) -> Result<Vec3, Termination> {
    if family.is_degenerate(decomposition, degeneracy_epsilon) {
        return Err(Termination::Degenerate);
    }

    let direction = normalize_or_zero(family.eigenvector(decomposition));
    if norm(direction) < MIN_DIRECTION_NORM {
        return Err(Termination::ZeroDirection);
    }

    match previous {
        Some(prev) if dot(prev, direction) < 0.0 => Ok(neg(direction)),
        _ => Ok(direction),
    }
}

/// Per-line color: mean absolute segment direction, scaled so its largest
/// component is 1. Zero for lines without extent.
pub fn line_color(points: &[Point3]) -> Vec3 {
    let sum = points
        .windows(2)
        .map(|pair| abs(normalize_or_zero(sub(pair[1], pair[0]))))
        .fold([0.0; 3], add);
    let largest = sum[0].max(sum[1]).max(sum[2]);
    if largest <= 0.0 {
        return [0.0; 3];
    }
    [sum[0] / largest, sum[1] / largest, sum[2] / largest]
}

/// Explicit state machine tracing one tensor line from a seed.
#[derive(Debug, Clone)]
pub struct TensorLineTracer {
    params: LineParams,
    state: TracerState,
    position: Point3,
    previous: Option<Vec3>,
    points: Vec<Point3>,
    length: f64,
    steps: usize,
}

impl TensorLineTracer {
    pub fn new(seed: Point3, params: LineParams) -> Self {
        Self {
            params,
            state: TracerState::Seeded,
            position: seed,
            previous: None,
            points: Vec::new(),
            length: 0.0,
            steps: 0,
        }
    }

    pub fn state(&self) -> TracerState {
        self.state
    }

    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    /// Advance the state machine by one transition.
    ///
    /// From `Seeded` the seed is checked and recorded. From `Stepping` one
    /// Euler step is attempted; the step is only recorded when the new point
    /// is inside the domain. `Terminated` is absorbing.
    pub fn step<E>(&mut self, evaluator: &mut E, cancel: &CancellationToken) -> TracerState
    where
        E: FieldEvaluator<Value = Mat3> + ?Sized,
    {
        let current = self.state;
        self.state = match current {
            TracerState::Seeded => self.enter(evaluator),
            TracerState::Stepping => self.advance(evaluator, cancel),
            terminated @ TracerState::Terminated(_) => terminated,
        };
        if let (false, TracerState::Terminated(reason)) = (current.is_terminated(), self.state) {
            trace!(?reason, points = self.points.len(), "tensor line terminated");
        }
        self.state
    }

    /// Step until the tracer terminates and return the reason.
    pub fn run<E>(&mut self, evaluator: &mut E, cancel: &CancellationToken) -> Termination
    where
        E: FieldEvaluator<Value = Mat3> + ?Sized,
    {
        loop {
            if let TracerState::Terminated(reason) = self.step(evaluator, cancel) {
                return reason;
            }
        }
    }

    /// Finished line, or `None` if the tracer is still running or recorded
    /// fewer than two points.
    pub fn finish(self) -> Option<TensorLine> {
        let TracerState::Terminated(termination) = self.state else {
            return None;
        };
        if self.points.len() < 2 {
            return None;
        }
        Some(TensorLine {
            family: self.params.family,
            color: line_color(&self.points),
            points: self.points,
            length: self.length,
            termination,
        })
    }

    fn enter<E>(&mut self, evaluator: &mut E) -> TracerState
    where
        E: FieldEvaluator<Value = Mat3> + ?Sized,
    {
        if !evaluator.reset(self.position, self.params.time) {
            return TracerState::Terminated(Termination::OutsideDomain);
        }
        self.points.push(self.position);
        TracerState::Stepping
    }

    fn advance<E>(&mut self, evaluator: &mut E, cancel: &CancellationToken) -> TracerState
    where
        E: FieldEvaluator<Value = Mat3> + ?Sized,
    {
        let params = &self.params;
        if cancel.is_cancelled() {
            return TracerState::Terminated(Termination::Cancelled);
        }
        if self.steps >= params.max_steps {
            return TracerState::Terminated(Termination::MaxSteps);
        }

        let Some(tensor) = evaluator.evaluate(self.position, params.time) else {
            return TracerState::Terminated(Termination::OutsideDomain);
        };
        let decomposition = eigendecompose(&tensor);
        let direction = match select_direction(
            &decomposition,
            params.family,
            self.previous,
            params.degeneracy_epsilon,
        ) {
            Ok(direction) => direction,
            Err(reason) => return TracerState::Terminated(reason),
        };
        self.previous = Some(direction);

        let next = add_scaled(self.position, direction, params.step);
        if !evaluator.reset(next, params.time) {
            return TracerState::Terminated(Termination::OutsideDomain);
        }

        self.position = next;
        self.points.push(next);
        self.steps += 1;
        self.length += params.step.abs();

        if self.length >= params.max_length {
            return TracerState::Terminated(Termination::MaxLength);
        }
        TracerState::Stepping
    }
}

/// Trace one line from `seed`; `None` if it has fewer than two points.
pub fn trace_tensor_line<E>(
    evaluator: &mut E,
    seed: Point3,
    params: &LineParams,
    cancel: &CancellationToken,
) -> Option<TensorLine>
where
    E: FieldEvaluator<Value = Mat3> + ?Sized,
{
    let mut tracer = TensorLineTracer::new(seed, *params);
    tracer.run(evaluator, cancel);
    tracer.finish()
}

/// Seed indices `k, 2k, 3k, …` while `index + k < seed_count`.
///
/// Skips the first and last samples of the seed list. A stride of zero is
/// treated as one.
pub fn seed_indices(seed_count: usize, stride: usize) -> impl Iterator<Item = usize> {
    let stride = stride.max(1);
    (stride..seed_count.saturating_sub(stride)).step_by(stride)
}
