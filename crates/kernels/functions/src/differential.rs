//! Finite-Difference Differential Operators
//!
//! Local differential quantities of a vector field: Jacobian, divergence,
//! curl, acceleration along the flow and a curvature vector.
//!
//! All quantities are built from central differences of the field around
//! the query point. Probes that fall outside the field's domain contribute
//! a zero vector to their difference term instead of failing the query,
//! which biases gradients near domain boundaries.

use serde::{Deserialize, Serialize};
use tensorfield_foundation::vector_ops::{dot, norm, norm_sq, scale, sub};
use tensorfield_foundation::{FieldEvaluator, Mat3, Point3, Time, Vec3};

/// Default finite-difference step.
pub const DEFAULT_DIFFERENCE_STEP: f64 = 1e-4;

/// Velocity magnitude below which the curvature vector is zero.
pub const MIN_DIRECTION_NORM: f64 = 1e-9;

/// Local differential quantities at one point of a vector field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifferentialQuantities {
    /// Field value `v` at the point (zero when outside the domain).
    pub velocity: Vec3,
    /// `a = J · v`.
    pub acceleration: Vec3,
    /// `J(i, j) = ∂vᵢ/∂xⱼ`.
    pub jacobian: Mat3,
    /// `tr(J)`.
    pub divergence: f64,
    pub curl: Vec3,
    /// See [`curvature_vector`].
    pub curvature: Vec3,
}

/// Field value at `position`, or zero when the point is outside the domain.
fn value_or_zero<E>(evaluator: &mut E, position: Point3, time: Time) -> Vec3
where
    E: FieldEvaluator<Value = Vec3> + ?Sized,
{
    evaluator.evaluate(position, time).unwrap_or([0.0, 0.0, 0.0])
}

/// Jacobian by central differences with step `h` along each axis.
///
/// Six evaluations at `p ± h·eⱼ`; column `j` holds `∂v/∂xⱼ`.
pub fn jacobian<E>(evaluator: &mut E, p: Point3, time: Time, h: f64) -> Mat3
where
    E: FieldEvaluator<Value = Vec3> + ?Sized,
{
    let mut columns = [[0.0; 3]; 3];
    for (axis, column) in columns.iter_mut().enumerate() {
        let mut forward = p;
        let mut backward = p;
        forward[axis] += h;
        backward[axis] -= h;

        let v_plus = value_or_zero(evaluator, forward, time);
        let v_minus = value_or_zero(evaluator, backward, time);
        *column = scale(sub(v_plus, v_minus), 1.0 / (2.0 * h));
    }
    Mat3::from_columns(columns[0], columns[1], columns[2])
}

/// `J₀₀ + J₁₁ + J₂₂`.
pub fn divergence(jacobian: &Mat3) -> f64 {
    jacobian.trace()
}

/// `(J₂₁ − J₁₂, J₀₂ − J₂₀, J₁₀ − J₀₁)`.
pub fn curl(jacobian: &Mat3) -> Vec3 {
    let j = jacobian;
    [
        j.get(2, 1) - j.get(1, 2),
        j.get(0, 2) - j.get(2, 0),
        j.get(1, 0) - j.get(0, 1),
    ]
}

/// Curvature vector `(a − v·(v·a/|v|²)) / |v|`.
///
/// This is the component of the acceleration normal to the flow, divided
/// by the speed. It is used for local shaft bending of probe glyphs and is
/// NOT the textbook curvature `|v × a| / |v|³`; validating against analytic
/// curvature requires an extra division by `|v|²`.
///
/// Returns zero when `|v|` is below [`MIN_DIRECTION_NORM`].
pub fn curvature_vector(velocity: Vec3, acceleration: Vec3) -> Vec3 {
    let speed = norm(velocity);
    if speed < MIN_DIRECTION_NORM {
        return [0.0, 0.0, 0.0];
    }
    let along = dot(velocity, acceleration) / norm_sq(velocity);
    scale(sub(acceleration, scale(velocity, along)), 1.0 / speed)
}

/// All differential quantities of a vector field at `p`.
///
/// Evaluates the field at `p` itself (for velocity, acceleration and
/// curvature) and at the six central-difference probes. Deterministic given
/// the evaluator's answers; never fails.
pub fn compute_differentials<E>(
    evaluator: &mut E,
    p: Point3,
    time: Time,
    h: f64,
) -> DifferentialQuantities
where
    E: FieldEvaluator<Value = Vec3> + ?Sized,
{
    let velocity = value_or_zero(evaluator, p, time);
    let jacobian = jacobian(evaluator, p, time, h);
    let acceleration = jacobian.transform(velocity);

    DifferentialQuantities {
        velocity,
        acceleration,
        jacobian,
        divergence: divergence(&jacobian),
        curl: curl(&jacobian),
        curvature: curvature_vector(velocity, acceleration),
    }
}
