//! Field evaluation contract.
//!
//! Fields are functions of position and time, queried through an
//! evaluator. An evaluator is positioned with [`FieldEvaluator::reset`],
//! which reports whether the point lies inside the field's support, and
//! only then read with [`FieldEvaluator::value`].

use crate::{FieldSample, FieldValue, GridDomain, Point3, Time};

/// Stateful point evaluator for a vector or tensor field.
///
/// Implementations must be deterministic: the same `(position, time)`
/// always yields the same answer.
pub trait FieldEvaluator {
    /// Value type produced by this evaluator.
    type Value: FieldValue;

    /// Position the evaluator at `(position, time)`.
    ///
    /// Returns `false` when the point lies outside the domain. The result
    /// of [`value`](Self::value) is unspecified after a failed reset.
    fn reset(&mut self, position: Point3, time: Time) -> bool;

    /// Value at the last successfully reset position.
    fn value(&self) -> Self::Value;

    /// Whether the field is defined at `time` at all.
    fn contains_time(&self, _time: Time) -> bool {
        true
    }

    /// Reset and read in one call; `None` means outside the domain.
    fn evaluate(&mut self, position: Point3, time: Time) -> Option<Self::Value> {
        if self.reset(position, time) {
            Some(self.value())
        } else {
            None
        }
    }

    /// Evaluate into a [`FieldSample`].
    fn sample(&mut self, position: Point3, time: Time) -> FieldSample {
        self.evaluate(position, time)
            .map_or(FieldSample::OutsideDomain, FieldValue::into_sample)
    }
}

/// A field that can hand out evaluators and describe its sampling domain.
pub trait Field {
    /// Value type carried by the field.
    type Value: FieldValue;

    /// Create a fresh evaluator. Each pass owns its evaluator exclusively.
    fn make_evaluator(&self) -> Box<dyn FieldEvaluator<Value = Self::Value> + '_>;

    /// Grid the field is defined on, or `None` if it is not grid-based.
    fn domain(&self) -> Option<&GridDomain>;
}

impl<E: FieldEvaluator + ?Sized> FieldEvaluator for &mut E {
    type Value = E::Value;

    fn reset(&mut self, position: Point3, time: Time) -> bool {
        (**self).reset(position, time)
    }

    fn value(&self) -> Self::Value {
        (**self).value()
    }

    fn contains_time(&self, time: Time) -> bool {
        (**self).contains_time(time)
    }
}

impl<E: FieldEvaluator + ?Sized> FieldEvaluator for Box<E> {
    type Value = E::Value;

    fn reset(&mut self, position: Point3, time: Time) -> bool {
        (**self).reset(position, time)
    }

    fn value(&self) -> Self::Value {
        (**self).value()
    }

    fn contains_time(&self, time: Time) -> bool {
        (**self).contains_time(time)
    }
}
