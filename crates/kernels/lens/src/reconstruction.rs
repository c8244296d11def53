//! Field adapters.
//!
//! Concrete [`Field`] implementations the passes can run against: an
//! analytic closure restricted to a grid's bounding box, and a
//! nearest-neighbour reconstruction of values stored per grid point.

use std::ops::RangeInclusive;

use tensorfield_foundation::vector_ops::distance_sq_vec3;
use tensorfield_foundation::{Bounds, Field, FieldEvaluator, FieldValue, GridDomain, Point3, Time};

use crate::error::{AnalysisError, Result};

type FieldFn<T> = dyn Fn(Point3, Time) -> T + Send + Sync;

/// Field given by a closure of position and time.
///
/// With a grid attached, evaluation is restricted to the grid's bounding
/// box (inclusive). Without one, every point is inside, but passes that
/// need a sampling lattice reject the field.
pub struct AnalyticField<T> {
    function: Box<FieldFn<T>>,
    domain: Option<GridDomain>,
    bounds: Option<Bounds>,
    time_range: Option<RangeInclusive<Time>>,
}

impl<T: FieldValue> AnalyticField<T> {
    pub fn new(
        domain: GridDomain,
        function: impl Fn(Point3, Time) -> T + Send + Sync + 'static,
    ) -> Self {
        Self {
            function: Box::new(function),
            bounds: domain.bounds(),
            domain: Some(domain),
            time_range: None,
        }
    }

    /// Field without a grid.
    pub fn unstructured(function: impl Fn(Point3, Time) -> T + Send + Sync + 'static) -> Self {
        Self {
            function: Box::new(function),
            domain: None,
            bounds: None,
            time_range: None,
        }
    }

    /// Restrict the times the field is defined at.
    pub fn with_time_range(mut self, range: RangeInclusive<Time>) -> Self {
        self.time_range = Some(range);
        self
    }

    fn contains(&self, position: Point3) -> bool {
        match (&self.domain, &self.bounds) {
            (None, _) => true,
            (Some(_), Some(bounds)) => bounds.contains(position),
            (Some(_), None) => false,
        }
    }

    fn covers(&self, time: Time) -> bool {
        self.time_range.as_ref().is_none_or(|range| range.contains(&time))
    }
}

impl<T: FieldValue> Field for AnalyticField<T> {
    type Value = T;

    fn make_evaluator(&self) -> Box<dyn FieldEvaluator<Value = T> + '_> {
        Box::new(AnalyticEvaluator {
            field: self,
            position: [0.0; 3],
            time: 0.0,
        })
    }

    fn domain(&self) -> Option<&GridDomain> {
        self.domain.as_ref()
    }
}

struct AnalyticEvaluator<'a, T> {
    field: &'a AnalyticField<T>,
    position: Point3,
    time: Time,
}

impl<T: FieldValue> FieldEvaluator for AnalyticEvaluator<'_, T> {
    type Value = T;

    fn reset(&mut self, position: Point3, time: Time) -> bool {
        self.position = position;
        self.time = time;
        self.field.covers(time) && self.field.contains(position)
    }

    fn value(&self) -> T {
        (self.field.function)(self.position, self.time)
    }

    fn contains_time(&self, time: Time) -> bool {
        self.field.covers(time)
    }
}

/// Values stored per grid point, reconstructed by nearest neighbour.
///
/// The field is defined on the bounding box of the grid points and at a
/// single time step, so every time is accepted.
#[derive(Debug, Clone)]
pub struct SampledField<T> {
    domain: GridDomain,
    bounds: Option<Bounds>,
    values: Vec<T>,
}

impl<T: FieldValue> SampledField<T> {
    /// Pair grid points with their values.
    ///
    /// Fails with [`AnalysisError::DomainMismatch`] if the counts differ.
    pub fn new(domain: GridDomain, values: Vec<T>) -> Result<Self> {
        if values.len() != domain.len() {
            return Err(AnalysisError::DomainMismatch(format!(
                "{} values for {} grid points",
                values.len(),
                domain.len()
            )));
        }
        Ok(Self {
            bounds: domain.bounds(),
            domain,
            values,
        })
    }

    /// Sample `function` at every grid point.
    pub fn from_fn(domain: GridDomain, time: Time, function: impl Fn(Point3, Time) -> T) -> Self {
        let values = domain.points().iter().map(|p| function(*p, time)).collect();
        Self {
            bounds: domain.bounds(),
            domain,
            values,
        }
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    fn nearest(&self, position: Point3) -> Option<T> {
        let mut best: Option<(f64, usize)> = None;
        for (index, point) in self.domain.points().iter().enumerate() {
            let dist = distance_sq_vec3(*point, position);
            if best.is_none_or(|(best_dist, _)| dist < best_dist) {
                best = Some((dist, index));
            }
        }
        best.map(|(_, index)| self.values[index])
    }
}

impl<T: FieldValue> Field for SampledField<T> {
    type Value = T;

    fn make_evaluator(&self) -> Box<dyn FieldEvaluator<Value = T> + '_> {
        Box::new(SampledEvaluator {
            field: self,
            current: None,
        })
    }

    fn domain(&self) -> Option<&GridDomain> {
        Some(&self.domain)
    }
}

struct SampledEvaluator<'a, T> {
    field: &'a SampledField<T>,
    current: Option<T>,
}

impl<T: FieldValue> FieldEvaluator for SampledEvaluator<'_, T> {
    type Value = T;

    fn reset(&mut self, position: Point3, _time: Time) -> bool {
        let inside = self
            .field
            .bounds
            .is_some_and(|bounds| bounds.contains(position));
        self.current = if inside {
            self.field.nearest(position)
        } else {
            None
        };
        self.current.is_some()
    }

    fn value(&self) -> T {
        self.current.unwrap_or_default()
    }
}
