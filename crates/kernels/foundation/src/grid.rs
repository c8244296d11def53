//! Grid domains.
//!
//! A grid domain is the ordered list of sample points a field is defined
//! on. The analysis passes use it only to derive sampling lattices and seed
//! sets; point location and interpolation belong to the field itself.

use serde::{Deserialize, Serialize};

use crate::{Point3, Vec3};

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Point3,
    pub max: Point3,
}

impl Bounds {
    /// Bounding box of a point set, `None` when the set is empty.
    pub fn from_points(points: &[Point3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut bounds = Bounds {
            min: *first,
            max: *first,
        };
        for p in rest {
            for d in 0..3 {
                bounds.min[d] = bounds.min[d].min(p[d]);
                bounds.max[d] = bounds.max[d].max(p[d]);
            }
        }
        Some(bounds)
    }

    /// Edge lengths along x, y and z.
    pub fn extent(&self) -> Vec3 {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }

    /// Inclusive containment test.
    pub fn contains(&self, p: Point3) -> bool {
        (0..3).all(|d| p[d] >= self.min[d] && p[d] <= self.max[d])
    }
}

/// Ordered sample points of a structured or unstructured grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridDomain {
    points: Vec<Point3>,
    bounds: Option<Bounds>,
}

impl GridDomain {
    /// Wrap an ordered point list.
    pub fn new(points: Vec<Point3>) -> Self {
        let bounds = Bounds::from_points(&points);
        Self { points, bounds }
    }

    /// Regular lattice with `dims` points per axis spanning `[min, max]`.
    ///
    /// Points are ordered x-fastest, then y, then z. An axis with a single
    /// point sits at `min` on that axis.
    pub fn uniform(dims: [usize; 3], min: Point3, max: Point3) -> Self {
        let coord = |d: usize, i: usize| {
            if dims[d] <= 1 {
                min[d]
            } else {
                min[d] + (max[d] - min[d]) * i as f64 / (dims[d] - 1) as f64
            }
        };

        let mut points = Vec::with_capacity(dims[0] * dims[1] * dims[2]);
        for k in 0..dims[2] {
            for j in 0..dims[1] {
                for i in 0..dims[0] {
                    points.push([coord(0, i), coord(1, j), coord(2, k)]);
                }
            }
        }
        Self::new(points)
    }

    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Bounding box of all points, `None` for an empty grid.
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }
}
