//! Built-in analytic fields.
//!
//! Every field is attached to a uniform cube grid `[-extent, extent]³`
//! with `dims` points per axis, so the passes can derive their lattices
//! and seeds from it.

use tensorfield_foundation::vector_ops::normalize_or_zero;
use tensorfield_foundation::{Field, FieldSample, GridDomain, Mat3, Point3, Time, Vec3};
use tensorfield_lens::AnalyticField;

use crate::error::{Result, ToolError};

pub const VECTOR_FIELDS: &[&str] = &["uniform", "vortex", "saddle", "source"];
pub const TENSOR_FIELDS: &[&str] = &["isotropic", "helix", "planar", "shear"];

/// Cube grid the built-in fields are defined on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    pub dims: usize,
    pub extent: f64,
}

impl GridSpec {
    pub fn domain(&self) -> Result<GridDomain> {
        if self.dims == 0 {
            return Err(ToolError::InvalidGrid("dims must be >= 1".to_string()));
        }
        if !self.extent.is_finite() || self.extent <= 0.0 {
            return Err(ToolError::InvalidGrid(format!(
                "extent must be a positive number, got {}",
                self.extent
            )));
        }
        let e = self.extent;
        Ok(GridDomain::uniform([self.dims; 3], [-e, -e, -e], [e, e, e]))
    }
}

fn unknown(kind: &'static str, name: &str, available: &[&str]) -> ToolError {
    ToolError::UnknownField {
        kind,
        name: name.to_string(),
        available: available.join(", "),
    }
}

/// Look up a built-in vector field by name.
pub fn vector_field(name: &str, grid: &GridSpec) -> Result<AnalyticField<Vec3>> {
    let function: fn(Point3) -> Vec3 = match name {
        "uniform" => |_| [1.0, 0.0, 0.0],
        "vortex" => |p| [-p[1], p[0], 0.0],
        "saddle" => |p| [p[0], -p[1], 0.0],
        "source" => |p| p,
        _ => return Err(unknown("vector", name, VECTOR_FIELDS)),
    };
    Ok(AnalyticField::new(grid.domain()?, move |p: Point3, _: Time| {
        function(p)
    }))
}

/// Look up a built-in tensor field by name.
pub fn tensor_field(name: &str, grid: &GridSpec) -> Result<AnalyticField<Mat3>> {
    let function: fn(Point3) -> Mat3 = match name {
        "isotropic" => |_| Mat3::IDENTITY,
        // major axis follows a helix winding around z
        "helix" => |p| {
            let tangent = normalize_or_zero([-p[1], p[0], 0.5]);
            Mat3::scaled_identity(0.1).add_mat(&Mat3::outer(tangent))
        },
        "planar" => |_| Mat3::diagonal([1.0, 1.0, 0.1]),
        "shear" => |_| {
            Mat3::from_rows([[1.0, 0.5, 0.0], [0.5, 1.0, 0.0], [0.0, 0.0, 0.2]])
        },
        _ => return Err(unknown("tensor", name, TENSOR_FIELDS)),
    };
    Ok(AnalyticField::new(grid.domain()?, move |p: Point3, _: Time| {
        function(p)
    }))
}

/// Evaluate any built-in field at one point.
pub fn sample_field(name: &str, grid: &GridSpec, at: Point3, time: Time) -> Result<FieldSample> {
    if VECTOR_FIELDS.contains(&name) {
        let field = vector_field(name, grid)?;
        return Ok(field.make_evaluator().sample(at, time));
    }
    if TENSOR_FIELDS.contains(&name) {
        let field = tensor_field(name, grid)?;
        return Ok(field.make_evaluator().sample(at, time));
    }
    let all: Vec<&str> = VECTOR_FIELDS.iter().chain(TENSOR_FIELDS).copied().collect();
    Err(unknown("built-in", name, &all))
}
