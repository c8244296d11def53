use serde::{Deserialize, Serialize};

use crate::{Mat3, Vec3};

/// Result of evaluating a field at a point and time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FieldSample {
    /// Vector value (e.g., velocity).
    Vector(Vec3),
    /// Second-order tensor value (e.g., diffusion tensor).
    Tensor(Mat3),
    /// The query point lies outside the field's support.
    OutsideDomain,
}

impl FieldSample {
    /// Attempt to get the sample as a vector.
    pub fn as_vector(&self) -> Option<Vec3> {
        match self {
            FieldSample::Vector(v) => Some(*v),
            _ => None,
        }
    }

    /// Attempt to get the sample as a tensor.
    pub fn as_tensor(&self) -> Option<Mat3> {
        match self {
            FieldSample::Tensor(t) => Some(*t),
            _ => None,
        }
    }

    pub fn is_outside(&self) -> bool {
        matches!(self, FieldSample::OutsideDomain)
    }
}

/// Value types a field may carry.
pub trait FieldValue: Copy + Default + Send + Sync + 'static {
    /// Wrap the value into a [`FieldSample`].
    fn into_sample(self) -> FieldSample;
}

impl FieldValue for Vec3 {
    fn into_sample(self) -> FieldSample {
        FieldSample::Vector(self)
    }
}

impl FieldValue for Mat3 {
    fn into_sample(self) -> FieldSample {
        FieldSample::Tensor(self)
    }
}
