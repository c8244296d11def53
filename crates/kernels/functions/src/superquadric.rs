//! Superquadric Glyph Surfaces
//!
//! Parametric superquadric surface in unit space, its placement into data
//! space along a tensor's eigenframe, and tessellation into a triangle mesh.
//!
//! Unit-space axes map onto the eigenframe as x ↦ minor, y ↦ medium,
//! z ↦ major; the φ sweep therefore runs towards the principal eigenvector.

use std::f64::consts::{FRAC_PI_2, PI};

use serde::{Deserialize, Serialize};
use tensorfield_foundation::vector_ops::{add, normalize_or_zero};
use tensorfield_foundation::{Point3, Vec3};

use crate::anisotropy::FormParameters;
use crate::matrix::EigenFrame;

/// Sign with `sgn(0) = 1`.
pub fn sgn(x: f64) -> f64 {
    if x >= 0.0 { 1.0 } else { -1.0 }
}

/// `sgn(x)·|x|^e`
fn signed_pow(x: f64, exponent: f64) -> f64 {
    sgn(x) * x.abs().powf(exponent)
}

/// Point on the unit superquadric at `θ ∈ [−π, π]`, `φ ∈ [−π/2, π/2]`.
///
/// ```text
/// x = sgn(cos φ)|cos φ|^α · sgn(cos θ)|cos θ|^β
/// y = sgn(cos φ)|cos φ|^α · sgn(sin θ)|sin θ|^β
/// z = sgn(sin φ)|sin φ|^α
/// ```
pub fn superquadric_point(theta: f64, phi: f64, alpha: f64, beta: f64) -> Vec3 {
    let (sin_theta, cos_theta) = theta.sin_cos();
    let (sin_phi, cos_phi) = phi.sin_cos();

    let ring = signed_pow(cos_phi, alpha);
    [
        ring * signed_pow(cos_theta, beta),
        ring * signed_pow(sin_theta, beta),
        signed_pow(sin_phi, alpha),
    ]
}

/// Unit-space outward normal: the point formula with exponents
/// `(2 − α, 2 − β)`, normalized (zero if it vanishes).
pub fn superquadric_normal(theta: f64, phi: f64, alpha: f64, beta: f64) -> Vec3 {
    normalize_or_zero(superquadric_point(theta, phi, 2.0 - alpha, 2.0 - beta))
}

/// Unit-space surface point with its outward normal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SuperquadricSample {
    pub position: Vec3,
    pub normal: Vec3,
}

impl SuperquadricSample {
    pub fn at(theta: f64, phi: f64, form: &FormParameters) -> Self {
        Self {
            position: superquadric_point(theta, phi, form.alpha, form.beta),
            normal: superquadric_normal(theta, phi, form.alpha, form.beta),
        }
    }
}

/// Per-axis semi-axis lengths `(scale·λ_minor, scale·λ_mid, scale·λ_major)`
/// for eigenvalues given in descending order.
fn semi_axes(eigenvalues: [f64; 3], glyph_scale: f64) -> Vec3 {
    [
        glyph_scale * eigenvalues[2],
        glyph_scale * eigenvalues[1],
        glyph_scale * eigenvalues[0],
    ]
}

/// Map a unit-space point into data space.
///
/// `eigenvalues` are descending (λ_major, λ_mid, λ_minor). The unit x, y, z
/// axes are scaled by `glyph_scale` times λ_minor, λ_mid, λ_major, rotated
/// onto the frame's minor, medium and major eigenvectors, and translated to
/// `center`.
pub fn to_data_space(
    unit: Vec3,
    eigenvalues: [f64; 3],
    frame: &EigenFrame,
    center: Point3,
    glyph_scale: f64,
) -> Point3 {
    let s = semi_axes(eigenvalues, glyph_scale);
    let local = [unit[0] * s[0], unit[1] * s[1], unit[2] * s[2]];
    add(center, frame.rotation().transform(local))
}

/// Map a unit-space normal into data space.
///
/// Normals transform with the inverse transpose of the placement; the
/// cofactor scaling `(s_y·s_z, s_x·s_z, s_x·s_y)` is that up to a positive
/// factor and stays defined when an eigenvalue is zero.
pub fn normal_to_data_space(
    unit_normal: Vec3,
    eigenvalues: [f64; 3],
    frame: &EigenFrame,
    glyph_scale: f64,
) -> Vec3 {
    let s = semi_axes(eigenvalues, glyph_scale);
    let local = [
        unit_normal[0] * s[1] * s[2],
        unit_normal[1] * s[0] * s[2],
        unit_normal[2] * s[0] * s[1],
    ];
    normalize_or_zero(frame.rotation().transform(local))
}

/// Where and how large one glyph sits in data space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphPlacement {
    pub center: Point3,
    /// Descending.
    pub eigenvalues: [f64; 3],
    pub frame: EigenFrame,
    pub scale: f64,
}

impl GlyphPlacement {
    pub fn place(&self, sample: &SuperquadricSample) -> (Point3, Vec3) {
        (
            to_data_space(
                sample.position,
                self.eigenvalues,
                &self.frame,
                self.center,
                self.scale,
            ),
            normal_to_data_space(sample.normal, self.eigenvalues, &self.frame, self.scale),
        )
    }
}

/// Triangle mesh accumulating the surfaces of many glyphs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlyphMesh {
    pub vertices: Vec<Point3>,
    pub normals: Vec<Vec3>,
    /// Indices into `vertices`.
    pub triangles: Vec<[usize; 3]>,
}

impl GlyphMesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Append one superquadric glyph to `mesh`.
///
/// θ sweeps `[−π, π]` in `resolution_theta` steps and φ sweeps
/// `[−π/2, π/2]` in `resolution_phi` steps, giving
/// `(resolution_theta + 1)·(resolution_phi + 1)` vertices laid out θ-major.
/// Each grid quad is split into the triangles `(00, 01, 10)` and
/// `(01, 11, 10)`. Resolutions of zero are raised to one.
///
/// Returns the index of the first appended vertex and the number appended.
pub fn tessellate(
    form: &FormParameters,
    placement: &GlyphPlacement,
    resolution_theta: usize,
    resolution_phi: usize,
    mesh: &mut GlyphMesh,
) -> (usize, usize) {
    let res_theta = resolution_theta.max(1);
    let res_phi = resolution_phi.max(1);
    let first = mesh.vertices.len();
    let stride = res_phi + 1;

    for i in 0..=res_theta {
        let theta = -PI + (2.0 * PI * i as f64) / res_theta as f64;
        for j in 0..=res_phi {
            let phi = -FRAC_PI_2 + (PI * j as f64) / res_phi as f64;
            let (vertex, normal) = placement.place(&SuperquadricSample::at(theta, phi, form));
            mesh.vertices.push(vertex);
            mesh.normals.push(normal);
        }
    }

    for i in 0..res_theta {
        for j in 0..res_phi {
            let idx00 = first + i * stride + j;
            let idx01 = idx00 + 1;
            let idx10 = first + (i + 1) * stride + j;
            let idx11 = idx10 + 1;
            mesh.triangles.push([idx00, idx01, idx10]);
            mesh.triangles.push([idx01, idx11, idx10]);
        }
    }

    (first, mesh.vertices.len() - first)
}
