//! Pass configuration types.
//!
//! Every pass takes a flat set of named parameters. All configs
//! deserialize with `#[serde(default)]`, so a partial JSON document only
//! overrides the values it names.

use serde::{Deserialize, Serialize};
use tensorfield_foundation::Time;
use tensorfield_functions::differential::DEFAULT_DIFFERENCE_STEP;
use tensorfield_functions::{EigenFamily, FormMode, LineParams};

use crate::error::{AnalysisError, Result};

/// Smallest tessellation resolution used for glyphs.
pub const MIN_GLYPH_RESOLUTION: usize = 4;

/// Largest tessellation resolution used for glyphs.
pub const MAX_GLYPH_RESOLUTION: usize = 512;

fn require_finite(name: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(AnalysisError::invalid(format!("{name} must be finite")))
    }
}

fn require_positive(name: &str, value: f64) -> Result<()> {
    require_finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(AnalysisError::invalid(format!("{name} must be > 0")))
    }
}

fn require_count(name: &str, value: usize) -> Result<()> {
    if value == 0 {
        Err(AnalysisError::invalid(format!("{name} must be > 0")))
    } else {
        Ok(())
    }
}

/// Flow-probe pass configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Central-difference step `h`.
    pub step_size: f64,
    /// Lattice subdivisions along the longest axis.
    pub sample_count: usize,
    pub time: Time,
}

impl ProbeConfig {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        require_positive("step_size", self.step_size)?;
        require_count("sample_count", self.sample_count)?;
        require_finite("time", self.time)
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            step_size: DEFAULT_DIFFERENCE_STEP,
            sample_count: 10,
            time: 0.0,
        }
    }
}

/// Superquadric glyph pass configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlyphConfig {
    pub glyph_scale: f64,
    /// Sharpness exponent γ.
    pub gamma: f64,
    /// θ subdivisions, clamped to
    /// [`MIN_GLYPH_RESOLUTION`]`..=`[`MAX_GLYPH_RESOLUTION`].
    pub resolution_theta: usize,
    /// φ subdivisions, clamped like `resolution_theta`.
    pub resolution_phi: usize,
    /// Lattice subdivisions along the shortest non-degenerate axis.
    pub sample_count: usize,
    pub form_mode: FormMode,
    /// Scale every glyph so its largest semi-axis spans `cell_fill`
    /// lattice cells, ignoring `glyph_scale`.
    pub normalize_to_cell: bool,
    /// Fraction of the lattice spacing filled by a normalized glyph.
    pub cell_fill: f64,
    pub time: Time,
}

impl GlyphConfig {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        require_positive("glyph_scale", self.glyph_scale)?;
        require_finite("gamma", self.gamma)?;
        if self.gamma < 0.0 {
            return Err(AnalysisError::invalid("gamma must be >= 0"));
        }
        require_count("sample_count", self.sample_count)?;
        require_positive("cell_fill", self.cell_fill)?;
        require_finite("time", self.time)
    }

    /// `(θ, φ)` resolution after clamping.
    pub fn resolution(&self) -> (usize, usize) {
        let clamp = |r: usize| r.clamp(MIN_GLYPH_RESOLUTION, MAX_GLYPH_RESOLUTION);
        (clamp(self.resolution_theta), clamp(self.resolution_phi))
    }

    /// Placement scale for a glyph with principal eigenvalue `major`.
    ///
    /// With `normalize_to_cell`, the largest semi-axis becomes
    /// `cell_fill · spacing`. A zero spacing (single-point lattice) keeps
    /// `glyph_scale`.
    pub fn placement_scale(&self, major: f64, spacing: f64) -> f64 {
        if self.normalize_to_cell && spacing > 0.0 && major > 0.0 {
            self.cell_fill * spacing / major
        } else {
            self.glyph_scale
        }
    }
}

impl Default for GlyphConfig {
    fn default() -> Self {
        Self {
            glyph_scale: 1.0,
            gamma: 3.0,
            resolution_theta: 20,
            resolution_phi: 20,
            sample_count: 5,
            form_mode: FormMode::Kindlmann,
            normalize_to_cell: false,
            cell_fill: 1.0,
            time: 0.0,
        }
    }
}

/// Tensor-line pass configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TensorLineConfig {
    pub family: EigenFamily,
    /// Euler step `h`; negative traces against the seeded direction.
    pub step: f64,
    pub max_length: f64,
    pub max_steps: usize,
    pub degeneracy_epsilon: f64,
    /// Every `seed_stride`-th grid point seeds a line; 0 is treated as 1.
    pub seed_stride: usize,
    pub time: Time,
}

impl TensorLineConfig {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        require_finite("step", self.step)?;
        if self.step == 0.0 {
            return Err(AnalysisError::invalid("step must be non-zero"));
        }
        require_positive("max_length", self.max_length)?;
        require_count("max_steps", self.max_steps)?;
        require_finite("degeneracy_epsilon", self.degeneracy_epsilon)?;
        if self.degeneracy_epsilon < 0.0 {
            return Err(AnalysisError::invalid("degeneracy_epsilon must be >= 0"));
        }
        require_finite("time", self.time)
    }

    pub fn stride(&self) -> usize {
        self.seed_stride.max(1)
    }

    /// Per-line integration parameters.
    pub fn line_params(&self) -> LineParams {
        LineParams {
            family: self.family,
            step: self.step,
            max_length: self.max_length,
            max_steps: self.max_steps,
            degeneracy_epsilon: self.degeneracy_epsilon,
            time: self.time,
        }
    }
}

impl Default for TensorLineConfig {
    fn default() -> Self {
        let line = LineParams::default();
        Self {
            family: line.family,
            step: line.step,
            max_length: line.max_length,
            max_steps: line.max_steps,
            degeneracy_epsilon: line.degeneracy_epsilon,
            seed_stride: 5,
            time: line.time,
        }
    }
}
