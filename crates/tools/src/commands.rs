//! `fieldscope` subcommands.

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use serde_json::Value;
use tensorfield_foundation::{CancellationToken, Point3, Time};
use tensorfield_functions::EigenFamily;
use tensorfield_lens::{
    GlyphConfig, ProbeConfig, TensorLineConfig, run_flow_probes, run_tensor_glyphs,
    run_tensor_lines,
};
use tracing::info;

use crate::error::Result;
use crate::fields::{GridSpec, sample_field, tensor_field, vector_field};
use crate::output::{load_config, numeric_digest, to_json, write_json};

/// Field selection and the cube grid it lives on.
#[derive(Args, Debug, Clone)]
pub struct FieldArgs {
    /// Built-in field name
    #[arg(short, long)]
    pub field: String,

    /// Grid points per axis
    #[arg(long, default_value = "11")]
    pub dims: usize,

    /// Half-width of the cube [-extent, extent]³
    #[arg(long, default_value = "1.0")]
    pub extent: f64,

    /// Evaluation time (overrides the config file)
    #[arg(long)]
    pub time: Option<Time>,
}

impl FieldArgs {
    fn grid(&self) -> GridSpec {
        GridSpec {
            dims: self.dims,
            extent: self.extent,
        }
    }
}

/// Where results go.
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Pass config as JSON; missing keys keep their defaults
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output JSON file (stdout if absent)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print a SHA-256 digest of the numeric output
    #[arg(long)]
    pub hash: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Flow probes over a vector field.
    Probe {
        #[command(flatten)]
        field: FieldArgs,
        #[command(flatten)]
        output: OutputArgs,

        /// Lattice subdivisions along the longest axis
        #[arg(long)]
        samples: Option<usize>,

        /// Central-difference step
        #[arg(long)]
        step: Option<f64>,
    },

    /// Superquadric glyphs over a tensor field.
    Glyphs {
        #[command(flatten)]
        field: FieldArgs,
        #[command(flatten)]
        output: OutputArgs,

        /// Lattice subdivisions along the shortest axis
        #[arg(long)]
        samples: Option<usize>,

        /// Shape sharpness
        #[arg(long)]
        gamma: Option<f64>,

        /// Glyph scale
        #[arg(long)]
        scale: Option<f64>,

        /// Size glyphs to this fraction of the lattice spacing
        #[arg(long)]
        cell_fill: Option<f64>,
    },

    /// Tensor lines through a tensor field.
    Lines {
        #[command(flatten)]
        field: FieldArgs,
        #[command(flatten)]
        output: OutputArgs,

        /// Eigenvector family: major, median, minor (or 0, 1, 2)
        #[arg(long, value_parser = parse_family)]
        family: Option<EigenFamily>,

        /// Integration step; negative traces backwards
        #[arg(long, allow_hyphen_values = true)]
        step: Option<f64>,

        /// Seed every n-th grid point
        #[arg(long)]
        stride: Option<usize>,
    },

    /// Evaluate a field at one point.
    Sample {
        #[command(flatten)]
        field: FieldArgs,

        /// Query point as x,y,z
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        at: Point3,

        /// Output JSON file (stdout if absent)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Result of one subcommand before it is written out.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub json: Value,
    pub digest: Option<String>,
}

impl Command {
    fn output_path(&self) -> Option<&Path> {
        match self {
            Command::Probe { output, .. }
            | Command::Glyphs { output, .. }
            | Command::Lines { output, .. } => output.output.as_deref(),
            Command::Sample { output, .. } => output.as_deref(),
        }
    }
}

/// Run a subcommand and write its output.
pub fn run(command: Command) -> Result<()> {
    let outcome = execute(&command)?;
    write_json(&outcome.json, command.output_path())?;
    if let Some(digest) = &outcome.digest {
        info!(sha256 = %digest, "output digest");
        eprintln!("sha256 {digest}");
    }
    Ok(())
}

/// Run a subcommand and return its JSON result.
pub fn execute(command: &Command) -> Result<Outcome> {
    let cancel = CancellationToken::new();
    let (json, hash) = match command {
        Command::Probe {
            field,
            output,
            samples,
            step,
        } => {
            let mut config: ProbeConfig = load_config(output.config.as_deref())?;
            if let Some(samples) = samples {
                config.sample_count = *samples;
            }
            if let Some(step) = step {
                config.step_size = *step;
            }
            config.time = field.time.unwrap_or(config.time);

            let input = vector_field(&field.field, &field.grid())?;
            let result = run_flow_probes(Some(&input), &config, &cancel)?;
            info!(field = %field.field, samples = result.samples.len(), "probe");
            (to_json(&result)?, output.hash)
        }
        Command::Glyphs {
            field,
            output,
            samples,
            gamma,
            scale,
            cell_fill,
        } => {
            let mut config: GlyphConfig = load_config(output.config.as_deref())?;
            if let Some(samples) = samples {
                config.sample_count = *samples;
            }
            if let Some(gamma) = gamma {
                config.gamma = *gamma;
            }
            if let Some(scale) = scale {
                config.glyph_scale = *scale;
            }
            if let Some(fill) = cell_fill {
                config.normalize_to_cell = true;
                config.cell_fill = *fill;
            }
            config.time = field.time.unwrap_or(config.time);

            let input = tensor_field(&field.field, &field.grid())?;
            let result = run_tensor_glyphs(Some(&input), &config, &cancel)?;
            info!(
                field = %field.field,
                glyphs = result.glyphs.len(),
                triangles = result.mesh.triangle_count(),
                "glyphs"
            );
            (to_json(&result)?, output.hash)
        }
        Command::Lines {
            field,
            output,
            family,
            step,
            stride,
        } => {
            let mut config: TensorLineConfig = load_config(output.config.as_deref())?;
            if let Some(family) = family {
                config.family = *family;
            }
            if let Some(step) = step {
                config.step = *step;
            }
            if let Some(stride) = stride {
                config.seed_stride = *stride;
            }
            config.time = field.time.unwrap_or(config.time);

            let input = tensor_field(&field.field, &field.grid())?;
            let result = run_tensor_lines(Some(&input), &config, &cancel)?;
            info!(
                field = %field.field,
                family = %config.family,
                lines = result.lines.len(),
                points = result.point_count(),
                "lines"
            );
            (to_json(&result)?, output.hash)
        }
        Command::Sample { field, at, .. } => {
            let sample = sample_field(&field.field, &field.grid(), *at, field.time.unwrap_or(0.0))?;
            (to_json(&sample)?, false)
        }
    };

    let digest = hash.then(|| numeric_digest(&json));
    Ok(Outcome { json, digest })
}

/// Parse `x,y,z`.
pub fn parse_point(s: &str) -> std::result::Result<Point3, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [x, y, z] = parts.as_slice() else {
        return Err(format!("expected x,y,z, got '{s}'"));
    };
    let coord = |c: &str| {
        c.parse::<f64>()
            .map_err(|e| format!("invalid coordinate '{c}': {e}"))
    };
    Ok([coord(*x)?, coord(*y)?, coord(*z)?])
}

/// Parse an eigenvector family by name or index.
pub fn parse_family(s: &str) -> std::result::Result<EigenFamily, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "major" | "0" => Ok(EigenFamily::Major),
        "median" | "1" => Ok(EigenFamily::Median),
        "minor" | "2" => Ok(EigenFamily::Minor),
        other => Err(format!("unknown family '{other}' (major, median, minor)")),
    }
}
