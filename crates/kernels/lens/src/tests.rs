//! Tests for the Lens crate.

use tensorfield_foundation::vector_ops::{dot, norm, sub};
use tensorfield_foundation::{CancellationToken, GridDomain, Mat3, Point3, Time, Vec3};
use tensorfield_functions::{EigenFamily, FormMode, FormParameters, Termination};

use crate::{
    AnalysisError, AnalyticField, GlyphConfig, MAX_GLYPH_RESOLUTION, ProbeConfig, SampledField,
    TensorLineConfig, run_flow_probes, run_tensor_glyphs, run_tensor_lines,
};

fn cube_grid(points_per_axis: usize) -> GridDomain {
    GridDomain::uniform(
        [points_per_axis; 3],
        [-1.0, -1.0, -1.0],
        [1.0, 1.0, 1.0],
    )
}

fn vector_field(f: impl Fn(Point3) -> Vec3 + Send + Sync + 'static) -> AnalyticField<Vec3> {
    AnalyticField::new(cube_grid(5), move |p: Point3, _: Time| f(p))
}

fn tensor_field(f: impl Fn(Point3) -> Mat3 + Send + Sync + 'static) -> AnalyticField<Mat3> {
    AnalyticField::new(cube_grid(11), move |p: Point3, _: Time| f(p))
}

fn interior(p: Point3) -> bool {
    p.iter().all(|c| *c > -0.999 && *c < 0.999)
}

fn probe_config() -> ProbeConfig {
    ProbeConfig {
        sample_count: 4,
        ..ProbeConfig::default()
    }
}

// ============================================================================
// Flow probes
// ============================================================================

#[test]
fn uniform_flow_is_flat_away_from_the_boundary() {
    let field = vector_field(|_| [1.0, 0.0, 0.0]);
    let set = run_flow_probes(Some(&field), &probe_config(), &CancellationToken::new())
        .expect("probe pass");

    // spacing 2/5 puts five layers per axis inside [-1, 1]
    assert_eq!(set.samples.len(), 125);
    assert!(!set.cancelled);

    for s in set.samples.iter().filter(|s| interior(s.position)) {
        assert_eq!(s.jacobian, Mat3::ZERO);
        assert_eq!(s.divergence, 0.0);
        assert_eq!(s.curl, [0.0; 3]);
        assert_eq!(s.curvature, [0.0; 3]);
    }

    // Backward probes at x = -1 leave the domain and read as zero
    let edge = set
        .samples
        .iter()
        .find(|s| s.position[0] == -1.0)
        .expect("edge sample");
    assert!(edge.jacobian.get(0, 0) > 0.0);
}

#[test]
fn vortex_probes_report_rotation() {
    let field = vector_field(|p| [-p[1], p[0], 0.0]);
    let set = run_flow_probes(Some(&field), &probe_config(), &CancellationToken::new())
        .expect("probe pass");

    let inner: Vec<_> = set.samples.iter().filter(|s| interior(s.position)).collect();
    assert!(!inner.is_empty());
    for s in inner {
        assert!(s.divergence.abs() < 1e-8);
        assert!(norm(sub(s.curl, [0.0, 0.0, 2.0])) < 1e-8);
        let expected_acc = [-s.position[0], -s.position[1], 0.0];
        assert!(norm(sub(s.acceleration, expected_acc)) < 1e-8);
    }
}

#[test]
fn vanishing_flow_yields_no_probes() {
    let field = vector_field(|_| [0.0; 3]);
    let set = run_flow_probes(Some(&field), &probe_config(), &CancellationToken::new())
        .expect("probe pass");
    assert!(set.samples.is_empty());
    assert!(!set.cancelled);
}

#[test]
fn missing_vector_field_is_an_empty_result() {
    let set = run_flow_probes::<AnalyticField<Vec3>>(
        None,
        &ProbeConfig::default(),
        &CancellationToken::new(),
    )
    .expect("missing input is not an error");
    assert!(set.samples.is_empty());
}

#[test]
fn probe_pass_requires_a_grid() {
    let field = AnalyticField::unstructured(|_: Point3, _: Time| -> Vec3 { [1.0, 0.0, 0.0] });
    let err = run_flow_probes(Some(&field), &ProbeConfig::default(), &CancellationToken::new())
        .expect_err("no grid");
    assert!(matches!(err, AnalysisError::DomainMismatch(_)));
}

#[test]
fn probe_pass_validates_config() {
    let field = vector_field(|_| [1.0, 0.0, 0.0]);
    let config = ProbeConfig {
        step_size: 0.0,
        ..ProbeConfig::default()
    };
    let err = run_flow_probes(Some(&field), &config, &CancellationToken::new())
        .expect_err("invalid step");
    assert!(matches!(err, AnalysisError::InvalidConfig(_)));
}

#[test]
fn cancelled_probe_pass_returns_early() {
    let field = vector_field(|_| [1.0, 0.0, 0.0]);
    let cancel = CancellationToken::new();
    cancel.cancel();
    let set = run_flow_probes(Some(&field), &probe_config(), &cancel).expect("probe pass");
    assert!(set.cancelled);
    assert!(set.samples.is_empty());
}

#[test]
fn probe_pass_cancelled_midway_keeps_earlier_samples() {
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    // lattice runs x slowest; the first sample with x > 0 requests the stop
    let field = AnalyticField::new(cube_grid(5), move |p: Point3, _: Time| -> Vec3 {
        if p[0] > 0.0 {
            trigger.cancel();
        }
        [1.0, 0.0, 0.0]
    });
    let set = run_flow_probes(Some(&field), &probe_config(), &cancel).expect("probe pass");

    assert!(set.cancelled);
    assert_eq!(set.samples.iter().filter(|s| s.position[0] < 0.0).count(), 75);
    assert!(set.samples.len() < 125);
}

#[test]
fn sampled_vector_field_feeds_the_probe_pass() {
    let field = SampledField::from_fn(cube_grid(5), 0.0, |_: Point3, _: Time| -> Vec3 {
        [0.0, 2.0, 0.0]
    });
    let set = run_flow_probes(Some(&field), &probe_config(), &CancellationToken::new())
        .expect("probe pass");
    assert_eq!(set.samples.len(), 125);
    assert!(set.samples.iter().all(|s| s.velocity == [0.0, 2.0, 0.0]));
}

// ============================================================================
// Glyphs
// ============================================================================

fn glyph_config() -> GlyphConfig {
    GlyphConfig {
        sample_count: 2,
        ..GlyphConfig::default()
    }
}

#[test]
fn isotropic_tensors_give_white_spheres() {
    let field = tensor_field(|_| Mat3::scaled_identity(2.0));
    let set = run_tensor_glyphs(Some(&field), &glyph_config(), &CancellationToken::new())
        .expect("glyph pass");

    assert_eq!(set.glyphs.len(), 27);
    let per_glyph = 21 * 21;
    assert_eq!(set.mesh.vertex_count(), 27 * per_glyph);
    assert_eq!(set.mesh.triangle_count(), 27 * 2 * 20 * 20);
    assert_eq!(set.mesh.normals.len(), set.mesh.vertices.len());

    for (n, glyph) in set.glyphs.iter().enumerate() {
        assert_eq!(glyph.eigenvalues, [2.0, 2.0, 2.0]);
        assert_eq!(glyph.metrics.c_s, 1.0);
        assert_eq!(glyph.form, FormParameters::ELLIPSOID);
        assert_eq!(glyph.color, [1.0, 1.0, 1.0]);
        assert_eq!(glyph.first_vertex, n * per_glyph);
        assert_eq!(glyph.vertex_count, per_glyph);

        let surface = &set.mesh.vertices[glyph.first_vertex..][..glyph.vertex_count];
        for v in surface {
            assert!((norm(sub(*v, glyph.center)) - 2.0).abs() < 1e-9);
        }
    }
}

#[test]
fn glyph_pass_cancelled_midway_keeps_earlier_glyphs() {
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    let field = AnalyticField::new(cube_grid(11), move |p: Point3, _: Time| {
        if p[0] > 0.0 {
            trigger.cancel();
        }
        Mat3::scaled_identity(2.0)
    });
    let set = run_tensor_glyphs(Some(&field), &glyph_config(), &cancel).expect("glyph pass");

    assert!(set.cancelled);
    assert_eq!(set.glyphs.iter().filter(|g| g.center[0] < 0.0).count(), 18);
    assert!(set.glyphs.len() < 27);
    assert_eq!(set.mesh.vertex_count(), set.glyphs.len() * 21 * 21);
}

#[test]
fn normalized_glyphs_fill_their_cell() {
    let spacing = 2.0 / 3.0;
    let field = tensor_field(|_| Mat3::scaled_identity(2.0));
    let config = GlyphConfig {
        normalize_to_cell: true,
        glyph_scale: 7.0,
        ..glyph_config()
    };
    let set = run_tensor_glyphs(Some(&field), &config, &CancellationToken::new())
        .expect("glyph pass");
    assert_eq!(set.glyphs.len(), 27);
    for glyph in &set.glyphs {
        let surface = &set.mesh.vertices[glyph.first_vertex..][..glyph.vertex_count];
        for v in surface {
            assert!((norm(sub(*v, glyph.center)) - spacing).abs() < 1e-9);
        }
    }
}

#[test]
fn normalized_glyph_major_axis_spans_the_fill_fraction() {
    let spacing = 2.0 / 3.0;
    let field = tensor_field(|_| Mat3::diagonal([3.0, 1.0, 1.0]));
    let config = GlyphConfig {
        normalize_to_cell: true,
        cell_fill: 0.5,
        ..glyph_config()
    };
    let set = run_tensor_glyphs(Some(&field), &config, &CancellationToken::new())
        .expect("glyph pass");
    let glyph = set.glyphs.first().expect("glyph");
    let surface = &set.mesh.vertices[glyph.first_vertex..][..glyph.vertex_count];
    let reach = surface
        .iter()
        .map(|v| dot(sub(*v, glyph.center), glyph.frame.major).abs())
        .fold(0.0, f64::max);
    assert!((reach - 0.5 * spacing).abs() < 1e-9);
}

#[test]
fn glyph_resolution_is_clamped() {
    let field = tensor_field(|_| Mat3::diagonal([3.0, 1.0, 1.0]));
    let config = GlyphConfig {
        resolution_theta: 1,
        resolution_phi: 0,
        sample_count: 1,
        ..GlyphConfig::default()
    };
    let set = run_tensor_glyphs(Some(&field), &config, &CancellationToken::new())
        .expect("glyph pass");
    assert!(!set.glyphs.is_empty());
    assert!(set.glyphs.iter().all(|g| g.vertex_count == 25));
}

#[test]
fn linear_tensor_glyph_attributes() {
    let field = tensor_field(|_| Mat3::diagonal([3.0, 1.0, 1.0]));
    let set = run_tensor_glyphs(Some(&field), &glyph_config(), &CancellationToken::new())
        .expect("glyph pass");
    let glyph = set.glyphs.first().expect("glyph");

    assert!((glyph.metrics.c_l - 0.4).abs() < 1e-12);
    assert!(glyph.metrics.c_p.abs() < 1e-12);
    assert!((glyph.metrics.c_s - 0.6).abs() < 1e-12);
    assert!((glyph.frame.major[0].abs() - 1.0).abs() < 1e-12);
    assert!(norm(sub(glyph.color, [1.0, 0.6, 0.6])) < 1e-12);
}

#[test]
fn vanishing_and_negative_tensors_give_no_glyphs() {
    for tensor in [Mat3::ZERO, Mat3::diagonal([-1.0, -2.0, -3.0])] {
        let field = tensor_field(move |_| tensor);
        let set = run_tensor_glyphs(Some(&field), &glyph_config(), &CancellationToken::new())
            .expect("glyph pass");
        assert!(set.glyphs.is_empty());
        assert!(set.mesh.is_empty());
    }
}

#[test]
fn glyph_pass_missing_field_and_grid() {
    let set = run_tensor_glyphs::<AnalyticField<Mat3>>(
        None,
        &GlyphConfig::default(),
        &CancellationToken::new(),
    )
    .expect("missing input is not an error");
    assert!(set.glyphs.is_empty());

    let field = AnalyticField::unstructured(|_: Point3, _: Time| Mat3::IDENTITY);
    let err = run_tensor_glyphs(Some(&field), &GlyphConfig::default(), &CancellationToken::new())
        .expect_err("no grid");
    assert!(matches!(err, AnalysisError::DomainMismatch(_)));
}

#[test]
fn round_cross_section_mode_keeps_beta_at_one() {
    let field = tensor_field(|_| Mat3::diagonal([3.0, 1.0, 1.0]));
    let config = GlyphConfig {
        form_mode: FormMode::RoundCrossSection,
        ..glyph_config()
    };
    let set = run_tensor_glyphs(Some(&field), &config, &CancellationToken::new())
        .expect("glyph pass");
    assert!(set.glyphs.iter().all(|g| g.form.beta == 1.0));
}

// ============================================================================
// Tensor lines
// ============================================================================

#[test]
fn constant_field_lines_run_along_the_major_axis() {
    let field = tensor_field(|_| Mat3::diagonal([1.0, 2.0, 3.0]));
    let config = TensorLineConfig {
        step: 0.1,
        max_length: 0.5,
        ..TensorLineConfig::default()
    };
    let set = run_tensor_lines(Some(&field), &config, &CancellationToken::new())
        .expect("line pass");

    assert!(!set.lines.is_empty());
    assert!(!set.cancelled);
    for line in &set.lines {
        assert_eq!(line.family, EigenFamily::Major);
        assert!(line.len() >= 2);
        assert!(line.length <= config.max_length + config.step);
        let seed = line.points[0];
        for p in &line.points {
            assert_eq!((p[0], p[1]), (seed[0], seed[1]));
        }
        assert_eq!(line.color, [0.0, 0.0, 1.0]);
    }
    assert!(set.point_count() >= 2 * set.lines.len());
}

#[test]
fn isotropic_field_has_no_lines() {
    let field = tensor_field(|_| Mat3::scaled_identity(5.0));
    let set = run_tensor_lines(Some(&field), &TensorLineConfig::default(), &CancellationToken::new())
        .expect("line pass");
    assert!(set.lines.is_empty());
    assert!(!set.cancelled);
}

#[test]
fn line_pass_outside_time_range_is_empty() {
    let field = tensor_field(|_| Mat3::diagonal([1.0, 2.0, 3.0])).with_time_range(0.0..=1.0);
    let config = TensorLineConfig {
        time: 5.0,
        ..TensorLineConfig::default()
    };
    let set = run_tensor_lines(Some(&field), &config, &CancellationToken::new())
        .expect("line pass");
    assert!(set.lines.is_empty());
}

#[test]
fn line_pass_requires_a_grid() {
    let field = AnalyticField::unstructured(|_: Point3, _: Time| Mat3::diagonal([1.0, 2.0, 3.0]));
    let err = run_tensor_lines(Some(&field), &TensorLineConfig::default(), &CancellationToken::new())
        .expect_err("no grid");
    assert!(matches!(err, AnalysisError::DomainMismatch(_)));
}

#[test]
fn missing_tensor_field_has_no_lines() {
    let set = run_tensor_lines::<AnalyticField<Mat3>>(
        None,
        &TensorLineConfig::default(),
        &CancellationToken::new(),
    )
    .expect("missing input is not an error");
    assert!(set.lines.is_empty());
}

#[test]
fn oversized_seed_stride_gives_no_lines() {
    let config: TensorLineConfig =
        serde_json::from_str(r#"{"seed_stride": 18446744073709551615}"#).expect("parse");
    assert!(config.validate().is_ok());
    let field = tensor_field(|_| Mat3::diagonal([1.0, 2.0, 3.0]));
    let set = run_tensor_lines(Some(&field), &config, &CancellationToken::new())
        .expect("line pass");
    assert!(set.lines.is_empty());
    assert!(!set.cancelled);
}

#[test]
fn cancelled_line_pass_flags_the_result() {
    let field = tensor_field(|_| Mat3::diagonal([1.0, 2.0, 3.0]));
    let cancel = CancellationToken::new();
    cancel.cancel();
    let set = run_tensor_lines(Some(&field), &TensorLineConfig::default(), &cancel)
        .expect("line pass");
    assert!(set.cancelled);
    assert!(set.lines.is_empty());
}

#[test]
fn minor_family_lines_stop_at_the_domain_edge() {
    let field = tensor_field(|_| Mat3::diagonal([1.0, 2.0, 3.0]));
    let config = TensorLineConfig {
        family: EigenFamily::Minor,
        step: 0.25,
        ..TensorLineConfig::default()
    };
    let set = run_tensor_lines(Some(&field), &config, &CancellationToken::new())
        .expect("line pass");
    assert!(!set.lines.is_empty());
    for line in &set.lines {
        assert_eq!(line.termination, Termination::OutsideDomain);
        assert!(line.points.iter().all(|p| p[0].abs() <= 1.0));
    }
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn defaults_match_documented_values() {
    let probe = ProbeConfig::default();
    assert_eq!(probe.step_size, 1e-4);
    assert_eq!(probe.sample_count, 10);

    let glyph = GlyphConfig::default();
    assert_eq!(glyph.gamma, 3.0);
    assert_eq!(glyph.resolution(), (20, 20));
    assert_eq!(glyph.sample_count, 5);
    assert_eq!(glyph.form_mode, FormMode::Kindlmann);
    assert!(!glyph.normalize_to_cell);
    assert_eq!(glyph.cell_fill, 1.0);
    assert_eq!(glyph.placement_scale(4.0, 0.5), glyph.glyph_scale);

    let fine = GlyphConfig {
        resolution_theta: usize::MAX,
        ..GlyphConfig::default()
    };
    assert_eq!(fine.resolution(), (MAX_GLYPH_RESOLUTION, 20));

    let lines = TensorLineConfig::default();
    assert_eq!(lines.family, EigenFamily::Major);
    assert_eq!(lines.step, 0.05);
    assert_eq!(lines.max_length, 200.0);
    assert_eq!(lines.max_steps, 1000);
    assert_eq!(lines.degeneracy_epsilon, 1e-4);
    assert_eq!(lines.stride(), 5);

    assert!(probe.validate().is_ok());
    assert!(glyph.validate().is_ok());
    assert!(lines.validate().is_ok());
}

#[test]
fn partial_json_overrides_single_values() {
    let glyph: GlyphConfig =
        serde_json::from_str(r#"{"gamma": 2.5, "form_mode": "round_cross_section"}"#)
            .expect("parse");
    assert_eq!(glyph.gamma, 2.5);
    assert_eq!(glyph.form_mode, FormMode::RoundCrossSection);
    assert_eq!(glyph.glyph_scale, 1.0);

    let cells: GlyphConfig =
        serde_json::from_str(r#"{"normalize_to_cell": true, "cell_fill": 0.8}"#).expect("parse");
    assert!(cells.normalize_to_cell);
    assert!((cells.placement_scale(4.0, 0.5) - 0.1).abs() < 1e-15);
    // a single-point lattice keeps the configured scale
    assert_eq!(cells.placement_scale(4.0, 0.0), 1.0);

    let lines: TensorLineConfig =
        serde_json::from_str(r#"{"family": "minor", "seed_stride": 0}"#).expect("parse");
    assert_eq!(lines.family, EigenFamily::Minor);
    assert_eq!(lines.stride(), 1);
    assert!(lines.validate().is_ok());
}

#[test]
fn invalid_values_are_rejected() {
    let no_fill = GlyphConfig {
        normalize_to_cell: true,
        cell_fill: 0.0,
        ..GlyphConfig::default()
    };
    assert!(matches!(no_fill.validate(), Err(AnalysisError::InvalidConfig(_))));

    let probe = ProbeConfig {
        sample_count: 0,
        ..ProbeConfig::default()
    };
    assert!(matches!(probe.validate(), Err(AnalysisError::InvalidConfig(_))));

    let glyph = GlyphConfig {
        gamma: -1.0,
        ..GlyphConfig::default()
    };
    assert!(glyph.validate().is_err());

    let zero_step = TensorLineConfig {
        step: 0.0,
        ..TensorLineConfig::default()
    };
    assert!(zero_step.validate().is_err());

    let nan_length = TensorLineConfig {
        max_length: f64::NAN,
        ..TensorLineConfig::default()
    };
    assert!(nan_length.validate().is_err());

    let backwards = TensorLineConfig {
        step: -0.05,
        ..TensorLineConfig::default()
    };
    assert!(backwards.validate().is_ok());
}
