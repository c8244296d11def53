//! Anisotropy Metrics
//!
//! Westin shape metrics of an ordered eigenvalue triple and the
//! superquadric form exponents derived from them.

use serde::{Deserialize, Serialize};

/// Eigenvalue sum below which a tensor counts as vanishing.
pub const MIN_EIGENVALUE: f64 = 1e-9;

/// Linear, planar and spherical anisotropy `(c_l, c_p, c_s)`.
///
/// Each metric lies in `[0, 1]` and they sum to 1 for a non-vanishing
/// tensor with non-negative eigenvalues.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WestinMetrics {
    pub c_l: f64,
    pub c_p: f64,
    pub c_s: f64,
}

impl WestinMetrics {
    /// Metrics reported for a vanishing tensor.
    pub const ISOTROPIC: WestinMetrics = WestinMetrics {
        c_l: 0.0,
        c_p: 0.0,
        c_s: 1.0,
    };

    /// Whether linear anisotropy dominates planar anisotropy.
    pub fn is_linear(&self) -> bool {
        self.c_l >= self.c_p
    }
}

/// Westin metrics for eigenvalues ordered `λ1 ≥ λ2 ≥ λ3 ≥ 0`.
///
/// `c_l = (λ1 − λ2)/Σ`, `c_p = 2(λ2 − λ3)/Σ`, `c_s = 3λ3/Σ`. Returns
/// [`WestinMetrics::ISOTROPIC`] when `Σ < MIN_EIGENVALUE`.
pub fn westin_metrics(lambda1: f64, lambda2: f64, lambda3: f64) -> WestinMetrics {
    let sum = lambda1 + lambda2 + lambda3;
    if sum < MIN_EIGENVALUE {
        return WestinMetrics::ISOTROPIC;
    }
    WestinMetrics {
        c_l: (lambda1 - lambda2) / sum,
        c_p: 2.0 * (lambda2 - lambda3) / sum,
        c_s: 3.0 * lambda3 / sum,
    }
}

/// How form exponents are derived from the anisotropy metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormMode {
    /// Linear or planar anisotropy sharpens the glyph edges.
    #[default]
    Kindlmann,
    /// Only sphericity shapes the glyph; cross-sections stay round.
    RoundCrossSection,
}

/// Superquadric exponents `(alpha, beta)`.
///
/// `alpha` shapes the φ sweep (towards the principal axis), `beta` the θ
/// sweep around it. Both lie in `[0, 1]` for valid metrics; `(1, 1)` is
/// the ellipsoid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FormParameters {
    pub alpha: f64,
    pub beta: f64,
}

impl FormParameters {
    pub const ELLIPSOID: FormParameters = FormParameters {
        alpha: 1.0,
        beta: 1.0,
    };
}

/// Form exponents for the given metrics and sharpness `gamma`.
///
/// In [`FormMode::Kindlmann`]: linear-dominant tensors (`c_l ≥ c_p`) get
/// `alpha = (1 − c_p)^γ`, `beta = (1 − c_l)^γ`; planar-dominant ones swap
/// the roles. [`FormMode::RoundCrossSection`] uses `alpha = c_s^γ`,
/// `beta = 1`.
///
/// Exponents of exactly zero are allowed; the surface formula treats
/// `0^0` as 1 and stays finite.
pub fn form_parameters(metrics: &WestinMetrics, gamma: f64, mode: FormMode) -> FormParameters {
    match mode {
        FormMode::Kindlmann if metrics.is_linear() => FormParameters {
            alpha: (1.0 - metrics.c_p).powf(gamma),
            beta: (1.0 - metrics.c_l).powf(gamma),
        },
        FormMode::Kindlmann => FormParameters {
            alpha: (1.0 - metrics.c_l).powf(gamma),
            beta: (1.0 - metrics.c_p).powf(gamma),
        },
        FormMode::RoundCrossSection => FormParameters {
            alpha: metrics.c_s.powf(gamma),
            beta: 1.0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn westin_partition_for_4_2_1() {
        let m = westin_metrics(4.0, 2.0, 1.0);
        assert!((m.c_l - 2.0 / 7.0).abs() < 1e-15);
        assert!((m.c_p - 2.0 / 7.0).abs() < 1e-15);
        assert!((m.c_s - 3.0 / 7.0).abs() < 1e-15);
        assert!((m.c_l + m.c_p + m.c_s - 1.0).abs() < 1e-15);
    }

    #[test]
    fn westin_metrics_of_pure_shapes() {
        assert_eq!(
            westin_metrics(1.0, 0.0, 0.0),
            WestinMetrics {
                c_l: 1.0,
                c_p: 0.0,
                c_s: 0.0
            }
        );
        assert_eq!(
            westin_metrics(1.0, 1.0, 0.0),
            WestinMetrics {
                c_l: 0.0,
                c_p: 1.0,
                c_s: 0.0
            }
        );
        assert_eq!(
            westin_metrics(2.0, 2.0, 2.0),
            WestinMetrics {
                c_l: 0.0,
                c_p: 0.0,
                c_s: 1.0
            }
        );
    }

    #[test]
    fn vanishing_tensor_is_isotropic() {
        assert_eq!(westin_metrics(0.0, 0.0, 0.0), WestinMetrics::ISOTROPIC);
        assert_eq!(westin_metrics(1e-10, 0.0, 0.0), WestinMetrics::ISOTROPIC);
    }

    #[test]
    fn kindlmann_linear_branch() {
        let m = westin_metrics(4.0, 2.0, 1.0);
        assert!(m.is_linear());
        let f = form_parameters(&m, 2.0, FormMode::Kindlmann);
        assert!((f.alpha - (5.0f64 / 7.0).powi(2)).abs() < 1e-15);
        assert!((f.beta - (5.0f64 / 7.0).powi(2)).abs() < 1e-15);

        let line = form_parameters(&westin_metrics(1.0, 0.0, 0.0), 3.0, FormMode::Kindlmann);
        assert_eq!(line, FormParameters { alpha: 1.0, beta: 0.0 });
    }

    #[test]
    fn kindlmann_planar_branch_swaps_roles() {
        let m = westin_metrics(3.0, 2.5, 0.5);
        assert!(!m.is_linear());
        let f = form_parameters(&m, 3.0, FormMode::Kindlmann);
        assert!((f.alpha - (1.0 - m.c_l).powf(3.0)).abs() < 1e-15);
        assert!((f.beta - (1.0 - m.c_p).powf(3.0)).abs() < 1e-15);
        assert!(f.alpha > f.beta);
    }

    #[test]
    fn sphere_gives_ellipsoid_exponents() {
        let m = westin_metrics(1.0, 1.0, 1.0);
        assert_eq!(form_parameters(&m, 3.0, FormMode::Kindlmann), FormParameters::ELLIPSOID);
        assert_eq!(
            form_parameters(&m, 3.0, FormMode::RoundCrossSection),
            FormParameters::ELLIPSOID
        );
    }

    #[test]
    fn round_cross_section_ignores_linear_and_planar() {
        let m = westin_metrics(4.0, 2.0, 1.0);
        let f = form_parameters(&m, 2.0, FormMode::RoundCrossSection);
        assert!((f.alpha - (3.0f64 / 7.0).powi(2)).abs() < 1e-15);
        assert_eq!(f.beta, 1.0);
    }

    #[test]
    fn form_mode_serializes_snake_case() {
        let json = serde_json::to_string(&FormMode::RoundCrossSection).expect("serialize");
        assert_eq!(json, "\"round_cross_section\"");
        assert_eq!(FormMode::default(), FormMode::Kindlmann);
    }
}
