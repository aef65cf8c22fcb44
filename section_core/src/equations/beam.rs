//! # Beam Formulas
//!
//! Closed-form results for a uniformly loaded beam, written in terms of the
//! influence coefficients of the static system so the same functions serve
//! any single-span scheme.
//!
//! ## Notation
//!
//! - `L` = Span length
//! - `q` = Uniform line load (N/m)
//! - `α_m` = Moment coefficient, M = α_m·q·L²
//! - `α_w` = Deflection coefficient, w = α_w·q·L⁴/EI
//! - `EI` = Bending stiffness
//!
//! ## Sign Conventions
//!
//! - Loads: Positive downward
//! - Moment: Positive causes tension on bottom (sagging)
//! - Deflection: Positive downward
//!
//! ## References
//!
//! - Roark's Formulas for Stress and Strain, 8th Edition, Table 8.1

/// Maximum moment of a uniform load
///
/// # Formula
/// M = α_m·q·L²   (simply supported: α_m = 1/8)
///
/// # Example
/// ```rust
/// use section_core::equations::beam::uniform_load_moment;
///
/// // 10 kN/m over 6 m: 45 kNm
/// let m = uniform_load_moment(1.0 / 8.0, 10_000.0, 6.0);
/// assert!((m - 45_000.0).abs() < 1e-9);
/// ```
#[inline]
pub fn uniform_load_moment(alpha_m: f64, q: f64, l: f64) -> f64 {
    alpha_m * q * l.powi(2)
}

/// Uniform load that produces a given moment (inverse of [`uniform_load_moment`])
///
/// # Formula
/// q = M / (α_m·L²)
#[inline]
pub fn load_from_moment(alpha_m: f64, m: f64, l: f64) -> f64 {
    m / (alpha_m * l.powi(2))
}

/// Midspan deflection of a uniform load
///
/// # Formula
/// w = α_w·q·L⁴ / EI   (simply supported: α_w = 5/384)
///
/// # Example
/// ```rust
/// use section_core::equations::beam::uniform_load_deflection;
///
/// let w = uniform_load_deflection(5.0 / 384.0, 10_000.0, 6.0, 1.0e7);
/// assert!((w - 0.016875).abs() < 1e-9);
/// ```
#[inline]
pub fn uniform_load_deflection(alpha_w: f64, q: f64, l: f64, ei: f64) -> f64 {
    alpha_w * q * l.powi(4) / ei
}

/// Design (factored) load of a permanent/variable pair
///
/// # Formula
/// q_d = γ_G·g + γ_Q·q
#[inline]
pub fn design_load(gamma_g: f64, g: f64, gamma_q: f64, q: f64) -> f64 {
    gamma_g * g + gamma_q * q
}

/// Variable load admissible with a given ultimate load (inverse of [`design_load`])
///
/// # Formula
/// q_adm = (q_u − γ_G·g) / γ_Q
#[inline]
pub fn admissible_variable_load(q_u: f64, gamma_g: f64, g: f64, gamma_q: f64) -> f64 {
    (q_u - gamma_g * g) / gamma_q
}
