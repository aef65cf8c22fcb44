//! # Cross-Section Resistance Formulas
//!
//! Geometric properties and resistances of solid rectangular sections, plus
//! the reinforcement-ratio method for singly reinforced concrete faces.
//!
//! ## Notation
//!
//! - `b` = Width of section
//! - `h` = Height of section
//! - `d` = Effective depth (compression fibre to tension reinforcement)
//! - `A_s` = Reinforcement area of one face
//! - `ω` = Mechanical reinforcement ratio
//! - `x` = Neutral axis depth
//!
//! All inputs and outputs are SI (m, Pa, N, N·m).
//!
//! ## References
//!
//! - SIA 265:2012, 4.2: Bending resistance of timber members
//! - SIA 262:2013, 4.1.4: Bending resistance of reinforced concrete

// =============================================================================
// RECTANGULAR SECTION PROPERTIES
// =============================================================================

/// Gross area of a rectangular section
///
/// ```text
///     ┌─────────┐
///     │         │
///   h │         │
///     │         │
///     └─────────┘
///          b
/// ```
///
/// # Formula
/// A = b × h
///
/// # Example
/// ```rust
/// use section_core::equations::section::rectangular_area;
///
/// assert!((rectangular_area(1.0, 0.2) - 0.2).abs() < 1e-12);
/// ```
#[inline]
pub fn rectangular_area(b: f64, h: f64) -> f64 {
    b * h
}

/// Second moment of area about the strong axis
///
/// # Formula
/// I = b·h³/12
///
/// # Example
/// ```rust
/// use section_core::equations::section::rectangular_moment_of_inertia;
///
/// let i = rectangular_moment_of_inertia(1.0, 0.2);
/// assert!((i - 6.6667e-4).abs() < 1e-7);
/// ```
#[inline]
pub fn rectangular_moment_of_inertia(b: f64, h: f64) -> f64 {
    b * h.powi(3) / 12.0
}

/// Elastic bending resistance, extreme fibre at the design strength
///
/// # Formula
/// M_el = 2·I·f / h  (= b·h²·f/6)
#[inline]
pub fn elastic_moment_resistance(i: f64, h: f64, f: f64) -> f64 {
    2.0 * i * f / h
}

/// Elastic shear resistance, parabolic shear stress distribution
///
/// # Formula
/// V_el = b·h·f_v / 1.5
#[inline]
pub fn elastic_shear_resistance(b: f64, h: f64, f_v: f64) -> f64 {
    b * h * f_v / 1.5
}

/// Plastic bending resistance, full stress block over both halves
///
/// # Formula
/// M_pl = b·h²·f / 4
#[inline]
pub fn plastic_moment_resistance(b: f64, h: f64, f: f64) -> f64 {
    b * h.powi(2) * f / 4.0
}

/// Plastic shear resistance, uniform shear stress
///
/// # Formula
/// V_pl = b·h·f_v
#[inline]
pub fn plastic_shear_resistance(b: f64, h: f64, f_v: f64) -> f64 {
    b * h * f_v
}

// =============================================================================
// REINFORCED CONCRETE
// =============================================================================

/// Effective depth of a reinforcement layer
///
/// ```text
///     ┌─────────┐ ─┬─
///     │         │  │
///     │         │  d
///     │ ● ● ● ● │ ─┴─   bar centre
///     └─────────┘ ── c_nom + Ø/2 below
/// ```
///
/// # Formula
/// d = h − c_nom − Ø/2
#[inline]
pub fn effective_depth(h: f64, c_nom: f64, bar_diameter: f64) -> f64 {
    h - c_nom - bar_diameter / 2.0
}

/// Reinforcement area of bars at a given spacing over a width
///
/// # Formula
/// A_s = π·Ø²/(4·s) · b
///
/// # Example
/// ```rust
/// use section_core::equations::section::reinforcement_area;
///
/// // Ø10 @ 150 mm over 1 m: 523.6 mm²
/// let a_s = reinforcement_area(0.010, 0.150, 1.0);
/// assert!((a_s - 5.236e-4).abs() < 1e-7);
/// ```
#[inline]
pub fn reinforcement_area(bar_diameter: f64, spacing: f64, b: f64) -> f64 {
    std::f64::consts::PI * bar_diameter.powi(2) / (4.0 * spacing) * b
}

/// Mechanical reinforcement ratio
///
/// # Formula
/// ω = A_s·f_sd / (d·b·f_cd)
#[inline]
pub fn mechanical_reinforcement_ratio(a_s: f64, f_sd: f64, d: f64, b: f64, f_cd: f64) -> f64 {
    a_s * f_sd / (d * b * f_cd)
}

/// Bending resistance of a singly reinforced face
///
/// # Formula
/// M_Rd = A_s·f_sd·d·(1 − ω/2)
///
/// The value is returned as computed even for over-reinforced faces; the
/// ductility class decides whether it may be used.
#[inline]
pub fn reinforced_moment_resistance(a_s: f64, f_sd: f64, d: f64, omega: f64) -> f64 {
    a_s * f_sd * d * (1.0 - omega / 2.0)
}

/// Neutral axis depth from the rectangular stress block
///
/// # Formula
/// x = ω·d / 0.85
#[inline]
pub fn neutral_axis_depth(omega: f64, d: f64, block_factor: f64) -> f64 {
    omega * d / block_factor
}
