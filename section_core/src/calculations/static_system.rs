//! # Static Systems
//!
//! Span geometry and influence coefficients of the supported scheme. A member
//! only needs four things from its system:
//!
//! - `alpha_m` per moment sign, with `M = α_m · q · L²`
//! - the ductility class each sign requires
//! - `alpha_w`, with `w = α_w · q · L⁴ / EI`
//! - the governing sub-span `li_max` for deflection limits
//!
//! Only the simply-supported single span is modelled. Continuous systems would
//! add a non-zero hogging coefficient and a stricter class requirement.

use serde::{Deserialize, Serialize};

use crate::errors::{ensure_positive, CalcResult};
use crate::sections::{DuctilityClass, MomentSign};

/// Simply-supported single span (pin-roller).
///
/// ```text
///   ▲═══════════════════▲
///   |<------- L ------->|
///   M_max = q·L²/8    w_max = 5·q·L⁴/(384·EI)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamSimpleSup {
    /// Span length L (m)
    pub span: f64,
}

impl BeamSimpleSup {
    pub const ALPHA_M_SAG: f64 = 1.0 / 8.0;
    pub const ALPHA_W: f64 = 5.0 / 384.0;

    pub fn new(span: f64) -> CalcResult<Self> {
        ensure_positive("span", span)?;
        Ok(BeamSimpleSup { span })
    }
}

/// A supported structural scheme.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StaticSystem {
    BeamSimpleSup(BeamSimpleSup),
}

impl StaticSystem {
    /// Simply-supported beam of the given span.
    ///
    /// ```rust
    /// use section_core::calculations::StaticSystem;
    /// use section_core::sections::MomentSign;
    ///
    /// let system = StaticSystem::simply_supported(6.0).unwrap();
    /// assert_eq!(system.alpha_m(MomentSign::Positive), 0.125);
    /// assert_eq!(system.alpha_m(MomentSign::Negative), 0.0);
    /// ```
    pub fn simply_supported(span: f64) -> CalcResult<Self> {
        Ok(StaticSystem::BeamSimpleSup(BeamSimpleSup::new(span)?))
    }

    /// Total length L (m)
    pub fn span(&self) -> f64 {
        match self {
            StaticSystem::BeamSimpleSup(s) => s.span,
        }
    }

    /// Longest sub-span, reference length of the deflection limits (m)
    pub fn li_max(&self) -> f64 {
        match self {
            StaticSystem::BeamSimpleSup(s) => s.span,
        }
    }

    /// Moment influence coefficient for the given sign
    pub fn alpha_m(&self, sign: MomentSign) -> f64 {
        match (self, sign) {
            (StaticSystem::BeamSimpleSup(_), MomentSign::Positive) => BeamSimpleSup::ALPHA_M_SAG,
            (StaticSystem::BeamSimpleSup(_), MomentSign::Negative) => 0.0,
        }
    }

    /// Ductility class the face under the given sign must reach.
    ///
    /// A statically determinate span needs no redistribution, so any class
    /// is accepted.
    pub fn required_class(&self, _sign: MomentSign) -> DuctilityClass {
        match self {
            StaticSystem::BeamSimpleSup(_) => DuctilityClass::Inadequate,
        }
    }

    /// Deflection shape coefficient α_w
    pub fn alpha_w(&self) -> f64 {
        match self {
            StaticSystem::BeamSimpleSup(_) => BeamSimpleSup::ALPHA_W,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            StaticSystem::BeamSimpleSup(_) => "Simply supported beam",
        }
    }
}
