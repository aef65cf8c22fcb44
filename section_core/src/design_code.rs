//! # Design Code Constants
//!
//! Every partial safety factor, combination factor and serviceability limit
//! used by the calculation lives in one versioned [`DesignCode`] value. The
//! default is SIA 262 (concrete) / SIA 265 (timber); another standard can be
//! loaded from TOML without touching any formula.
//!
//! ```text
//! f_md = f_mk · η_m · η_t · η_w / γ_M          (SIA 265, 2.2.2)
//! f_cd = f_ck · η_fc · η_t / γ_c                (SIA 262, 2.3.2.3)
//! τ_cd = 0.3 · η_t · √f_ck / γ_c               (SIA 262, 2.3.2.4)
//! f_sd = f_sk / γ_s                             (SIA 262, 2.3.2.5)
//! q_d  = γ_G · g_k + γ_Q · q_k
//! ```
//!
//! ## Example
//!
//! ```rust
//! use section_core::design_code::DesignCode;
//!
//! let code = DesignCode::sia_262_265();
//! assert_eq!(code.timber.gamma_m, 1.7);
//! assert_eq!(code.loads.gamma_q, 1.5);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Code clause references used in documentation and log output.
pub mod sia_ref {
    /// Design bending strength of timber
    pub const TIMBER_DESIGN_STRENGTH: &str = "SIA 265, 2.2.2";
    /// Reduced resistance factor for glued-laminated timber
    pub const GLULAM_GAMMA_M: &str = "SIA 265, 2.2.5";
    /// Concrete strength reduction for high strength classes
    pub const ETA_FC: &str = "SIA 262, 4.2.1.2";
    /// Ductility classes from neutral axis depth
    pub const DUCTILITY: &str = "SIA 262, 4.1.4.2.5";
}

/// Timber resistance factors (SIA 265)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimberFactors {
    /// Resistance factor γ_M for solid timber
    pub gamma_m: f64,
    /// Resistance factor γ_M for glued-laminated timber
    pub gamma_m_glulam: f64,
    /// Conversion factor for bending η_m
    pub eta_m: f64,
    /// Temperature conversion factor η_t
    pub eta_t: f64,
    /// Moisture conversion factor η_w
    pub eta_w: f64,
}

impl Default for TimberFactors {
    fn default() -> Self {
        TimberFactors {
            gamma_m: 1.7,
            gamma_m_glulam: 1.5,
            eta_m: 1.0,
            eta_t: 1.0,
            eta_w: 1.0,
        }
    }
}

/// Concrete resistance factors (SIA 262)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConcreteFactors {
    /// Resistance factor γ_c
    pub gamma_c: f64,
    /// Load-duration factor η_t
    pub eta_t: f64,
    /// Reference strength of the η_fc reduction, Pa
    pub f_ck_reference: f64,
    /// Coefficient of the shear design strength
    pub shear_coefficient: f64,
    /// Ultimate compressive strain ε_c2d
    pub ultimate_strain: f64,
}

impl Default for ConcreteFactors {
    fn default() -> Self {
        ConcreteFactors {
            gamma_c: 1.5,
            eta_t: 1.0,
            f_ck_reference: 30.0e6,
            shear_coefficient: 0.3,
            ultimate_strain: 0.003,
        }
    }
}

/// Reinforcing steel resistance factor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SteelFactors {
    /// Resistance factor γ_s
    pub gamma_s: f64,
}

impl Default for SteelFactors {
    fn default() -> Self {
        SteelFactors { gamma_s: 1.15 }
    }
}

/// Load factors and combination coefficients
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadFactors {
    /// Load factor on permanent actions γ_G
    pub gamma_g: f64,
    /// Load factor on variable actions γ_Q
    pub gamma_q: f64,
    /// Combination coefficient ψ0
    pub psi0: f64,
    /// Frequent coefficient ψ1
    pub psi1: f64,
    /// Quasi-permanent coefficient ψ2
    pub psi2: f64,
}

impl Default for LoadFactors {
    fn default() -> Self {
        LoadFactors {
            gamma_g: 1.35,
            gamma_q: 1.5,
            psi0: 0.7,
            psi1: 0.5,
            psi2: 0.3,
        }
    }
}

/// Deflection-limit denominators (limit = span / denominator)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeflectionLimits {
    /// Installation (finishes and partitions) limit
    pub installation: f64,
    /// Long-term in-use limit
    pub in_use: f64,
    /// Appearance limit
    pub appearance: f64,
}

impl Default for DeflectionLimits {
    fn default() -> Self {
        DeflectionLimits {
            installation: 350.0,
            in_use: 350.0,
            appearance: 300.0,
        }
    }
}

/// Ductility classification thresholds on x/d
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DuctilityThresholds {
    /// Upper x/d bound of class 1 (plastic-plastic)
    pub class1_max: f64,
    /// Upper x/d bound of class 2; above it the section is inadequate
    pub class2_max: f64,
    /// Compression block factor relating x to ω·d
    pub block_factor: f64,
}

impl Default for DuctilityThresholds {
    fn default() -> Self {
        DuctilityThresholds {
            class1_max: 0.35,
            class2_max: 0.5,
            block_factor: 0.85,
        }
    }
}

/// A complete, versioned set of code constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignCode {
    /// Standard name, e.g. "SIA 262/265"
    pub name: String,
    /// Edition or revision of the constant set
    pub version: String,
    #[serde(default)]
    pub timber: TimberFactors,
    #[serde(default)]
    pub concrete: ConcreteFactors,
    #[serde(default)]
    pub steel: SteelFactors,
    #[serde(default)]
    pub loads: LoadFactors,
    #[serde(default)]
    pub deflection_limits: DeflectionLimits,
    #[serde(default)]
    pub ductility: DuctilityThresholds,
    /// Unit weight per unit density for overridden floor layers (N/kg)
    #[serde(default = "default_density_to_unit_weight")]
    pub density_to_unit_weight: f64,
}

fn default_density_to_unit_weight() -> f64 {
    10.0
}

impl DesignCode {
    /// Swiss standards SIA 262 (2013) and SIA 265 (2012).
    pub fn sia_262_265() -> Self {
        DesignCode {
            name: "SIA 262/265".to_string(),
            version: "2013".to_string(),
            timber: TimberFactors::default(),
            concrete: ConcreteFactors::default(),
            steel: SteelFactors::default(),
            loads: LoadFactors::default(),
            deflection_limits: DeflectionLimits::default(),
            ductility: DuctilityThresholds::default(),
            density_to_unit_weight: default_density_to_unit_weight(),
        }
    }

    /// Parse a design code from TOML and validate it.
    ///
    /// Sections that are omitted fall back to the SIA defaults.
    ///
    /// ```rust
    /// use section_core::design_code::DesignCode;
    ///
    /// let code = DesignCode::from_toml_str(r#"
    ///     name = "SIA 262/265"
    ///     version = "2013-strict"
    ///
    ///     [steel]
    ///     gamma_s = 1.2
    /// "#).unwrap();
    /// assert_eq!(code.steel.gamma_s, 1.2);
    /// assert_eq!(code.timber.gamma_m, 1.7);
    /// ```
    pub fn from_toml_str(source: &str) -> CalcResult<Self> {
        let code: DesignCode =
            toml::from_str(source).map_err(|e| CalcError::serialization(e.to_string()))?;
        code.validate()?;
        Ok(code)
    }

    /// Reject factors that would make a formula divide by zero or flip sign.
    pub fn validate(&self) -> CalcResult<()> {
        let positive = [
            ("timber.gamma_m", self.timber.gamma_m),
            ("timber.gamma_m_glulam", self.timber.gamma_m_glulam),
            ("timber.eta_m", self.timber.eta_m),
            ("timber.eta_t", self.timber.eta_t),
            ("timber.eta_w", self.timber.eta_w),
            ("concrete.gamma_c", self.concrete.gamma_c),
            ("concrete.eta_t", self.concrete.eta_t),
            ("concrete.f_ck_reference", self.concrete.f_ck_reference),
            ("concrete.shear_coefficient", self.concrete.shear_coefficient),
            ("concrete.ultimate_strain", self.concrete.ultimate_strain),
            ("steel.gamma_s", self.steel.gamma_s),
            ("loads.gamma_g", self.loads.gamma_g),
            ("loads.gamma_q", self.loads.gamma_q),
            ("deflection_limits.installation", self.deflection_limits.installation),
            ("deflection_limits.in_use", self.deflection_limits.in_use),
            ("deflection_limits.appearance", self.deflection_limits.appearance),
            ("ductility.block_factor", self.ductility.block_factor),
            ("density_to_unit_weight", self.density_to_unit_weight),
        ];
        for (setting, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(CalcError::configuration(
                    setting,
                    value.to_string(),
                    "Factor must be finite and positive",
                ));
            }
        }

        for (setting, value) in [
            ("loads.psi0", self.loads.psi0),
            ("loads.psi1", self.loads.psi1),
            ("loads.psi2", self.loads.psi2),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(CalcError::configuration(
                    setting,
                    value.to_string(),
                    "Combination coefficient must lie in [0, 1]",
                ));
            }
        }

        let d = &self.ductility;
        if !(d.class1_max > 0.0 && d.class1_max < d.class2_max) {
            return Err(CalcError::configuration(
                "ductility.class1_max",
                d.class1_max.to_string(),
                "Class 1 threshold must be positive and below the class 2 threshold",
            ));
        }
        Ok(())
    }

    /// Short label for reports, e.g. "SIA 262/265 (2013)"
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.name, self.version)
    }
}

impl Default for DesignCode {
    fn default() -> Self {
        Self::sia_262_265()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sia_defaults() {
        let code = DesignCode::sia_262_265();
        assert_eq!(code.timber.gamma_m_glulam, 1.5);
        assert_eq!(code.concrete.gamma_c, 1.5);
        assert_eq!(code.steel.gamma_s, 1.15);
        assert_eq!(code.loads.gamma_g, 1.35);
        assert_eq!(code.deflection_limits.appearance, 300.0);
        assert_eq!(code.ductility.class2_max, 0.5);
        assert!(code.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let code = DesignCode::from_toml_str(
            r#"
            name = "Test"
            version = "1"

            [deflection_limits]
            installation = 500.0
            in_use = 350.0
            appearance = 300.0
            "#,
        )
        .unwrap();
        assert_eq!(code.deflection_limits.installation, 500.0);
        assert_eq!(code.loads, LoadFactors::default());
        assert_eq!(code.density_to_unit_weight, 10.0);
    }

    #[test]
    fn test_invalid_factor_rejected() {
        let result = DesignCode::from_toml_str(
            r#"
            name = "Broken"
            version = "0"

            [steel]
            gamma_s = 0.0
            "#,
        );
        assert!(matches!(result, Err(CalcError::Configuration { .. })));
    }

    #[test]
    fn test_invalid_psi_rejected() {
        let mut code = DesignCode::sia_262_265();
        code.loads.psi2 = 1.3;
        assert!(code.validate().is_err());
    }

    #[test]
    fn test_malformed_toml() {
        let result = DesignCode::from_toml_str("name = ");
        assert!(matches!(result, Err(CalcError::SerializationError { .. })));
    }

    #[test]
    fn test_serialization_roundtrip() {
        let code = DesignCode::sia_262_265();
        let json = serde_json::to_string(&code).unwrap();
        let back: DesignCode = serde_json::from_str(&json).unwrap();
        assert_eq!(code, back);
    }
}
