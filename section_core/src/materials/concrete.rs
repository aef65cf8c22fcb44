//! Ready-Mixed Concrete (SIA 262)
//!
//! ```text
//! η_fc = min((30 MPa / f_ck)^(1/3), 1)
//! f_cd = f_ck · η_fc · η_t / γ_c
//! τ_cd = 0.3 · η_t · √f_ck / γ_c       (f_ck in MPa, result in MPa)
//! ```

use serde::{Deserialize, Serialize};

use crate::design_code::{sia_ref, ConcreteFactors};
use crate::errors::{CalcError, CalcResult};
use crate::store::{ProductRecord, PropertyStore};
use crate::units::{Megapascals, Pascals};

/// Derived design values of a concrete grade
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConcreteDesignValues {
    /// Strength reduction factor η_fc
    pub eta_fc: f64,
    /// Design compressive strength f_cd (Pa)
    pub f_cd: f64,
    /// Design shear stress τ_cd (Pa)
    pub tau_cd: f64,
    /// Ultimate compressive strain ε_c2d
    pub eps_c2d: f64,
}

/// Concrete grade with its store data and, once derived, its design values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Concrete {
    /// Grade identifier, e.g. "C25/30"
    pub grade: String,
    /// Characteristic cylinder strength f_ck (Pa)
    pub f_ck: f64,
    /// Mean tensile strength f_ctm (Pa)
    pub f_ctm: Option<f64>,
    /// Mean modulus of elasticity E_cm (Pa)
    pub e_cm: f64,
    /// Specific weight for dead load (N/m³)
    pub unit_weight: f64,
    /// Density, GWP and cost
    pub product: ProductRecord,
    design: Option<ConcreteDesignValues>,
}

impl Concrete {
    /// Load a concrete grade from the property store.
    pub fn load(store: &dyn PropertyStore, grade: &str) -> CalcResult<Self> {
        let mech = store.mechanical(grade)?;
        let product = store.product(grade)?;
        Ok(Concrete {
            grade: grade.to_string(),
            f_ck: mech.require("strength_comp", mech.strength_comp)?,
            f_ctm: mech.strength_tens,
            e_cm: mech.require("e_modulus", mech.e_modulus)?,
            unit_weight: mech.require("unit_weight", mech.unit_weight)?,
            product,
            design: None,
        })
    }

    /// Derive the design values with the given concrete factors.
    pub fn derive_design_values(&mut self, factors: &ConcreteFactors) -> &ConcreteDesignValues {
        let eta_fc = (factors.f_ck_reference / self.f_ck).powf(1.0 / 3.0).min(1.0);
        let f_cd = self.f_ck * eta_fc * factors.eta_t / factors.gamma_c;
        // The shear formula is calibrated in MPa.
        let f_ck_mpa = Megapascals::from(Pascals(self.f_ck)).0;
        let tau_cd_mpa = factors.shear_coefficient * factors.eta_t * f_ck_mpa.sqrt() / factors.gamma_c;
        log::debug!(
            "{}: eta_fc = {:.3} ({}), f_cd = {:.2} MPa",
            self.grade,
            eta_fc,
            sia_ref::ETA_FC,
            f_cd / 1.0e6
        );
        self.design.insert(ConcreteDesignValues {
            eta_fc,
            f_cd,
            tau_cd: Pascals::from(Megapascals(tau_cd_mpa)).0,
            eps_c2d: factors.ultimate_strain,
        })
    }

    /// Builder form of [`Concrete::derive_design_values`].
    pub fn with_design_values(mut self, factors: &ConcreteFactors) -> Self {
        self.derive_design_values(factors);
        self
    }

    /// Design values, or `DesignValuesNotDerived` if they were never derived.
    pub fn design_values(&self) -> CalcResult<&ConcreteDesignValues> {
        self.design
            .as_ref()
            .ok_or_else(|| CalcError::design_values_not_derived(&self.grade))
    }

    /// Embodied carbon per m³ of concrete (kg CO2-eq/m³)
    pub fn gwp_per_volume(&self) -> f64 {
        self.product.gwp * self.product.density
    }

    /// Per-metre secondary cost (formwork), zero when the store has none
    pub fn cost_per_length(&self) -> f64 {
        self.product.cost2.unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::TomlPropertyStore;

    fn c25() -> Concrete {
        Concrete::load(TomlPropertyStore::builtin().unwrap(), "C25/30").unwrap()
    }

    #[test]
    fn test_load() {
        let concrete = c25();
        assert_eq!(concrete.f_ck, 25.0e6);
        assert_eq!(concrete.unit_weight, 25_000.0);
        assert_eq!(concrete.cost_per_length(), 50.0);
        assert!(concrete.design_values().is_err());
    }

    #[test]
    fn test_eta_fc_capped_at_one() {
        let concrete = c25().with_design_values(&ConcreteFactors::default());
        let dv = concrete.design_values().unwrap();
        assert_eq!(dv.eta_fc, 1.0);
        assert!((dv.f_cd - 25.0e6 / 1.5).abs() < 1e-6);
        assert_eq!(dv.eps_c2d, 0.003);
    }

    #[test]
    fn test_eta_fc_reduces_high_strength() {
        let mut concrete = c25();
        concrete.f_ck = 60.0e6;
        let dv = *concrete.derive_design_values(&ConcreteFactors::default());
        let expected = (0.5f64).powf(1.0 / 3.0);
        assert!((dv.eta_fc - expected).abs() < 1e-12);
        assert!((dv.f_cd - 60.0e6 * expected / 1.5).abs() < 1e-3);
    }

    #[test]
    fn test_shear_design_strength() {
        let concrete = c25().with_design_values(&ConcreteFactors::default());
        // 0.3 · √25 / 1.5 = 1.0 MPa
        let dv = concrete.design_values().unwrap();
        assert!((dv.tau_cd - 1.0e6).abs() < 1e-6);
    }

    #[test]
    fn test_timber_row_is_not_concrete() {
        let result = Concrete::load(TomlPropertyStore::builtin().unwrap(), "GL24h");
        assert!(matches!(result, Err(CalcError::MissingField { .. })));
    }
}
