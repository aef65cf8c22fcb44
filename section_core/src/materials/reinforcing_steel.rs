//! Reinforcing Steel (SIA 262)
//!
//! `f_sd = f_sk / γ_s`

use serde::{Deserialize, Serialize};

use crate::design_code::SteelFactors;
use crate::errors::{CalcError, CalcResult};
use crate::store::{ProductRecord, PropertyStore};

/// Reinforcing bar grade with its store data and, once derived, f_sd.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReinforcingSteel {
    /// Grade identifier, e.g. "B500B"
    pub grade: String,
    /// Characteristic yield strength f_sk (Pa)
    pub f_sk: f64,
    /// Modulus of elasticity E_s (Pa)
    pub e_s: f64,
    /// Density, GWP and cost
    pub product: ProductRecord,
    f_sd: Option<f64>,
}

impl ReinforcingSteel {
    /// Load a reinforcing steel grade from the property store.
    pub fn load(store: &dyn PropertyStore, grade: &str) -> CalcResult<Self> {
        let mech = store.mechanical(grade)?;
        let product = store.product(grade)?;
        Ok(ReinforcingSteel {
            grade: grade.to_string(),
            f_sk: mech.require("strength_tens", mech.strength_tens)?,
            e_s: mech.require("e_modulus", mech.e_modulus)?,
            product,
            f_sd: None,
        })
    }

    /// Derive the design yield strength.
    pub fn derive_design_values(&mut self, factors: &SteelFactors) -> f64 {
        *self.f_sd.insert(self.f_sk / factors.gamma_s)
    }

    /// Builder form of [`ReinforcingSteel::derive_design_values`].
    pub fn with_design_values(mut self, factors: &SteelFactors) -> Self {
        self.derive_design_values(factors);
        self
    }

    /// Design yield strength f_sd (Pa)
    pub fn f_sd(&self) -> CalcResult<f64> {
        self.f_sd
            .ok_or_else(|| CalcError::design_values_not_derived(&self.grade))
    }

    /// Embodied carbon per m³ of steel (kg CO2-eq/m³)
    pub fn gwp_per_volume(&self) -> f64 {
        self.product.gwp * self.product.density
    }
}
