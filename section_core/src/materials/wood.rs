//! Structural Timber (SIA 265)
//!
//! Raw characteristic values come from the property store; the design bending
//! strength is derived on request:
//!
//! ```text
//! f_md = f_mk · η_m · η_t · η_w / γ_M
//! ```
//!
//! γ_M depends on the [`ProductClass`] of the grade, which is resolved once
//! when the material is loaded.

use serde::{Deserialize, Serialize};

use crate::design_code::{sia_ref, TimberFactors};
use crate::errors::{CalcError, CalcResult};
use crate::store::{ProductRecord, PropertyStore};

/// Marker at the start of a grade identifier for glued-laminated timber
const GLULAM_MARKER: &str = "GL";

/// Manufacturing class of a timber grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductClass {
    /// Sawn solid timber (e.g. C24)
    SolidTimber,
    /// Glued-laminated timber (e.g. GL24h), reduced γ_M
    GluedLaminated,
}

impl ProductClass {
    /// Classify a grade identifier by its two-character prefix.
    ///
    /// ```rust
    /// use section_core::materials::ProductClass;
    ///
    /// assert_eq!(ProductClass::from_grade("GL24h"), ProductClass::GluedLaminated);
    /// assert_eq!(ProductClass::from_grade("C24"), ProductClass::SolidTimber);
    /// ```
    pub fn from_grade(grade: &str) -> Self {
        match grade.get(0..GLULAM_MARKER.len()) {
            Some(GLULAM_MARKER) => ProductClass::GluedLaminated,
            _ => ProductClass::SolidTimber,
        }
    }

    /// Resistance factor γ_M for this class
    pub fn gamma_m(&self, factors: &TimberFactors) -> f64 {
        match self {
            ProductClass::SolidTimber => factors.gamma_m,
            ProductClass::GluedLaminated => factors.gamma_m_glulam,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ProductClass::SolidTimber => "Solid timber",
            ProductClass::GluedLaminated => "Glued-laminated timber",
        }
    }
}

impl std::fmt::Display for ProductClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Derived design values of a timber grade (Pa)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WoodDesignValues {
    /// Resistance factor that was applied
    pub gamma_m: f64,
    /// Design bending strength f_md
    pub f_md: f64,
    /// Shear strength used for the elastic shear resistance
    pub f_vd: f64,
}

/// Timber grade with its store data and, once derived, its design values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wood {
    /// Grade identifier, e.g. "GL24h"
    pub grade: String,
    /// Product class resolved from the grade
    pub product_class: ProductClass,
    /// Characteristic bending strength f_mk (Pa)
    pub f_mk: f64,
    /// Shear strength (Pa)
    pub f_vk: f64,
    /// Mean modulus of elasticity E_0,mean (Pa)
    pub e_mean: f64,
    /// Specific weight for dead load (N/m³)
    pub unit_weight: f64,
    /// Density, GWP and cost
    pub product: ProductRecord,
    design: Option<WoodDesignValues>,
}

impl Wood {
    /// Load a timber grade from the property store.
    ///
    /// Fails with `MaterialNotFound` if either the mechanical or the product
    /// row is absent, and with `MissingField` if a timber column is empty.
    pub fn load(store: &dyn PropertyStore, grade: &str) -> CalcResult<Self> {
        let mech = store.mechanical(grade)?;
        let product = store.product(grade)?;
        Ok(Wood {
            grade: grade.to_string(),
            product_class: ProductClass::from_grade(grade),
            f_mk: mech.require("strength_bend", mech.strength_bend)?,
            f_vk: mech.require("strength_shear", mech.strength_shear)?,
            e_mean: mech.require("e_modulus", mech.e_modulus)?,
            unit_weight: mech.require("unit_weight", mech.unit_weight)?,
            product,
            design: None,
        })
    }

    /// Derive the design values with the given timber factors.
    pub fn derive_design_values(&mut self, factors: &TimberFactors) -> &WoodDesignValues {
        let gamma_m = self.product_class.gamma_m(factors);
        let f_md = self.f_mk * factors.eta_m * factors.eta_t * factors.eta_w / gamma_m;
        log::debug!(
            "{}: f_md = {:.2} MPa (gamma_M = {}, {} / {})",
            self.grade,
            f_md / 1.0e6,
            gamma_m,
            sia_ref::TIMBER_DESIGN_STRENGTH,
            sia_ref::GLULAM_GAMMA_M
        );
        self.design.insert(WoodDesignValues {
            gamma_m,
            f_md,
            f_vd: self.f_vk,
        })
    }

    /// Builder form of [`Wood::derive_design_values`].
    pub fn with_design_values(mut self, factors: &TimberFactors) -> Self {
        self.derive_design_values(factors);
        self
    }

    /// Design values, or `DesignValuesNotDerived` if they were never derived.
    pub fn design_values(&self) -> CalcResult<&WoodDesignValues> {
        self.design
            .as_ref()
            .ok_or_else(|| CalcError::design_values_not_derived(&self.grade))
    }

    /// Embodied carbon per m³ of timber (kg CO2-eq/m³)
    pub fn gwp_per_volume(&self) -> f64 {
        self.product.gwp * self.product.density
    }
}
