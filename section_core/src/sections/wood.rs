//! Rectangular timber section
//!
//! ```text
//! M_Rd = 2·I·f_md / h        (both signs)
//! V_Rd = b·h·f_vd / 1.5
//! g_0  = γ · A
//! ```

use std::sync::Arc;

use crate::equations::section::{
    elastic_moment_resistance, elastic_shear_resistance, plastic_moment_resistance,
    plastic_shear_resistance,
};
use crate::errors::{ensure_positive, CalcResult};
use crate::materials::Wood;

use super::{DuctilityClass, RectangularGeometry};

/// Solid or glued-laminated rectangular timber section.
#[derive(Debug, Clone, PartialEq)]
pub struct RectangularWood {
    geometry: RectangularGeometry,
    material: Arc<Wood>,
    phi: f64,
    m_rd: f64,
    v_rd: f64,
    m_pl: f64,
    v_pl: f64,
    g0: f64,
    co2: f64,
    cost: f64,
    ei: f64,
}

impl RectangularWood {
    /// Creep factor used when none is given
    pub const DEFAULT_PHI: f64 = 0.6;

    /// Timber is designed elastically, without moment redistribution.
    pub const DUCTILITY_CLASS: DuctilityClass = DuctilityClass::Class3;

    /// Build a section with the default creep factor.
    ///
    /// Fails with `DesignValuesNotDerived` if the material has no design values.
    pub fn new(material: Arc<Wood>, geometry: RectangularGeometry) -> CalcResult<Self> {
        Self::with_phi(material, geometry, Self::DEFAULT_PHI)
    }

    /// Build a section with an explicit creep factor.
    pub fn with_phi(material: Arc<Wood>, geometry: RectangularGeometry, phi: f64) -> CalcResult<Self> {
        ensure_positive("phi", phi)?;
        let dv = *material.design_values()?;
        let RectangularGeometry { b, h } = geometry;
        let area = geometry.area();
        let i = geometry.moment_of_inertia();

        Ok(RectangularWood {
            geometry,
            phi,
            m_rd: elastic_moment_resistance(i, h, dv.f_md),
            v_rd: elastic_shear_resistance(b, h, dv.f_vd),
            m_pl: plastic_moment_resistance(b, h, dv.f_md),
            v_pl: plastic_shear_resistance(b, h, dv.f_vd),
            g0: material.unit_weight * area,
            co2: area * material.gwp_per_volume(),
            cost: area * material.product.cost,
            ei: material.e_mean * i,
            material,
        })
    }

    /// Same material and creep factor, another height.
    pub fn with_height(&self, h: f64) -> CalcResult<Self> {
        Self::with_phi(Arc::clone(&self.material), self.geometry.with_height(h)?, self.phi)
    }

    pub fn geometry(&self) -> &RectangularGeometry {
        &self.geometry
    }

    pub fn material(&self) -> &Wood {
        &self.material
    }

    pub fn phi(&self) -> f64 {
        self.phi
    }

    /// Elastic bending resistance, equal for both signs (N·m)
    pub fn moment_resistance(&self) -> f64 {
        self.m_rd
    }

    /// Elastic shear resistance (N)
    pub fn shear_resistance(&self) -> f64 {
        self.v_rd
    }

    /// Plastic bending resistance (N·m)
    pub fn plastic_moment_resistance(&self) -> f64 {
        self.m_pl
    }

    /// Plastic shear resistance (N)
    pub fn plastic_shear_resistance(&self) -> f64 {
        self.v_pl
    }

    /// Self-weight per metre (N/m)
    pub fn self_weight(&self) -> f64 {
        self.g0
    }

    /// Embodied carbon per metre (kg CO2-eq/m)
    pub fn co2(&self) -> f64 {
        self.co2
    }

    /// Cost per metre
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// E_0,mean · I (N·m²)
    pub fn stiffness(&self) -> f64 {
        self.ei
    }
}
