//! Rectangular reinforced-concrete section
//!
//! Each face is treated as a singly reinforced section with its own layer:
//! the bottom layer resists sagging moments, the top layer hogging ones.
//!
//! ```text
//! A_s = π·Ø²/(4·s)·b
//! d   = h − c_nom − Ø/2
//! ω   = A_s·f_sd / (d·b·f_cd)
//! M   = A_s·f_sd·d·(1 − ω/2)
//! x   = ω·d / 0.85
//! ```
//!
//! The ductility class of a face follows from x/d. An over-reinforced face
//! keeps its computed resistance; the member decides whether it may be used.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::design_code::{sia_ref, DuctilityThresholds};
use crate::equations::section::{
    effective_depth, mechanical_reinforcement_ratio, neutral_axis_depth,
    reinforced_moment_resistance, reinforcement_area,
};
use crate::errors::{ensure_positive, CalcError, CalcResult};
use crate::materials::{Concrete, ReinforcingSteel};

use super::{DuctilityClass, MomentSign, RectangularGeometry};

/// Bars of one face: diameter and spacing (m)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReinforcementLayer {
    /// Bar diameter Ø; zero for an unreinforced face
    pub diameter: f64,
    /// Centre-to-centre spacing s
    pub spacing: f64,
}

impl ReinforcementLayer {
    pub fn new(diameter: f64, spacing: f64) -> CalcResult<Self> {
        if !(diameter.is_finite() && diameter >= 0.0) {
            return Err(CalcError::invalid_input(
                "diameter",
                diameter.to_string(),
                "Bar diameter must be finite and non-negative",
            ));
        }
        ensure_positive("spacing", spacing)?;
        Ok(ReinforcementLayer { diameter, spacing })
    }
}

/// Bottom and top reinforcement of a section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReinforcementLayout {
    pub bottom: ReinforcementLayer,
    pub top: ReinforcementLayer,
}

impl ReinforcementLayout {
    /// Layout from (Ø, s) pairs of the bottom and top face.
    ///
    /// ```rust
    /// use section_core::sections::ReinforcementLayout;
    ///
    /// let layout = ReinforcementLayout::new((0.014, 0.15), (0.010, 0.15)).unwrap();
    /// assert_eq!(layout.bottom.diameter, 0.014);
    /// ```
    pub fn new(bottom: (f64, f64), top: (f64, f64)) -> CalcResult<Self> {
        Ok(ReinforcementLayout {
            bottom: ReinforcementLayer::new(bottom.0, bottom.1)?,
            top: ReinforcementLayer::new(top.0, top.1)?,
        })
    }
}

/// Bending figures of one face
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaceResistance {
    /// Reinforcement area A_s (m²)
    pub a_s: f64,
    /// Effective depth d (m)
    pub d: f64,
    /// Mechanical reinforcement ratio ω
    pub omega: f64,
    /// Bending resistance M_Rd (N·m)
    pub m_rd: f64,
    /// Neutral axis depth x (m)
    pub x: f64,
    /// x/d
    pub x_over_d: f64,
    pub class: DuctilityClass,
}

impl FaceResistance {
    fn compute(
        geometry: &RectangularGeometry,
        layer: &ReinforcementLayer,
        c_nom: f64,
        f_sd: f64,
        f_cd: f64,
        thresholds: &DuctilityThresholds,
    ) -> CalcResult<Self> {
        let d = effective_depth(geometry.h, c_nom, layer.diameter);
        if d <= 0.0 {
            return Err(CalcError::invalid_input(
                "h",
                geometry.h.to_string(),
                format!("No effective depth left after cover {} m and Ø {} m", c_nom, layer.diameter),
            ));
        }
        let a_s = reinforcement_area(layer.diameter, layer.spacing, geometry.b);
        let omega = mechanical_reinforcement_ratio(a_s, f_sd, d, geometry.b, f_cd);
        let x = neutral_axis_depth(omega, d, thresholds.block_factor);
        let x_over_d = x / d;
        Ok(FaceResistance {
            a_s,
            d,
            omega,
            m_rd: reinforced_moment_resistance(a_s, f_sd, d, omega),
            x,
            x_over_d,
            class: DuctilityClass::from_neutral_axis_ratio(x_over_d, thresholds),
        })
    }
}

/// Rectangular reinforced-concrete section.
#[derive(Debug, Clone, PartialEq)]
pub struct RectangularConcrete {
    geometry: RectangularGeometry,
    concrete: Arc<Concrete>,
    steel: Arc<ReinforcingSteel>,
    layout: ReinforcementLayout,
    c_nom: f64,
    phi: f64,
    thresholds: DuctilityThresholds,
    bottom: FaceResistance,
    top: FaceResistance,
    g0: f64,
    co2: f64,
    cost: f64,
    ei: f64,
}

impl RectangularConcrete {
    /// Creep factor used when none is given
    pub const DEFAULT_PHI: f64 = 2.0;

    /// Nominal cover to the bar surface (m)
    pub const DEFAULT_COVER: f64 = 0.03;

    /// Build a section with default cover and creep factor.
    pub fn new(
        concrete: Arc<Concrete>,
        steel: Arc<ReinforcingSteel>,
        geometry: RectangularGeometry,
        layout: ReinforcementLayout,
        thresholds: DuctilityThresholds,
    ) -> CalcResult<Self> {
        Self::with_options(
            concrete,
            steel,
            geometry,
            layout,
            thresholds,
            Self::DEFAULT_COVER,
            Self::DEFAULT_PHI,
        )
    }

    /// Build a section with explicit cover and creep factor.
    ///
    /// Fails with `DesignValuesNotDerived` if either material has no design
    /// values, and with `InvalidInput` if the cover leaves no effective depth.
    pub fn with_options(
        concrete: Arc<Concrete>,
        steel: Arc<ReinforcingSteel>,
        geometry: RectangularGeometry,
        layout: ReinforcementLayout,
        thresholds: DuctilityThresholds,
        c_nom: f64,
        phi: f64,
    ) -> CalcResult<Self> {
        ensure_positive("c_nom", c_nom)?;
        ensure_positive("phi", phi)?;
        let f_cd = concrete.design_values()?.f_cd;
        let f_sd = steel.f_sd()?;

        let bottom = FaceResistance::compute(&geometry, &layout.bottom, c_nom, f_sd, f_cd, &thresholds)?;
        let top = FaceResistance::compute(&geometry, &layout.top, c_nom, f_sd, f_cd, &thresholds)?;
        for (face, r) in [("bottom", &bottom), ("top", &top)] {
            if r.class == DuctilityClass::Inadequate {
                log::debug!(
                    "{} face of h = {:.3} m: x/d = {:.3} exceeds {} ({})",
                    face,
                    geometry.h,
                    r.x_over_d,
                    thresholds.class2_max,
                    sia_ref::DUCTILITY
                );
            }
        }

        let area = geometry.area();
        let a_s_total = bottom.a_s + top.a_s;
        let net_concrete = area - a_s_total;

        Ok(RectangularConcrete {
            g0: concrete.unit_weight * area,
            co2: a_s_total * steel.gwp_per_volume() + net_concrete * concrete.gwp_per_volume(),
            cost: a_s_total * steel.product.cost
                + net_concrete * concrete.product.cost
                + concrete.cost_per_length(),
            ei: concrete.e_cm * geometry.moment_of_inertia(),
            geometry,
            concrete,
            steel,
            layout,
            c_nom,
            phi,
            thresholds,
            bottom,
            top,
        })
    }

    /// Same materials, cover and top layer with a new height and bottom bar diameter.
    pub fn with_height_and_bottom_diameter(&self, h: f64, bottom_diameter: f64) -> CalcResult<Self> {
        let layout = ReinforcementLayout {
            bottom: ReinforcementLayer::new(bottom_diameter, self.layout.bottom.spacing)?,
            top: self.layout.top,
        };
        Self::with_options(
            Arc::clone(&self.concrete),
            Arc::clone(&self.steel),
            self.geometry.with_height(h)?,
            layout,
            self.thresholds,
            self.c_nom,
            self.phi,
        )
    }

    pub fn geometry(&self) -> &RectangularGeometry {
        &self.geometry
    }

    pub fn concrete(&self) -> &Concrete {
        &self.concrete
    }

    pub fn steel(&self) -> &ReinforcingSteel {
        &self.steel
    }

    pub fn layout(&self) -> &ReinforcementLayout {
        &self.layout
    }

    /// Nominal cover (m)
    pub fn cover(&self) -> f64 {
        self.c_nom
    }

    pub fn phi(&self) -> f64 {
        self.phi
    }

    /// x/d limits the faces were classified with
    pub fn thresholds(&self) -> &DuctilityThresholds {
        &self.thresholds
    }

    /// Whether either face has insufficient deformation capacity
    pub fn is_over_reinforced(&self) -> bool {
        self.bottom.class == DuctilityClass::Inadequate || self.top.class == DuctilityClass::Inadequate
    }

    /// Bottom face, resisting sagging moments
    pub fn bottom(&self) -> &FaceResistance {
        &self.bottom
    }

    /// Top face, resisting hogging moments
    pub fn top(&self) -> &FaceResistance {
        &self.top
    }

    /// Face in tension under a moment of the given sign
    pub fn face(&self, sign: MomentSign) -> &FaceResistance {
        match sign {
            MomentSign::Positive => &self.bottom,
            MomentSign::Negative => &self.top,
        }
    }

    /// Total reinforcement area of both faces (m²)
    pub fn reinforcement_area(&self) -> f64 {
        self.bottom.a_s + self.top.a_s
    }

    /// Self-weight per metre (N/m)
    pub fn self_weight(&self) -> f64 {
        self.g0
    }

    /// Embodied carbon per metre, rebar plus net concrete (kg CO2-eq/m)
    pub fn co2(&self) -> f64 {
        self.co2
    }

    /// Cost per metre, rebar plus net concrete plus formwork
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Uncracked E_cm · I (N·m²)
    pub fn stiffness(&self) -> f64 {
        self.ei
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design_code::{ConcreteFactors, SteelFactors};
    use crate::store::TomlPropertyStore;

    fn materials() -> (Arc<Concrete>, Arc<ReinforcingSteel>) {
        let store = TomlPropertyStore::builtin().unwrap();
        (
            Arc::new(Concrete::load(store, "C25/30").unwrap().with_design_values(&ConcreteFactors::default())),
            Arc::new(
                ReinforcingSteel::load(store, "B500B")
                    .unwrap()
                    .with_design_values(&SteelFactors::default()),
            ),
        )
    }

    fn section(h: f64, bottom_diameter: f64) -> RectangularConcrete {
        let (concrete, steel) = materials();
        RectangularConcrete::new(
            concrete,
            steel,
            RectangularGeometry::new(1.0, h).unwrap(),
            ReinforcementLayout::new((bottom_diameter, 0.15), (0.01, 0.15)).unwrap(),
            DuctilityThresholds::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_bottom_face() {
        let s = section(0.2, 0.01);
        let f = s.bottom();
        assert!((f.d - 0.165).abs() < 1e-12);
        assert!((f.a_s - 5.236e-4).abs() < 1e-7);
        assert!((f.omega - 0.0828).abs() < 1e-3);
        assert!((f.m_rd - 36_008.0).abs() < 5.0);
        assert_eq!(f.class, DuctilityClass::Class1);
        assert_eq!(s.face(MomentSign::Positive), s.bottom());
        assert_eq!(s.face(MomentSign::Negative), s.top());
    }

    #[test]
    fn test_resistance_increases_with_diameter() {
        let mut previous = section(0.2, 0.006);
        for i in 7..=16 {
            let s = section(0.2, 0.001 * i as f64);
            assert!(s.bottom().a_s > previous.bottom().a_s);
            assert!(s.bottom().omega > previous.bottom().omega);
            assert!(s.bottom().m_rd > previous.bottom().m_rd);
            assert!(s.bottom().x_over_d <= 0.5);
            previous = s;
        }
    }

    #[test]
    fn test_over_reinforced_face_keeps_resistance() {
        let s = section(0.2, 0.04);
        assert_eq!(s.bottom().class, DuctilityClass::Inadequate);
        assert!(s.bottom().x_over_d > 0.5);
        assert!(s.bottom().m_rd > 0.0);
    }

    #[test]
    fn test_carbon_does_not_double_count() {
        let s = section(0.2, 0.01);
        let (concrete, steel) = materials();
        let a_s = s.reinforcement_area();
        let expected = a_s * steel.gwp_per_volume() + (0.2 - a_s) * concrete.gwp_per_volume();
        assert!((s.co2() - expected).abs() < 1e-9);
        // Rebar has a higher carbon density than the concrete it displaces
        assert!(s.co2() > 0.2 * concrete.gwp_per_volume());
    }

    #[test]
    fn test_cost_includes_formwork() {
        let s = section(0.2, 0.01);
        let a_s = s.reinforcement_area();
        let expected = a_s * 11_775.0 + (0.2 - a_s) * 220.0 + 50.0;
        assert!((s.cost() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_weight_and_stiffness() {
        let s = section(0.2, 0.01);
        assert!((s.self_weight() - 5_000.0).abs() < 1e-9);
        assert!((s.stiffness() - 30_000.0e6 * 0.2f64.powi(3) / 12.0).abs() < 1e-3);
        assert_eq!(s.phi(), RectangularConcrete::DEFAULT_PHI);
    }

    #[test]
    fn test_identical_inputs_identical_values() {
        assert_eq!(section(0.18, 0.012), section(0.18, 0.012));
        let rebuilt = section(0.2, 0.01).with_height_and_bottom_diameter(0.18, 0.012).unwrap();
        assert_eq!(rebuilt, section(0.18, 0.012));
    }

    #[test]
    fn test_cover_leaves_no_depth() {
        let (concrete, steel) = materials();
        let result = RectangularConcrete::new(
            concrete,
            steel,
            RectangularGeometry::new(1.0, 0.03).unwrap(),
            ReinforcementLayout::new((0.01, 0.15), (0.01, 0.15)).unwrap(),
            DuctilityThresholds::default(),
        );
        assert!(matches!(result, Err(CalcError::InvalidInput { .. })));
    }

    #[test]
    fn test_unreinforced_top_face() {
        let (concrete, steel) = materials();
        let s = RectangularConcrete::new(
            concrete,
            steel,
            RectangularGeometry::new(1.0, 0.2).unwrap(),
            ReinforcementLayout::new((0.01, 0.15), (0.0, 0.15)).unwrap(),
            DuctilityThresholds::default(),
        )
        .unwrap();
        assert_eq!(s.top().m_rd, 0.0);
        assert_eq!(s.top().class, DuctilityClass::Class1);
    }
}
