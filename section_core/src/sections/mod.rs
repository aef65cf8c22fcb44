//! # Cross-Sections
//!
//! Rectangular timber and reinforced-concrete beam sections. A section is a
//! value object: every resistance, stiffness, weight and carbon figure is
//! computed once in the constructor from the geometry and the (shared,
//! already derived) materials. Changing the geometry means building a new
//! section, see [`CrossSection::with_trial`].
//!
//! ## Variants
//!
//! | Tag      | Type                    | Bending                          |
//! |----------|-------------------------|----------------------------------|
//! | `wd_rec` | [`RectangularWood`]     | elastic, `M = 2·I·f_md/h`        |
//! | `rc_rec` | [`RectangularConcrete`] | per face, reinforcement ratio ω  |
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use section_core::design_code::DesignCode;
//! use section_core::materials::Wood;
//! use section_core::sections::{CrossSection, MomentSign, RectangularGeometry, RectangularWood};
//! use section_core::store::TomlPropertyStore;
//!
//! let code = DesignCode::sia_262_265();
//! let glulam = Arc::new(
//!     Wood::load(TomlPropertyStore::builtin().unwrap(), "GL24h")
//!         .unwrap()
//!         .with_design_values(&code.timber),
//! );
//! let geometry = RectangularGeometry::new(1.0, 0.2).unwrap();
//! let section = CrossSection::from(RectangularWood::new(glulam, geometry).unwrap());
//!
//! // b·h²/6 · 16 MPa
//! assert!((section.moment_resistance(MomentSign::Positive) - 106_666.67).abs() < 0.01);
//! ```

pub mod concrete;
pub mod wood;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::design_code::DuctilityThresholds;
use crate::equations::section::{rectangular_area, rectangular_moment_of_inertia};
use crate::errors::{ensure_positive, CalcError, CalcResult};

pub use concrete::{FaceResistance, RectangularConcrete, ReinforcementLayer, ReinforcementLayout};
pub use wood::RectangularWood;

/// Width and height of a solid rectangle (m)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectangularGeometry {
    /// Width b (m)
    pub b: f64,
    /// Height h (m)
    pub h: f64,
}

impl RectangularGeometry {
    /// Create a geometry, rejecting non-positive or non-finite dimensions.
    pub fn new(b: f64, h: f64) -> CalcResult<Self> {
        ensure_positive("b", b)?;
        ensure_positive("h", h)?;
        Ok(RectangularGeometry { b, h })
    }

    /// Same width, another height.
    pub fn with_height(&self, h: f64) -> CalcResult<Self> {
        Self::new(self.b, h)
    }

    /// Gross area A = b·h (m²)
    pub fn area(&self) -> f64 {
        rectangular_area(self.b, self.h)
    }

    /// Second moment of area I = b·h³/12 (m⁴)
    pub fn moment_of_inertia(&self) -> f64 {
        rectangular_moment_of_inertia(self.b, self.h)
    }
}

/// Ductility class of a bending face, best first.
///
/// The derived ordering follows the declaration order, so a section meets a
/// requirement when its class is less than or equal to the required one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DuctilityClass {
    /// x/d ≤ 0.35: plastic analysis, plastic resistance
    Class1,
    /// x/d ≤ 0.5: elastic analysis with limited redistribution
    Class2,
    /// Elastic only (timber)
    Class3,
    /// x/d > 0.5: insufficient deformation capacity
    Inadequate,
}

impl DuctilityClass {
    /// Classify a concrete face by its neutral-axis ratio x/d.
    ///
    /// ```rust
    /// use section_core::design_code::DuctilityThresholds;
    /// use section_core::sections::DuctilityClass;
    ///
    /// let t = DuctilityThresholds::default();
    /// assert_eq!(DuctilityClass::from_neutral_axis_ratio(0.35, &t), DuctilityClass::Class1);
    /// assert_eq!(DuctilityClass::from_neutral_axis_ratio(0.5, &t), DuctilityClass::Class2);
    /// assert_eq!(DuctilityClass::from_neutral_axis_ratio(0.51, &t), DuctilityClass::Inadequate);
    /// ```
    pub fn from_neutral_axis_ratio(x_over_d: f64, thresholds: &DuctilityThresholds) -> Self {
        if x_over_d <= thresholds.class1_max {
            DuctilityClass::Class1
        } else if x_over_d <= thresholds.class2_max {
            DuctilityClass::Class2
        } else {
            DuctilityClass::Inadequate
        }
    }

    /// Numeric code as used in tables and reports (1, 2, 3, 99)
    pub fn code(&self) -> u8 {
        match self {
            DuctilityClass::Class1 => 1,
            DuctilityClass::Class2 => 2,
            DuctilityClass::Class3 => 3,
            DuctilityClass::Inadequate => 99,
        }
    }

    /// Whether this class satisfies `required`
    pub fn meets(&self, required: DuctilityClass) -> bool {
        *self <= required
    }
}

impl fmt::Display for DuctilityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Section family tag used to dispatch the optimizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionType {
    /// Rectangular timber section
    #[serde(rename = "wd_rec")]
    RectangularWood,
    /// Rectangular reinforced-concrete section
    #[serde(rename = "rc_rec")]
    RectangularConcrete,
}

impl SectionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionType::RectangularWood => "wd_rec",
            SectionType::RectangularConcrete => "rc_rec",
        }
    }
}

impl FromStr for SectionType {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wd_rec" => Ok(SectionType::RectangularWood),
            "rc_rec" => Ok(SectionType::RectangularConcrete),
            other => Err(CalcError::configuration(
                "section_type",
                other,
                "expected 'wd_rec' or 'rc_rec'",
            )),
        }
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sign of the bending moment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MomentSign {
    /// Sagging, tension at the bottom face
    #[serde(rename = "pos")]
    Positive,
    /// Hogging, tension at the top face
    #[serde(rename = "neg")]
    Negative,
}

impl FromStr for MomentSign {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pos" => Ok(MomentSign::Positive),
            "neg" => Ok(MomentSign::Negative),
            other => Err(CalcError::configuration(
                "moment_sign",
                other,
                "expected 'pos' or 'neg'",
            )),
        }
    }
}

/// Trial geometry handed to [`CrossSection::with_trial`] by the optimizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialGeometry {
    /// Section height (m)
    pub h: f64,
    /// Bottom bar diameter (m), concrete only
    pub bottom_diameter: Option<f64>,
}

/// A rectangular cross-section of either family.
#[derive(Debug, Clone, PartialEq)]
pub enum CrossSection {
    Wood(RectangularWood),
    Concrete(RectangularConcrete),
}

impl CrossSection {
    pub fn section_type(&self) -> SectionType {
        match self {
            CrossSection::Wood(_) => SectionType::RectangularWood,
            CrossSection::Concrete(_) => SectionType::RectangularConcrete,
        }
    }

    pub fn geometry(&self) -> &RectangularGeometry {
        match self {
            CrossSection::Wood(s) => s.geometry(),
            CrossSection::Concrete(s) => s.geometry(),
        }
    }

    /// Width (m)
    pub fn b(&self) -> f64 {
        self.geometry().b
    }

    /// Height (m)
    pub fn h(&self) -> f64 {
        self.geometry().h
    }

    /// Creep factor φ
    pub fn phi(&self) -> f64 {
        match self {
            CrossSection::Wood(s) => s.phi(),
            CrossSection::Concrete(s) => s.phi(),
        }
    }

    pub fn area(&self) -> f64 {
        self.geometry().area()
    }

    pub fn moment_of_inertia(&self) -> f64 {
        self.geometry().moment_of_inertia()
    }

    /// Bending resistance for the given moment sign (N·m)
    pub fn moment_resistance(&self, sign: MomentSign) -> f64 {
        match self {
            CrossSection::Wood(s) => s.moment_resistance(),
            CrossSection::Concrete(s) => s.face(sign).m_rd,
        }
    }

    /// Ductility class of the face in tension under the given sign
    pub fn ductility_class(&self, sign: MomentSign) -> DuctilityClass {
        match self {
            CrossSection::Wood(_) => RectangularWood::DUCTILITY_CLASS,
            CrossSection::Concrete(s) => s.face(sign).class,
        }
    }

    /// Shear resistance (N); not modelled for concrete
    pub fn shear_resistance(&self) -> Option<f64> {
        match self {
            CrossSection::Wood(s) => Some(s.shear_resistance()),
            CrossSection::Concrete(_) => None,
        }
    }

    /// Self-weight per metre (N/m)
    pub fn self_weight(&self) -> f64 {
        match self {
            CrossSection::Wood(s) => s.self_weight(),
            CrossSection::Concrete(s) => s.self_weight(),
        }
    }

    /// Embodied carbon per metre (kg CO2-eq/m)
    pub fn co2(&self) -> f64 {
        match self {
            CrossSection::Wood(s) => s.co2(),
            CrossSection::Concrete(s) => s.co2(),
        }
    }

    /// Cost per metre
    pub fn cost(&self) -> f64 {
        match self {
            CrossSection::Wood(s) => s.cost(),
            CrossSection::Concrete(s) => s.cost(),
        }
    }

    /// Bending stiffness E·I (N·m²), uncracked
    pub fn stiffness(&self) -> f64 {
        match self {
            CrossSection::Wood(s) => s.stiffness(),
            CrossSection::Concrete(s) => s.stiffness(),
        }
    }

    /// Build a new section of the same family and materials with trial geometry.
    ///
    /// The bottom diameter is ignored for timber; for concrete `None` keeps the
    /// current bottom layer.
    pub fn with_trial(&self, trial: TrialGeometry) -> CalcResult<CrossSection> {
        match self {
            CrossSection::Wood(s) => Ok(CrossSection::Wood(s.with_height(trial.h)?)),
            CrossSection::Concrete(s) => {
                let diameter = trial.bottom_diameter.unwrap_or(s.layout().bottom.diameter);
                Ok(CrossSection::Concrete(s.with_height_and_bottom_diameter(trial.h, diameter)?))
            }
        }
    }

    /// Concrete face data, `None` for timber
    pub fn concrete(&self) -> Option<&RectangularConcrete> {
        match self {
            CrossSection::Concrete(s) => Some(s),
            CrossSection::Wood(_) => None,
        }
    }

    /// Largest x/d of both faces; zero for timber
    pub fn max_neutral_axis_ratio(&self) -> f64 {
        match self {
            CrossSection::Wood(_) => 0.0,
            CrossSection::Concrete(s) => s.bottom().x_over_d.max(s.top().x_over_d),
        }
    }

    /// Short description for reports, e.g. "GL24h 1000x200"
    pub fn describe(&self) -> String {
        let g = self.geometry();
        let size = format!("{:.0}x{:.0}", g.b * 1000.0, g.h * 1000.0);
        match self {
            CrossSection::Wood(s) => format!("{} {}", s.material().grade, size),
            CrossSection::Concrete(s) => format!(
                "{} {} Ø{:.0}@{:.0}",
                s.concrete().grade,
                size,
                s.layout().bottom.diameter * 1000.0,
                s.layout().bottom.spacing * 1000.0
            ),
        }
    }
}

impl From<RectangularWood> for CrossSection {
    fn from(section: RectangularWood) -> Self {
        CrossSection::Wood(section)
    }
}

impl From<RectangularConcrete> for CrossSection {
    fn from(section: RectangularConcrete) -> Self {
        CrossSection::Concrete(section)
    }
}
