//! # Unit Types
//!
//! Type-safe wrappers for the units that cross the property-store boundary.
//! They are plain `f64` newtypes that serialize as bare numbers.
//!
//! ## SI Internally
//!
//! The calculation core works in base SI units only:
//! - Length: metres (m)
//! - Force: newtons (N)
//! - Stress and modulus: pascals (Pa)
//! - Line load: newtons per metre (N/m); area load: N/m²
//! - Specific weight: N/m³
//!
//! Store tables, on the other hand, are written in engineering table units
//! (MPa, kN/m³, kN/m²). The conversions below are applied once, when a record
//! is read, so no formula ever sees a mixed unit system.
//!
//! ## Example
//!
//! ```rust
//! use section_core::units::{Megapascals, Pascals, KilonewtonsPerSquareMeter, NewtonsPerSquareMeter};
//!
//! let fmk: Pascals = Megapascals(24.0).into();
//! assert_eq!(fmk.0, 24.0e6);
//!
//! let qk: NewtonsPerSquareMeter = KilonewtonsPerSquareMeter(2.0).into();
//! assert_eq!(qk.0, 2000.0);
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// Stress Units
// ============================================================================

/// Stress in pascals (N/m²)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pascals(pub f64);

/// Stress in megapascals (N/mm²)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Megapascals(pub f64);

impl From<Megapascals> for Pascals {
    fn from(mpa: Megapascals) -> Self {
        Pascals(mpa.0 * 1.0e6)
    }
}

impl From<Pascals> for Megapascals {
    fn from(pa: Pascals) -> Self {
        Megapascals(pa.0 / 1.0e6)
    }
}

// ============================================================================
// Specific Weight Units
// ============================================================================

/// Specific weight in N/m³
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewtonsPerCubicMeter(pub f64);

/// Specific weight in kN/m³
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KilonewtonsPerCubicMeter(pub f64);

impl From<KilonewtonsPerCubicMeter> for NewtonsPerCubicMeter {
    fn from(kn: KilonewtonsPerCubicMeter) -> Self {
        NewtonsPerCubicMeter(kn.0 * 1.0e3)
    }
}

impl From<NewtonsPerCubicMeter> for KilonewtonsPerCubicMeter {
    fn from(n: NewtonsPerCubicMeter) -> Self {
        KilonewtonsPerCubicMeter(n.0 / 1.0e3)
    }
}

// ============================================================================
// Area Load Units
// ============================================================================

/// Area load in N/m²
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewtonsPerSquareMeter(pub f64);

/// Area load in kN/m²
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KilonewtonsPerSquareMeter(pub f64);

impl From<KilonewtonsPerSquareMeter> for NewtonsPerSquareMeter {
    fn from(kn: KilonewtonsPerSquareMeter) -> Self {
        NewtonsPerSquareMeter(kn.0 * 1.0e3)
    }
}

impl From<NewtonsPerSquareMeter> for KilonewtonsPerSquareMeter {
    fn from(n: NewtonsPerSquareMeter) -> Self {
        KilonewtonsPerSquareMeter(n.0 / 1.0e3)
    }
}

// ============================================================================
// Moment Units
// ============================================================================

/// Moment in newton-metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewtonMeters(pub f64);

/// Moment in kilonewton-metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KilonewtonMeters(pub f64);

impl From<NewtonMeters> for KilonewtonMeters {
    fn from(nm: NewtonMeters) -> Self {
        KilonewtonMeters(nm.0 / 1.0e3)
    }
}

impl From<KilonewtonMeters> for NewtonMeters {
    fn from(knm: KilonewtonMeters) -> Self {
        NewtonMeters(knm.0 * 1.0e3)
    }
}

// ============================================================================
// Length Units
// ============================================================================

/// Length in metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Length in millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * 1.0e3)
    }
}

impl From<Millimeters> for Meters {
    fn from(mm: Millimeters) -> Self {
        Meters(mm.0 / 1.0e3)
    }
}
