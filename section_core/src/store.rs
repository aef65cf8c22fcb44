//! # Property Store
//!
//! Read-only lookup of raw material, product and floor-layer properties by
//! name. The calculation core only depends on the [`PropertyStore`] trait; the
//! bundled [`TomlPropertyStore`] reads the tables from a TOML document.
//!
//! Values are converted from table units to SI when a record is returned, so
//! every record handed to a material constructor is already in Pa, N/m³,
//! kg/m³ and kg CO2-eq per kg.
//!
//! ## TOML Layout
//!
//! ```toml
//! [materials."GL24h"]
//! strength_bend = 24.0      # MPa
//! strength_shear = 1.8      # MPa
//! e_modulus = 11000.0       # MPa
//! unit_weight = 5.0         # kN/m3
//!
//! [products."GL24h"]
//! density = 439.0           # kg/m3
//! gwp = 253.0               # g CO2-eq/kg
//! cost = 1200.0             # per m3
//!
//! [floor_layers."Glaswolle"]
//! density = 80.0            # kg/m3
//! unit_weight = 0.8         # kN/m3
//! gwp = 1100.0              # g CO2-eq/kg
//! ```
//!
//! ## Example
//!
//! ```rust
//! use section_core::store::{PropertyStore, TomlPropertyStore};
//!
//! let store = TomlPropertyStore::builtin().unwrap();
//! let glulam = store.mechanical("GL24h").unwrap();
//! assert_eq!(glulam.strength_bend, Some(24.0e6));
//! assert!(store.mechanical("C90/105").is_err());
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::{KilonewtonsPerCubicMeter, Megapascals, NewtonsPerCubicMeter, Pascals};

/// Grams per kilogram, for GWP table values given in g CO2-eq/kg
const GRAMS_PER_KILOGRAM: f64 = 1.0e3;

static BUILTIN_SOURCE: &str = include_str!("../data/properties.toml");

static BUILTIN: Lazy<CalcResult<TomlPropertyStore>> =
    Lazy::new(|| TomlPropertyStore::from_toml_str(BUILTIN_SOURCE));

/// Mechanical properties of a material grade, SI units.
///
/// Columns that do not apply to a material family are `None` (a timber grade
/// has no compressive strength entry, reinforcing steel no unit weight).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MechanicalRecord {
    /// Grade identifier, e.g. "C25/30"
    pub name: String,
    /// Characteristic compressive strength (Pa)
    pub strength_comp: Option<f64>,
    /// Characteristic tensile strength (Pa)
    pub strength_tens: Option<f64>,
    /// Characteristic bending strength (Pa)
    pub strength_bend: Option<f64>,
    /// Shear strength (Pa)
    pub strength_shear: Option<f64>,
    /// Mean modulus of elasticity (Pa)
    pub e_modulus: Option<f64>,
    /// Specific weight for load calculation (N/m³)
    pub unit_weight: Option<f64>,
}

impl MechanicalRecord {
    /// Return a column value or a `MissingField` error naming the column.
    pub fn require(&self, column: &str, value: Option<f64>) -> CalcResult<f64> {
        value.ok_or_else(|| CalcError::missing_field(format!("{}.{}", self.name, column)))
    }
}

/// Environmental and cost data of a product, SI units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Grade the product is associated with
    pub mech_prop: String,
    /// Commercial product name
    pub product_name: Option<String>,
    /// Data source (EPD, KBOB, ...)
    pub source: Option<String>,
    /// Density (kg/m³)
    pub density: f64,
    /// Embodied carbon factor (kg CO2-eq per kg)
    pub gwp: f64,
    /// Cost per m³
    pub cost: f64,
    /// Secondary cost per metre of member (formwork etc.)
    pub cost2: Option<f64>,
}

/// Fixed properties of a floor build-up layer, SI units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorLayerRecord {
    /// Layer name
    pub name: String,
    /// Fixed thickness, when the product only comes in one (m)
    pub h_fix: Option<f64>,
    /// Density (kg/m³)
    pub density: f64,
    /// Specific weight (N/m³)
    pub unit_weight: f64,
    /// Embodied carbon factor (kg CO2-eq per kg)
    pub gwp: f64,
}

/// Read-only property lookup keyed by material or layer name.
///
/// A miss is always an error; implementations must never fall back to a
/// default property set.
pub trait PropertyStore {
    /// Mechanical properties of a grade
    fn mechanical(&self, name: &str) -> CalcResult<MechanicalRecord>;

    /// Product data (density, GWP, cost) of the product with this grade
    fn product(&self, mech_prop: &str) -> CalcResult<ProductRecord>;

    /// Floor-layer properties
    fn floor_layer(&self, name: &str) -> CalcResult<FloorLayerRecord>;
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RawMechanical {
    strength_comp: Option<f64>,
    strength_tens: Option<f64>,
    strength_bend: Option<f64>,
    strength_shear: Option<f64>,
    e_modulus: Option<f64>,
    unit_weight: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawProduct {
    product_name: Option<String>,
    source: Option<String>,
    density: f64,
    gwp: f64,
    cost: f64,
    cost2: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawFloorLayer {
    h_fix: Option<f64>,
    density: f64,
    unit_weight: f64,
    gwp: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct StoreTables {
    #[serde(default)]
    materials: BTreeMap<String, RawMechanical>,
    #[serde(default)]
    products: BTreeMap<String, RawProduct>,
    #[serde(default)]
    floor_layers: BTreeMap<String, RawFloorLayer>,
}

fn mpa(value: Option<f64>) -> Option<f64> {
    value.map(|v| Pascals::from(Megapascals(v)).0)
}

fn kn_per_m3(value: f64) -> f64 {
    NewtonsPerCubicMeter::from(KilonewtonsPerCubicMeter(value)).0
}

/// Property store backed by TOML tables.
#[derive(Debug, Clone, Default)]
pub struct TomlPropertyStore {
    tables: StoreTables,
}

impl TomlPropertyStore {
    /// Parse a store from a TOML document.
    pub fn from_toml_str(source: &str) -> CalcResult<Self> {
        let tables: StoreTables =
            toml::from_str(source).map_err(|e| CalcError::serialization(e.to_string()))?;
        Ok(TomlPropertyStore { tables })
    }

    /// Read and parse a store file.
    pub fn from_path(path: &Path) -> CalcResult<Self> {
        let source = fs::read_to_string(path)
            .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
        Self::from_toml_str(&source)
    }

    /// The embedded dummy database (C25/30, B500B, GL24h and four floor layers).
    pub fn builtin() -> CalcResult<&'static TomlPropertyStore> {
        (*BUILTIN).as_ref().map_err(|e| e.clone())
    }

    /// Names of all mechanical grades, sorted
    pub fn material_names(&self) -> Vec<&str> {
        self.tables.materials.keys().map(String::as_str).collect()
    }

    /// Names of all floor layers, sorted
    pub fn floor_layer_names(&self) -> Vec<&str> {
        self.tables.floor_layers.keys().map(String::as_str).collect()
    }
}

impl PropertyStore for TomlPropertyStore {
    fn mechanical(&self, name: &str) -> CalcResult<MechanicalRecord> {
        let raw = self
            .tables
            .materials
            .get(name)
            .ok_or_else(|| CalcError::material_not_found(name))?;
        Ok(MechanicalRecord {
            name: name.to_string(),
            strength_comp: mpa(raw.strength_comp),
            strength_tens: mpa(raw.strength_tens),
            strength_bend: mpa(raw.strength_bend),
            strength_shear: mpa(raw.strength_shear),
            e_modulus: mpa(raw.e_modulus),
            unit_weight: raw.unit_weight.map(kn_per_m3),
        })
    }

    fn product(&self, mech_prop: &str) -> CalcResult<ProductRecord> {
        let raw = self
            .tables
            .products
            .get(mech_prop)
            .ok_or_else(|| CalcError::material_not_found(mech_prop))?;
        Ok(ProductRecord {
            mech_prop: mech_prop.to_string(),
            product_name: raw.product_name.clone(),
            source: raw.source.clone(),
            density: raw.density,
            gwp: raw.gwp / GRAMS_PER_KILOGRAM,
            cost: raw.cost,
            cost2: raw.cost2,
        })
    }

    fn floor_layer(&self, name: &str) -> CalcResult<FloorLayerRecord> {
        let raw = self
            .tables
            .floor_layers
            .get(name)
            .ok_or_else(|| CalcError::layer_not_found(name))?;
        Ok(FloorLayerRecord {
            name: name.to_string(),
            h_fix: raw.h_fix,
            density: raw.density,
            unit_weight: kn_per_m3(raw.unit_weight),
            gwp: raw.gwp / GRAMS_PER_KILOGRAM,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_parses() {
        let store = TomlPropertyStore::builtin().unwrap();
        assert_eq!(store.material_names(), vec!["B500B", "C25/30", "GL24h"]);
        assert_eq!(store.floor_layer_names().len(), 4);
    }

    #[test]
    fn test_mechanical_units_converted() {
        let store = TomlPropertyStore::builtin().unwrap();
        let concrete = store.mechanical("C25/30").unwrap();
        assert_eq!(concrete.strength_comp, Some(25.0e6));
        assert_eq!(concrete.e_modulus, Some(30_000.0e6));
        assert_eq!(concrete.unit_weight, Some(25_000.0));
        assert_eq!(concrete.strength_bend, None);
    }

    #[test]
    fn test_product_gwp_per_kilogram() {
        let store = TomlPropertyStore::builtin().unwrap();
        let steel = store.product("B500B").unwrap();
        assert!((steel.gwp - 0.773).abs() < 1e-12);
        assert_eq!(steel.cost2, None);
        let concrete = store.product("C25/30").unwrap();
        assert_eq!(concrete.cost2, Some(50.0));
    }

    #[test]
    fn test_floor_layer_lookup() {
        let store = TomlPropertyStore::builtin().unwrap();
        let wool = store.floor_layer("Glaswolle").unwrap();
        assert_eq!(wool.h_fix, None);
        assert!((wool.unit_weight - 800.0).abs() < 1e-9);
        let screed = store.floor_layer("Unterlagsboden Zement, 85 mm").unwrap();
        assert_eq!(screed.h_fix, Some(0.085));
    }

    #[test]
    fn test_lookup_miss_is_error() {
        let store = TomlPropertyStore::builtin().unwrap();
        assert!(matches!(
            store.mechanical("S355"),
            Err(CalcError::MaterialNotFound { .. })
        ));
        assert!(matches!(
            store.product("S355"),
            Err(CalcError::MaterialNotFound { .. })
        ));
        assert!(matches!(
            store.floor_layer("Linoleum"),
            Err(CalcError::LayerNotFound { .. })
        ));
    }

    #[test]
    fn test_require_reports_column() {
        let store = TomlPropertyStore::builtin().unwrap();
        let steel = store.mechanical("B500B").unwrap();
        let err = steel.require("unit_weight", steel.unit_weight).unwrap_err();
        assert_eq!(err, CalcError::missing_field("B500B.unit_weight"));
    }

    #[test]
    fn test_custom_store() {
        let store = TomlPropertyStore::from_toml_str(
            r#"
            [materials."C30/37"]
            strength_comp = 30.0
            e_modulus = 33000.0
            unit_weight = 25.0
            "#,
        )
        .unwrap();
        assert!(store.mechanical("C30/37").is_ok());
        assert!(store.product("C30/37").is_err());
    }

    #[test]
    fn test_missing_file() {
        let result = TomlPropertyStore::from_path(Path::new("/nonexistent/properties.toml"));
        assert!(matches!(result, Err(CalcError::FileError { .. })));
    }
}
