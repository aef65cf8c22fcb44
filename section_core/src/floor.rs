//! # Floor Build-Up
//!
//! Finish, screed, insulation and fill layers on top of the structure. Each
//! layer is resolved against the property store once; the build-up is an
//! ordered list whose totals are plain sums.
//!
//! ## Resolution Rules
//!
//! - Thickness: the override if given, else the layer's fixed thickness, else
//!   `MissingField`.
//! - Density: the override if given, else the store value. An overridden
//!   density also replaces the unit weight by `ρ · 10 N/kg`.
//!
//! ```text
//! g_k   = γ · h        (N/m²)
//! co2   = ρ · h · gwp  (kg CO2-eq/m²)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use section_core::floor::{FloorBuildUp, FloorLayerSpec};
//! use section_core::store::TomlPropertyStore;
//!
//! let store = TomlPropertyStore::builtin().unwrap();
//! let floor = FloorBuildUp::from_specs(
//!     store,
//!     &[
//!         FloorLayerSpec::new("Parkett 2-Schicht werkversiegelt, 11 mm"),
//!         FloorLayerSpec::new("Unterlagsboden Zement, 85 mm"),
//!         FloorLayerSpec::new("Glaswolle").with_thickness(0.03),
//!     ],
//!     10.0,
//! )
//! .unwrap();
//! assert!((floor.total_thickness() - 0.126).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{ensure_positive, CalcError, CalcResult};
use crate::store::PropertyStore;

/// A layer as requested by the caller: a store name plus optional overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorLayerSpec {
    pub name: String,
    /// Thickness override (m)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thickness: Option<f64>,
    /// Density override (kg/m³)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density: Option<f64>,
}

impl FloorLayerSpec {
    pub fn new(name: impl Into<String>) -> Self {
        FloorLayerSpec {
            name: name.into(),
            thickness: None,
            density: None,
        }
    }

    pub fn with_thickness(mut self, thickness: f64) -> Self {
        self.thickness = Some(thickness);
        self
    }

    pub fn with_density(mut self, density: f64) -> Self {
        self.density = Some(density);
        self
    }
}

/// A resolved floor layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorLayer {
    pub name: String,
    /// Thickness h (m)
    pub thickness: f64,
    /// Density ρ (kg/m³)
    pub density: f64,
    /// Specific weight γ (N/m³)
    pub unit_weight: f64,
    /// Carbon factor (kg CO2-eq/kg)
    pub gwp: f64,
}

impl FloorLayer {
    /// Resolve a layer spec against the store.
    ///
    /// `density_to_unit_weight` (N/kg) converts an overridden density to a
    /// unit weight.
    pub fn resolve(
        store: &dyn PropertyStore,
        spec: &FloorLayerSpec,
        density_to_unit_weight: f64,
    ) -> CalcResult<Self> {
        let record = store.floor_layer(&spec.name)?;

        let thickness = spec
            .thickness
            .or(record.h_fix)
            .ok_or_else(|| CalcError::missing_field(format!("{}.thickness", spec.name)))?;
        ensure_positive("thickness", thickness)?;

        let (density, unit_weight) = match spec.density {
            Some(density) => {
                ensure_positive("density", density)?;
                (density, density * density_to_unit_weight)
            }
            None => (record.density, record.unit_weight),
        };

        Ok(FloorLayer {
            name: spec.name.clone(),
            thickness,
            density,
            unit_weight,
            gwp: record.gwp,
        })
    }

    /// Self-weight per area (N/m²)
    pub fn weight(&self) -> f64 {
        self.unit_weight * self.thickness
    }

    /// Embodied carbon per area (kg CO2-eq/m²)
    pub fn co2(&self) -> f64 {
        self.density * self.thickness * self.gwp
    }
}

/// Ordered stack of floor layers with summed totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FloorBuildUp {
    layers: Vec<FloorLayer>,
    thickness: f64,
    weight: f64,
    co2: f64,
}

impl FloorBuildUp {
    /// Resolve and compose a list of layer specs.
    ///
    /// The first lookup miss or missing thickness aborts the build-up.
    pub fn from_specs(
        store: &dyn PropertyStore,
        specs: &[FloorLayerSpec],
        density_to_unit_weight: f64,
    ) -> CalcResult<Self> {
        let layers = specs
            .iter()
            .map(|spec| FloorLayer::resolve(store, spec, density_to_unit_weight))
            .collect::<CalcResult<Vec<_>>>()?;
        Ok(Self::from_layers(layers))
    }

    /// Compose already resolved layers.
    pub fn from_layers(layers: Vec<FloorLayer>) -> Self {
        let thickness = layers.iter().map(|l| l.thickness).sum();
        let weight = layers.iter().map(FloorLayer::weight).sum();
        let co2 = layers.iter().map(FloorLayer::co2).sum();
        FloorBuildUp {
            layers,
            thickness,
            weight,
            co2,
        }
    }

    /// Layers in the order given
    pub fn layers(&self) -> &[FloorLayer] {
        &self.layers
    }

    /// Total thickness (m)
    pub fn total_thickness(&self) -> f64 {
        self.thickness
    }

    /// Self-weight per area g1 (N/m²)
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Embodied carbon per area (kg CO2-eq/m²)
    pub fn co2(&self) -> f64 {
        self.co2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::TomlPropertyStore;

    const PARQUET: &str = "Parkett 2-Schicht werkversiegelt, 11 mm";
    const SCREED: &str = "Unterlagsboden Zement, 85 mm";

    fn specs() -> Vec<FloorLayerSpec> {
        vec![
            FloorLayerSpec::new(PARQUET),
            FloorLayerSpec::new(SCREED),
            FloorLayerSpec::new("Glaswolle").with_thickness(0.03),
            FloorLayerSpec::new("Kies gebrochen").with_thickness(0.12),
        ]
    }

    #[test]
    fn test_totals() {
        let floor = FloorBuildUp::from_specs(TomlPropertyStore::builtin().unwrap(), &specs(), 10.0).unwrap();
        assert_eq!(floor.layers().len(), 4);
        assert!((floor.total_thickness() - 0.246).abs() < 1e-12);
        // 8·0.011 + 22·0.085 + 0.8·0.03 + 20·0.12 kN/m²
        assert!((floor.weight() - 4_382.0).abs() < 1e-6);
        let co2 = 555.0 * 0.011 * 1.279 + 1850.0 * 0.085 * 0.120 + 80.0 * 0.03 * 1.1 + 2000.0 * 0.12 * 0.018;
        assert!((floor.co2() - co2).abs() < 1e-9);
    }

    #[test]
    fn test_order_does_not_change_totals() {
        let store = TomlPropertyStore::builtin().unwrap();
        let forward = FloorBuildUp::from_specs(store, &specs(), 10.0).unwrap();
        let mut reversed_specs = specs();
        reversed_specs.reverse();
        let reversed = FloorBuildUp::from_specs(store, &reversed_specs, 10.0).unwrap();
        let mut rotated_specs = specs();
        rotated_specs.rotate_left(1);
        let rotated = FloorBuildUp::from_specs(store, &rotated_specs, 10.0).unwrap();

        for other in [&reversed, &rotated] {
            assert!((forward.total_thickness() - other.total_thickness()).abs() < 1e-12);
            assert!((forward.weight() - other.weight()).abs() < 1e-9);
            assert!((forward.co2() - other.co2()).abs() < 1e-9);
        }
        assert_eq!(reversed.layers()[0].name, "Kies gebrochen");
    }

    #[test]
    fn test_density_override_sets_unit_weight() {
        let store = TomlPropertyStore::builtin().unwrap();
        let layer = FloorLayer::resolve(store, &FloorLayerSpec::new(SCREED).with_density(2000.0), 10.0).unwrap();
        assert_eq!(layer.density, 2000.0);
        assert_eq!(layer.unit_weight, 20_000.0);
        assert_eq!(layer.thickness, 0.085);
    }

    #[test]
    fn test_thickness_override_keeps_store_density() {
        let store = TomlPropertyStore::builtin().unwrap();
        let layer = FloorLayer::resolve(store, &FloorLayerSpec::new(SCREED).with_thickness(0.06), 10.0).unwrap();
        assert_eq!(layer.thickness, 0.06);
        assert_eq!(layer.density, 1850.0);
        assert!((layer.unit_weight - 22_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_thickness() {
        let store = TomlPropertyStore::builtin().unwrap();
        let result = FloorLayer::resolve(store, &FloorLayerSpec::new("Glaswolle"), 10.0);
        assert!(matches!(result, Err(CalcError::MissingField { .. })));
    }

    #[test]
    fn test_unknown_layer() {
        let store = TomlPropertyStore::builtin().unwrap();
        let result = FloorBuildUp::from_specs(store, &[FloorLayerSpec::new("Linoleum")], 10.0);
        assert!(matches!(result, Err(CalcError::LayerNotFound { .. })));
    }

    #[test]
    fn test_empty_build_up() {
        let floor = FloorBuildUp::from_layers(Vec::new());
        assert_eq!(floor.weight(), 0.0);
        assert_eq!(floor.co2(), 0.0);
    }
}
