//! # Materials
//!
//! Timber, concrete and reinforcing steel grades loaded from a
//! [`PropertyStore`](crate::store::PropertyStore).
//!
//! Loading a grade only reads characteristic values. Design values are
//! derived by an explicit `derive_design_values` call with the factors of a
//! [`DesignCode`](crate::design_code::DesignCode); until then every design
//! value accessor returns `CalcError::DesignValuesNotDerived`, so no resistance
//! can be computed from an unset value.
//!
//! Derived materials are read-only and are shared between cross-sections
//! through `Arc`.
//!
//! ## Example
//!
//! ```rust
//! use section_core::design_code::DesignCode;
//! use section_core::materials::{Concrete, ReinforcingSteel, Wood};
//! use section_core::store::TomlPropertyStore;
//!
//! let store = TomlPropertyStore::builtin().unwrap();
//! let code = DesignCode::sia_262_265();
//!
//! let timber = Wood::load(store, "GL24h").unwrap().with_design_values(&code.timber);
//! let concrete = Concrete::load(store, "C25/30").unwrap().with_design_values(&code.concrete);
//! let steel = ReinforcingSteel::load(store, "B500B").unwrap().with_design_values(&code.steel);
//!
//! assert!(timber.design_values().unwrap().f_md > 0.0);
//! assert!(concrete.design_values().unwrap().f_cd > 0.0);
//! assert!(steel.f_sd().unwrap() > 0.0);
//! ```

pub mod concrete;
pub mod reinforcing_steel;
pub mod wood;

pub use concrete::{Concrete, ConcreteDesignValues};
pub use reinforcing_steel::ReinforcingSteel;
pub use wood::{ProductClass, Wood, WoodDesignValues};
