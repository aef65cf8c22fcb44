//! # section_core - Timber and Reinforced-Concrete Beam Sizing
//!
//! `section_core` derives design values for timber, concrete and
//! reinforcing steel, computes bending resistance, stiffness and embodied
//! carbon of rectangular beam sections, combines them with a floor build-up
//! into a one-way spanning member, and searches the section geometry for the
//! lowest-carbon (or shallowest) design that meets the ultimate or the
//! serviceability limit state.
//!
//! ## Design Philosophy
//!
//! - **Value objects**: materials, sections and members are computed once on
//!   construction; a new geometry means a new section
//! - **SI inside**: table units are converted when records are read
//! - **JSON-first**: inputs, settings and reports implement Serialize/Deserialize
//! - **Rich errors**: structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use section_core::project::{DesignCase, SectionSpec, Study};
//! use section_core::store::TomlPropertyStore;
//!
//! let mut study = Study::new("Jane Engineer", "Office floor");
//! let mut case = DesignCase::new("GL24h", SectionSpec::glulam("GL24h", 0.2), 5.0);
//! case.qk = 3_000.0;
//! study.add_case(case);
//!
//! let reports = study.run(TomlPropertyStore::builtin().unwrap()).unwrap();
//! println!("h = {:.0} mm", reports[0].h * 1000.0);
//! ```
//!
//! ## Modules
//!
//! - [`store`] - Material, product and floor-layer property tables
//! - [`design_code`] - Code constants (SIA 262/265 by default)
//! - [`materials`] - Timber, concrete and reinforcing steel with design values
//! - [`sections`] - Rectangular timber and reinforced-concrete cross-sections
//! - [`floor`] - Floor build-ups
//! - [`calculations`] - Static systems and members (loads, capacity, deflections)
//! - [`optimization`] - Geometry search for minimum carbon or height
//! - [`equations`] - Closed-form beam and section formulas
//! - [`project`] - Studies of design cases
//! - [`file_io`] - Study files with atomic saves
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod design_code;
pub mod equations;
pub mod errors;
pub mod file_io;
pub mod floor;
pub mod materials;
pub mod optimization;
pub mod project;
pub mod sections;
pub mod store;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{Member, MemberLoads, Requirements, StaticSystem};
pub use design_code::DesignCode;
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_study, save_study};
pub use optimization::{optimize_section, Criterion, Objective, OptimizationOutcome, Optimizer, OptimizerSettings};
pub use project::{CaseReport, DesignCase, SectionSpec, Study};
pub use sections::CrossSection;
pub use store::{PropertyStore, TomlPropertyStore};
