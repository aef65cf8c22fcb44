//! # Structural Engineering Equations
//!
//! Fundamental formulas used by the cross-section and member models, kept in
//! one place so they can be checked against the code clauses directly.
//!
//! ## Modules
//!
//! - [`beam`] - Uniform-load beam formulas (moment, deflection, load factors)
//! - [`section`] - Rectangular and reinforced-concrete section resistance
//!
//! ## Sign Conventions
//!
//! - **Loads**: Positive downward (gravity direction)
//! - **Moment**: Positive causes tension on bottom fiber (sagging)
//! - **Deflection**: Positive downward
//!
//! ## References
//!
//! - SIA 262:2013 Concrete Structures
//! - SIA 265:2012 Timber Structures
//! - Roark's Formulas for Stress and Strain, 8th Edition

pub mod beam;
pub mod section;

pub use beam::{
    admissible_variable_load,
    design_load,
    load_from_moment,
    uniform_load_deflection,
    uniform_load_moment,
};

pub use section::{
    effective_depth,
    elastic_moment_resistance,
    elastic_shear_resistance,
    mechanical_reinforcement_ratio,
    neutral_axis_depth,
    plastic_moment_resistance,
    plastic_shear_resistance,
    rectangular_area,
    rectangular_moment_of_inertia,
    reinforced_moment_resistance,
    reinforcement_area,
};
