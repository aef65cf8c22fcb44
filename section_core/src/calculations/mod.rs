//! # Structural Calculations
//!
//! Member-level checks: a cross-section placed on a static system with its
//! floor build-up and loads.
//!
//! - [`static_system`] - Span geometry and influence coefficients
//! - [`member`] - Load combinations, ultimate capacity and deflections
//!
//! All quantities are SI. Area loads (floor, `g2k`, `qk`) are N/m², line loads
//! N/m, deflections m.

pub mod member;
pub mod static_system;

pub use member::{InstallationMode, Member, MemberLoads, MemberResults, Requirements};
pub use static_system::{BeamSimpleSup, StaticSystem};
