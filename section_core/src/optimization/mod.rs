//! # Section Optimization
//!
//! Searches the geometry of a member's cross-section for the lightest-carbon
//! or shallowest design that just satisfies the chosen limit state.
//!
//! ## Timber (`wd_rec`)
//!
//! One variable, the height, searched with a bounded direction-set method.
//! The objective is the capacity mismatch itself:
//!
//! ```text
//! ULS:   |qk − qk_zul|          (kN/m²)
//! SLS1:  |min(w_adm − w)|       (m)
//! ```
//!
//! Carbon grows with height for a fixed grade, so the smallest adequate
//! height is also the lowest-carbon one and the objective choice is not used.
//!
//! ## Reinforced concrete (`rc_rec`)
//!
//! Two variables, height and bottom bar diameter, searched with basin
//! hopping around the same local method. The objective is penalized:
//!
//! ```text
//! f = co2 | h  +  w · |violation|  +  w_duct · (1 + x/d − 0.5)   if x/d > 0.5
//! ```
//!
//! Every trial builds a fresh section and member; nothing is mutated.
//!
//! ## Example
//!
//! ```rust,no_run
//! use section_core::optimization::{optimize_section, Criterion, Objective};
//! # fn member() -> section_core::calculations::Member { unimplemented!() }
//!
//! let member = member();
//! let objective: Objective = "GWP".parse().unwrap();
//! let criterion: Criterion = "ULS".parse().unwrap();
//! let section = optimize_section(&member, objective, criterion, 100).unwrap();
//! println!("h = {:.3} m", section.h());
//! ```

pub mod basin_hopping;
pub mod local;
pub mod settings;

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::calculations::Member;
use crate::errors::{CalcError, CalcResult};
use crate::sections::{CrossSection, DuctilityClass, RectangularConcrete, SectionType, TrialGeometry};
use crate::units::{KilonewtonsPerSquareMeter, NewtonsPerSquareMeter};

use basin_hopping::BasinHopping;
use local::powell;

pub use settings::{Bounds, OptimizerSettings, PenaltyWeights};

/// Quantity to minimize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Objective {
    /// Embodied carbon of the section
    #[serde(rename = "GWP")]
    Gwp,
    /// Section height
    #[serde(rename = "h")]
    Height,
}

impl FromStr for Objective {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GWP" => Ok(Objective::Gwp),
            "h" => Ok(Objective::Height),
            other => Err(CalcError::configuration("objective", other, "expected 'GWP' or 'h'")),
        }
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Objective::Gwp => f.write_str("GWP"),
            Objective::Height => f.write_str("h"),
        }
    }
}

/// Limit state the section is sized for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Criterion {
    /// Bending capacity
    #[serde(rename = "ULS")]
    Uls,
    /// Deflections
    #[serde(rename = "SLS1")]
    Sls1,
}

impl FromStr for Criterion {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ULS" => Ok(Criterion::Uls),
            "SLS1" => Ok(Criterion::Sls1),
            other => Err(CalcError::configuration("criterion", other, "expected 'ULS' or 'SLS1'")),
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Criterion::Uls => f.write_str("ULS"),
            Criterion::Sls1 => f.write_str("SLS1"),
        }
    }
}

/// Result of an optimization run
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationOutcome {
    /// Member rebuilt with the best section found
    pub member: Member,
    pub objective: Objective,
    pub criterion: Criterion,
    /// Objective at the start geometry
    pub initial_objective_value: f64,
    /// Objective at the returned geometry
    pub objective_value: f64,
    pub evaluations: usize,
    /// `qk − qk_zul` of the returned member (N/m²)
    pub uls_mismatch: f64,
    /// Smallest deflection margin of the returned member (m)
    pub sls_margin: f64,
    /// Whether the returned section satisfies the criterion within tolerance
    /// and has no over-reinforced face
    pub feasible: bool,
}

impl OptimizationOutcome {
    pub fn section(&self) -> &CrossSection {
        self.member.section()
    }

    pub fn into_section(self) -> CrossSection {
        self.member.into_section()
    }
}

fn kn_per_m2(value: f64) -> f64 {
    KilonewtonsPerSquareMeter::from(NewtonsPerSquareMeter(value)).0
}

/// Penalty for faces beyond the class 2 limit: a jump plus a slope in x/d.
fn ductility_penalty(section: &RectangularConcrete, weight: f64) -> f64 {
    let limit = section.thresholds().class2_max;
    [section.bottom(), section.top()]
        .into_iter()
        .filter(|face| face.class == DuctilityClass::Inadequate)
        .map(|face| weight * (1.0 + face.x_over_d - limit))
        .sum()
}

/// Builds and scores trial members. A geometry that cannot be built scores
/// infinity; the first such error is kept.
struct TrialRunner<'a> {
    base: &'a Member,
    objective: Objective,
    criterion: Criterion,
    settings: &'a OptimizerSettings,
    evaluations: usize,
    failures: usize,
    error: Option<CalcError>,
}

impl<'a> TrialRunner<'a> {
    fn new(base: &'a Member, objective: Objective, criterion: Criterion, settings: &'a OptimizerSettings) -> Self {
        TrialRunner {
            base,
            objective,
            criterion,
            settings,
            evaluations: 0,
            failures: 0,
            error: None,
        }
    }

    fn member_at(&self, trial: TrialGeometry) -> CalcResult<Member> {
        let section = self.base.section().with_trial(trial)?;
        self.base.with_section(section)
    }

    fn score(&self, member: &Member) -> f64 {
        let results = member.results();
        let uls = kn_per_m2(results.uls_mismatch()).abs();
        let sls = results.sls_margin().abs();

        match member.section() {
            CrossSection::Wood(_) => match self.criterion {
                Criterion::Uls => uls,
                Criterion::Sls1 => sls,
            },
            CrossSection::Concrete(section) => {
                let p = &self.settings.penalties;
                let base = match self.objective {
                    Objective::Gwp => section.co2(),
                    Objective::Height => section.geometry().h,
                };
                let violation = match (self.criterion, self.objective) {
                    (Criterion::Uls, Objective::Gwp) => p.uls_gwp * uls,
                    (Criterion::Uls, Objective::Height) => p.uls_height * uls,
                    (Criterion::Sls1, Objective::Gwp) => p.sls_gwp * sls,
                    (Criterion::Sls1, Objective::Height) => p.sls_height * sls,
                };
                base + violation + ductility_penalty(section, p.ductility)
            }
        }
    }

    fn evaluate(&mut self, trial: TrialGeometry) -> f64 {
        self.evaluations += 1;
        match self.member_at(trial) {
            Ok(member) => {
                let value = self.score(&member);
                log::debug!(
                    "trial h = {:.5} m, bottom Ø = {:?}: f = {:.6}",
                    trial.h,
                    trial.bottom_diameter,
                    value
                );
                value
            }
            Err(e) => {
                self.failures += 1;
                if self.error.is_none() {
                    self.error = Some(e);
                }
                f64::INFINITY
            }
        }
    }
}

/// Section optimizer with fixed settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Optimizer {
    settings: OptimizerSettings,
}

impl Optimizer {
    /// Create an optimizer, validating the settings.
    pub fn new(settings: OptimizerSettings) -> CalcResult<Self> {
        settings.validate()?;
        Ok(Optimizer { settings })
    }

    pub fn settings(&self) -> &OptimizerSettings {
        &self.settings
    }

    /// Optimize the member's section, starting from its current geometry.
    ///
    /// The section family selects the search. `max_iterations` is the number
    /// of basin-hopping steps for concrete and the sweep limit of the
    /// direction-set search for timber. A run that ends with residual
    /// violation still returns its best point, flagged not `feasible`.
    pub fn optimize(
        &self,
        member: &Member,
        objective: Objective,
        criterion: Criterion,
        max_iterations: usize,
    ) -> CalcResult<OptimizationOutcome> {
        log::info!(
            "optimizing {} ({}) for {} under {}, span {} m",
            member.section().describe(),
            member.section().section_type(),
            objective,
            criterion,
            member.system().span()
        );

        let mut runner = TrialRunner::new(member, objective, criterion, &self.settings);
        let trial = match member.section().section_type() {
            SectionType::RectangularWood => self.search_wood(&mut runner, member, max_iterations),
            SectionType::RectangularConcrete => self.search_concrete(&mut runner, member, max_iterations)?,
        };
        let (initial, best_value) = trial.values;
        if let Some(error) = runner.error.take() {
            if !best_value.is_finite() {
                return Err(error);
            }
            log::debug!("{} trial geometries could not be built: {}", runner.failures, error);
        }

        let best = runner.member_at(trial.geometry)?;
        let results = *best.results();
        let uls_mismatch = results.uls_mismatch();
        let sls_margin = results.sls_margin();
        let over_reinforced = best.section().concrete().is_some_and(RectangularConcrete::is_over_reinforced);
        let within_tolerance = match criterion {
            Criterion::Uls => uls_mismatch <= self.settings.uls_tolerance,
            Criterion::Sls1 => sls_margin >= -self.settings.sls_tolerance,
        };
        let feasible = within_tolerance && !over_reinforced;

        log::info!(
            "optimized {}: f = {:.4} (start {:.4}), qk_zul = {:.3} kN/m², SLS margin = {:.2} mm, {} evaluations",
            best.section().describe(),
            best_value,
            initial,
            kn_per_m2(results.qk_zul),
            sls_margin * 1000.0,
            runner.evaluations
        );
        if !feasible {
            log::warn!(
                "{} does not satisfy {}: qk − qk_zul = {:.3} kN/m², SLS margin = {:.2} mm, over-reinforced = {}",
                best.section().describe(),
                criterion,
                kn_per_m2(uls_mismatch),
                sls_margin * 1000.0,
                over_reinforced
            );
        }

        Ok(OptimizationOutcome {
            member: best,
            objective,
            criterion,
            initial_objective_value: initial,
            objective_value: best_value,
            evaluations: runner.evaluations,
            uls_mismatch,
            sls_margin,
            feasible,
        })
    }

    fn search_wood(&self, runner: &mut TrialRunner<'_>, member: &Member, max_iterations: usize) -> SearchResult {
        log::debug!(
            "timber search ignores objective {}: height and carbon share the optimum",
            runner.objective
        );
        let bounds = self.settings.wood_height;
        let at = |u: &[f64]| TrialGeometry {
            h: bounds.denormalize(u[0]),
            bottom_diameter: None,
        };
        let x0 = [bounds.normalize(member.section().h())];
        let initial = runner.evaluate(at(&x0));

        let local = powell(
            |u| runner.evaluate(at(u)),
            &x0,
            self.settings.xtol,
            self.settings.ftol,
            max_iterations,
            self.settings.max_evaluations,
        );
        SearchResult {
            geometry: at(&local.x),
            values: (initial, local.fx),
        }
    }

    fn search_concrete(
        &self,
        runner: &mut TrialRunner<'_>,
        member: &Member,
        max_iterations: usize,
    ) -> CalcResult<SearchResult> {
        let h_bounds = self.settings.concrete_height;
        let d_bounds = self.settings.bottom_diameter;
        let section = member
            .section()
            .concrete()
            .ok_or_else(|| CalcError::configuration("section_type", "wd_rec", "expected a concrete section"))?;
        let at = |u: &[f64]| TrialGeometry {
            h: h_bounds.denormalize(u[0]),
            bottom_diameter: Some(d_bounds.denormalize(u[1])),
        };
        let x0 = [
            h_bounds.normalize(section.geometry().h),
            d_bounds.normalize(section.layout().bottom.diameter),
        ];
        let initial = runner.evaluate(at(&x0));

        let mut rng = match self.settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let hopper = BasinHopping {
            iterations: max_iterations,
            temperature: self.settings.temperature,
            step_size: self.settings.step_size,
            xtol: self.settings.xtol,
            ftol: self.settings.ftol,
            local_evaluations: self.settings.max_evaluations,
        };
        let best = hopper.run(|u| runner.evaluate(at(u)), &x0, &mut rng);

        Ok(SearchResult {
            geometry: at(&best.x),
            values: (initial, best.fx),
        })
    }
}

/// Best geometry with (initial, best) objective values
struct SearchResult {
    geometry: TrialGeometry,
    values: (f64, f64),
}

/// Optimize a member's section with default settings and return the section.
///
/// Errors only when no trial geometry could be built; a residual constraint
/// violation is logged and the best section is still returned.
pub fn optimize_section(
    member: &Member,
    objective: Objective,
    criterion: Criterion,
    max_iterations: usize,
) -> CalcResult<CrossSection> {
    Optimizer::new(OptimizerSettings::default())?
        .optimize(member, objective, criterion, max_iterations)
        .map(OptimizationOutcome::into_section)
}
