//! Optimizer tuning
//!
//! Search bounds, penalty weights and the knobs of the local and global
//! search. Penalty weights are empirical: ULS mismatches are weighted per
//! kN/m², SLS margins per metre.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Closed interval of a design variable
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Bounds { min, max }
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Map a value to [0, 1]
    pub fn normalize(&self, value: f64) -> f64 {
        (self.clamp(value) - self.min) / self.width()
    }

    /// Map [0, 1] back to the interval
    pub fn denormalize(&self, u: f64) -> f64 {
        self.min + u.clamp(0.0, 1.0) * self.width()
    }

    /// Strictly inside, not touching either end
    pub fn contains_strictly(&self, value: f64) -> bool {
        value > self.min && value < self.max
    }

    fn validate(&self, setting: &str) -> CalcResult<()> {
        if self.min.is_finite() && self.max.is_finite() && self.min > 0.0 && self.min < self.max {
            Ok(())
        } else {
            Err(CalcError::configuration(
                setting,
                format!("[{}, {}]", self.min, self.max),
                "Bounds must be positive, finite and ordered",
            ))
        }
    }
}

/// Weights of the soft constraints in the concrete objective
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PenaltyWeights {
    /// Carbon objective, per kN/m² of ULS mismatch
    pub uls_gwp: f64,
    /// Height objective, per kN/m² of ULS mismatch
    pub uls_height: f64,
    /// Carbon objective, per metre of SLS margin
    pub sls_gwp: f64,
    /// Height objective, per metre of SLS margin
    pub sls_height: f64,
    /// Jump and slope per unit x/d above the class 2 limit
    pub ductility: f64,
}

impl Default for PenaltyWeights {
    fn default() -> Self {
        PenaltyWeights {
            uls_gwp: 10.0,
            uls_height: 1.0,
            sls_gwp: 1.0e4,
            sls_height: 1.0e1,
            ductility: 1.0e3,
        }
    }
}

/// Complete optimizer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimizerSettings {
    /// Timber section height (m)
    pub wood_height: Bounds,
    /// Concrete section height (m)
    pub concrete_height: Bounds,
    /// Bottom bar diameter (m)
    pub bottom_diameter: Bounds,
    pub penalties: PenaltyWeights,
    /// Metropolis temperature of basin hopping, in objective units
    pub temperature: f64,
    /// Half-width of the random hop, as a fraction of each bound
    pub step_size: f64,
    /// Line-search tolerance, as a fraction of each bound
    pub xtol: f64,
    /// Relative decrease below which the direction-set search stops
    pub ftol: f64,
    /// Objective evaluations allowed in one local search
    pub max_evaluations: usize,
    /// Accepted ULS shortfall `qk − qk_zul` of a returned section (N/m²)
    pub uls_tolerance: f64,
    /// Accepted deflection overrun of a returned section (m)
    pub sls_tolerance: f64,
    /// RNG seed of basin hopping; entropy when `None`
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for OptimizerSettings {
    fn default() -> Self {
        OptimizerSettings {
            wood_height: Bounds::new(0.04, 1.0),
            concrete_height: Bounds::new(0.06, 1.0),
            bottom_diameter: Bounds::new(0.006, 0.04),
            penalties: PenaltyWeights::default(),
            temperature: 1.0,
            step_size: 0.25,
            xtol: 1.0e-6,
            ftol: 1.0e-10,
            max_evaluations: 4_000,
            uls_tolerance: 50.0,
            sls_tolerance: 1.0e-4,
            seed: None,
        }
    }
}

impl OptimizerSettings {
    /// Default settings with a fixed RNG seed.
    pub fn seeded(seed: u64) -> Self {
        OptimizerSettings {
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> CalcResult<()> {
        self.wood_height.validate("wood_height")?;
        self.concrete_height.validate("concrete_height")?;
        self.bottom_diameter.validate("bottom_diameter")?;

        let p = &self.penalties;
        let positive = [
            ("penalties.uls_gwp", p.uls_gwp),
            ("penalties.uls_height", p.uls_height),
            ("penalties.sls_gwp", p.sls_gwp),
            ("penalties.sls_height", p.sls_height),
            ("penalties.ductility", p.ductility),
            ("temperature", self.temperature),
            ("step_size", self.step_size),
            ("xtol", self.xtol),
            ("ftol", self.ftol),
            ("uls_tolerance", self.uls_tolerance),
            ("sls_tolerance", self.sls_tolerance),
        ];
        for (setting, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(CalcError::configuration(
                    setting,
                    value.to_string(),
                    "Setting must be finite and positive",
                ));
            }
        }
        if self.max_evaluations == 0 {
            return Err(CalcError::configuration(
                "max_evaluations",
                "0",
                "At least one evaluation is required",
            ));
        }
        Ok(())
    }
}
