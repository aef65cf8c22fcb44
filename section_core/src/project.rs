//! # Studies
//!
//! A `Study` is the root container a driver works with: one design code, one
//! set of optimizer settings and any number of design cases. Studies
//! serialize to JSON files, see [`crate::file_io`].
//!
//! ## Structure
//!
//! ```text
//! Study
//! ├── meta: StudyMetadata (schema version, engineer, title, timestamps)
//! ├── code: DesignCode
//! ├── optimizer: OptimizerSettings
//! └── cases: HashMap<Uuid, DesignCase>
//! ```
//!
//! ## Example
//!
//! ```rust
//! use section_core::project::{DesignCase, SectionSpec, Study};
//! use section_core::store::TomlPropertyStore;
//!
//! let mut study = Study::new("Jane Engineer", "Floor comparison");
//! let mut case = DesignCase::new("GL24h 6 m", SectionSpec::glulam("GL24h", 0.2), 6.0);
//! case.qk = 2_000.0;
//! let id = study.add_case(case);
//!
//! let store = TomlPropertyStore::builtin().unwrap();
//! let report = study.run_case(&id, store).unwrap();
//! assert!(report.qk_zul >= 2_000.0 - 10.0);
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::{Member, MemberLoads, Requirements, StaticSystem};
use crate::design_code::DesignCode;
use crate::errors::{CalcError, CalcResult};
use crate::floor::{FloorBuildUp, FloorLayerSpec};
use crate::materials::{Concrete, ReinforcingSteel, Wood};
use crate::optimization::{Criterion, Objective, OptimizationOutcome, Optimizer, OptimizerSettings};
use crate::sections::{
    CrossSection, MomentSign, RectangularConcrete, RectangularGeometry, RectangularWood, ReinforcementLayout,
    SectionType,
};
use crate::store::PropertyStore;

/// Current schema version of study files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root container for a set of design cases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Study {
    pub meta: StudyMetadata,

    /// Code constants used by every case
    #[serde(default)]
    pub code: DesignCode,

    /// Optimizer tuning used by every case
    #[serde(default)]
    pub optimizer: OptimizerSettings,

    /// Design cases, keyed by UUID
    #[serde(default)]
    pub cases: HashMap<Uuid, DesignCase>,
}

impl Study {
    /// Create an empty study with the default code and optimizer settings.
    ///
    /// ```rust
    /// use section_core::project::Study;
    ///
    /// let study = Study::new("John Doe", "Office floor");
    /// assert_eq!(study.meta.engineer, "John Doe");
    /// assert_eq!(study.case_count(), 0);
    /// ```
    pub fn new(engineer: impl Into<String>, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Study {
            meta: StudyMetadata {
                version: SCHEMA_VERSION.to_string(),
                engineer: engineer.into(),
                title: title.into(),
                created: now,
                modified: now,
            },
            code: DesignCode::default(),
            optimizer: OptimizerSettings::default(),
            cases: HashMap::new(),
        }
    }

    /// Add a case and return the UUID assigned to it.
    pub fn add_case(&mut self, case: DesignCase) -> Uuid {
        let id = Uuid::new_v4();
        self.cases.insert(id, case);
        self.touch();
        id
    }

    pub fn remove_case(&mut self, id: &Uuid) -> Option<DesignCase> {
        let case = self.cases.remove(id);
        if case.is_some() {
            self.touch();
        }
        case
    }

    pub fn get_case(&self, id: &Uuid) -> Option<&DesignCase> {
        self.cases.get(id)
    }

    pub fn case_count(&self) -> usize {
        self.cases.len()
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    /// Run one case with the study's code and optimizer settings.
    pub fn run_case(&self, id: &Uuid, store: &dyn PropertyStore) -> CalcResult<CaseReport> {
        let case = self
            .get_case(id)
            .ok_or_else(|| CalcError::invalid_input("case", id.to_string(), "No case with this id"))?;
        self.code.validate()?;
        let optimizer = Optimizer::new(self.optimizer)?;
        case.run(store, &self.code, &optimizer)
    }

    /// Run every case, ordered by label.
    ///
    /// Stops at the first case that fails to build or optimize.
    pub fn run(&self, store: &dyn PropertyStore) -> CalcResult<Vec<CaseReport>> {
        self.code.validate()?;
        let optimizer = Optimizer::new(self.optimizer)?;
        let mut cases: Vec<_> = self.cases.values().collect();
        cases.sort_by(|a, b| a.label.cmp(&b.label).then(a.span.total_cmp(&b.span)));
        cases
            .into_iter()
            .map(|case| case.run(store, &self.code, &optimizer))
            .collect()
    }
}

/// Study header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,
    pub engineer: String,
    pub title: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

/// Section family, materials and start geometry of a case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "section_type")]
pub enum SectionSpec {
    #[serde(rename = "wd_rec")]
    Wood {
        grade: String,
        /// Width (m)
        b: f64,
        /// Start height (m)
        h: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        phi: Option<f64>,
    },
    #[serde(rename = "rc_rec")]
    Concrete {
        concrete_grade: String,
        steel_grade: String,
        b: f64,
        h: f64,
        reinforcement: ReinforcementLayout,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        cover: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        phi: Option<f64>,
    },
}

impl SectionSpec {
    /// A 1 m wide timber strip.
    pub fn glulam(grade: impl Into<String>, h: f64) -> Self {
        SectionSpec::Wood {
            grade: grade.into(),
            b: 1.0,
            h,
            phi: None,
        }
    }

    /// A 1 m wide reinforced-concrete strip.
    pub fn reinforced_concrete(
        concrete_grade: impl Into<String>,
        steel_grade: impl Into<String>,
        h: f64,
        reinforcement: ReinforcementLayout,
    ) -> Self {
        SectionSpec::Concrete {
            concrete_grade: concrete_grade.into(),
            steel_grade: steel_grade.into(),
            b: 1.0,
            h,
            reinforcement,
            cover: None,
            phi: None,
        }
    }

    pub fn section_type(&self) -> SectionType {
        match self {
            SectionSpec::Wood { .. } => SectionType::RectangularWood,
            SectionSpec::Concrete { .. } => SectionType::RectangularConcrete,
        }
    }

    /// Load the materials, derive their design values and build the section.
    pub fn build(&self, store: &dyn PropertyStore, code: &DesignCode) -> CalcResult<CrossSection> {
        match self {
            SectionSpec::Wood { grade, b, h, phi } => {
                let wood = Wood::load(store, grade)?.with_design_values(&code.timber);
                let geometry = RectangularGeometry::new(*b, *h)?;
                let phi = phi.unwrap_or(RectangularWood::DEFAULT_PHI);
                Ok(RectangularWood::with_phi(wood.into(), geometry, phi)?.into())
            }
            SectionSpec::Concrete {
                concrete_grade,
                steel_grade,
                b,
                h,
                reinforcement,
                cover,
                phi,
            } => {
                let concrete = Concrete::load(store, concrete_grade)?.with_design_values(&code.concrete);
                let steel = ReinforcingSteel::load(store, steel_grade)?.with_design_values(&code.steel);
                let layout = ReinforcementLayout::new(
                    (reinforcement.bottom.diameter, reinforcement.bottom.spacing),
                    (reinforcement.top.diameter, reinforcement.top.spacing),
                )?;
                Ok(RectangularConcrete::with_options(
                    concrete.into(),
                    steel.into(),
                    RectangularGeometry::new(*b, *h)?,
                    layout,
                    code.ductility,
                    cover.unwrap_or(RectangularConcrete::DEFAULT_COVER),
                    phi.unwrap_or(RectangularConcrete::DEFAULT_PHI),
                )?
                .into())
            }
        }
    }
}

fn default_max_iterations() -> usize {
    100
}

/// One member to size: section, floor, span, loads and design goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignCase {
    pub label: String,
    pub section: SectionSpec,
    #[serde(default)]
    pub floor: Vec<FloorLayerSpec>,
    /// Span (m)
    pub span: f64,
    /// Superimposed dead load (N/m²)
    #[serde(default)]
    pub g2k: f64,
    /// Live load (N/m²)
    #[serde(default)]
    pub qk: f64,
    #[serde(default)]
    pub requirements: Requirements,
    pub objective: Objective,
    pub criterion: Criterion,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
}

impl DesignCase {
    /// A bare case: no floor, no loads, minimum carbon for ULS.
    pub fn new(label: impl Into<String>, section: SectionSpec, span: f64) -> Self {
        DesignCase {
            label: label.into(),
            section,
            floor: Vec::new(),
            span,
            g2k: 0.0,
            qk: 0.0,
            requirements: Requirements::default(),
            objective: Objective::Gwp,
            criterion: Criterion::Uls,
            max_iterations: default_max_iterations(),
        }
    }

    /// Build the member at its start geometry.
    pub fn build_member(&self, store: &dyn PropertyStore, code: &DesignCode) -> CalcResult<Member> {
        let section = self.section.build(store, code)?;
        let floor = FloorBuildUp::from_specs(store, &self.floor, code.density_to_unit_weight)?;
        Member::new(
            section,
            floor,
            StaticSystem::simply_supported(self.span)?,
            MemberLoads::new(self.g2k, self.qk)?,
            self.requirements.with_default_limits(code.deflection_limits),
            code.loads,
        )
    }

    /// Build, optimize and summarize the case.
    pub fn run(&self, store: &dyn PropertyStore, code: &DesignCode, optimizer: &Optimizer) -> CalcResult<CaseReport> {
        let member = self.build_member(store, code)?;
        let outcome = optimizer.optimize(&member, self.objective, self.criterion, self.max_iterations)?;
        Ok(CaseReport::new(&self.label, &outcome))
    }
}

/// Summary of an optimized case, in SI units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseReport {
    pub label: String,
    pub section_type: SectionType,
    /// e.g. "GL24h 1000x135"
    pub description: String,
    pub objective: Objective,
    pub criterion: Criterion,
    pub span: f64,
    pub b: f64,
    pub h: f64,
    /// Bottom bar diameter, concrete only (m)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom_diameter: Option<f64>,
    /// Sagging bending resistance (Nm)
    pub m_rd: f64,
    /// Sagging design moment (Nm)
    pub m_ed: f64,
    /// Admissible live load (N/m²)
    pub qk_zul: f64,
    pub w_install: f64,
    pub w_use: f64,
    pub w_app: f64,
    /// Largest deflection-to-limit ratio
    pub sls_utilization: f64,
    /// Embodied carbon of section and floor over the span (kg CO2-eq)
    pub co2: f64,
    pub cost: f64,
    pub feasible: bool,
    pub evaluations: usize,
}

impl CaseReport {
    pub fn new(label: &str, outcome: &OptimizationOutcome) -> Self {
        let section = outcome.section();
        let results = outcome.member.results();
        CaseReport {
            label: label.to_string(),
            section_type: section.section_type(),
            description: section.describe(),
            objective: outcome.objective,
            criterion: outcome.criterion,
            span: outcome.member.system().span(),
            b: section.b(),
            h: section.h(),
            bottom_diameter: section.concrete().map(|c| c.layout().bottom.diameter),
            m_rd: section.moment_resistance(MomentSign::Positive),
            m_ed: results.m_ed,
            qk_zul: results.qk_zul,
            w_install: results.w_install,
            w_use: results.w_use,
            w_app: results.w_app,
            sls_utilization: results.sls_utilization(),
            co2: results.co2,
            cost: results.cost,
            feasible: outcome.feasible,
            evaluations: outcome.evaluations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design_code::DeflectionLimits;
    use crate::store::TomlPropertyStore;

    fn concrete_spec() -> SectionSpec {
        SectionSpec::reinforced_concrete(
            "C25/30",
            "B500B",
            0.2,
            ReinforcementLayout::new((0.014, 0.15), (0.01, 0.15)).unwrap(),
        )
    }

    #[test]
    fn test_study_creation() {
        let study = Study::new("John Doe", "Office floor");
        assert_eq!(study.meta.engineer, "John Doe");
        assert_eq!(study.meta.title, "Office floor");
        assert_eq!(study.meta.version, SCHEMA_VERSION);
        assert_eq!(study.code, DesignCode::sia_262_265());
    }

    #[test]
    fn test_add_remove_case() {
        let mut study = Study::new("Engineer", "Study");
        let id = study.add_case(DesignCase::new("A", SectionSpec::glulam("GL24h", 0.2), 5.0));
        assert_eq!(study.case_count(), 1);
        assert!(study.get_case(&id).is_some());
        assert!(study.remove_case(&id).is_some());
        assert!(study.remove_case(&id).is_none());
        assert_eq!(study.case_count(), 0);
    }

    #[test]
    fn test_section_spec_json() {
        let json = serde_json::to_string(&SectionSpec::glulam("GL24h", 0.2)).unwrap();
        assert!(json.contains("\"section_type\":\"wd_rec\""));
        assert!(!json.contains("phi"));

        let spec: SectionSpec = serde_json::from_str(
            r#"{"section_type": "rc_rec", "concrete_grade": "C25/30", "steel_grade": "B500B",
                "b": 1.0, "h": 0.25,
                "reinforcement": {"bottom": {"diameter": 0.012, "spacing": 0.15},
                                  "top": {"diameter": 0.01, "spacing": 0.2}}}"#,
        )
        .unwrap();
        assert_eq!(spec.section_type(), SectionType::RectangularConcrete);
        assert!(serde_json::from_str::<SectionSpec>(r#"{"section_type": "st_i", "b": 1.0}"#).is_err());
    }

    #[test]
    fn test_build_member_applies_overrides() {
        let store = TomlPropertyStore::builtin().unwrap();
        let code = DesignCode::sia_262_265();
        let mut case = DesignCase::new("RC", concrete_spec(), 6.0);
        case.floor = vec![FloorLayerSpec::new("Glaswolle").with_thickness(0.03)];
        case.g2k = 750.0;
        case.qk = 2_000.0;

        let member = case.build_member(store, &code).unwrap();
        assert_eq!(member.section().section_type(), SectionType::RectangularConcrete);
        assert_eq!(member.system().span(), 6.0);
        assert!((member.floor().total_thickness() - 0.03).abs() < 1e-12);
        assert!((member.results().g2 - 750.0).abs() < 1e-9);
    }

    #[test]
    fn test_build_member_uses_code_deflection_limits() {
        let store = TomlPropertyStore::builtin().unwrap();
        let mut code = DesignCode::sia_262_265();
        code.deflection_limits.installation = 500.0;
        let mut case = DesignCase::new("GL24h", SectionSpec::glulam("GL24h", 0.2), 6.0);

        let results = *case.build_member(store, &code).unwrap().results();
        assert!((results.w_install_adm - 0.012).abs() < 1e-12);
        assert!((results.w_use_adm - 6.0 / code.deflection_limits.in_use).abs() < 1e-12);

        // Limits set on the case win over the code
        case.requirements.limits = Some(DeflectionLimits {
            installation: 400.0,
            in_use: 400.0,
            appearance: 400.0,
        });
        let results = *case.build_member(store, &code).unwrap().results();
        assert!((results.w_install_adm - 0.015).abs() < 1e-12);
        assert!((results.w_app_adm - 0.015).abs() < 1e-12);
    }

    #[test]
    fn test_build_member_unknown_material() {
        let store = TomlPropertyStore::builtin().unwrap();
        let case = DesignCase::new("X", SectionSpec::glulam("GL99z", 0.2), 6.0);
        assert!(matches!(
            case.build_member(store, &DesignCode::sia_262_265()),
            Err(CalcError::MaterialNotFound { .. })
        ));
    }

    #[test]
    fn test_run_case_reports_optimized_section() {
        let store = TomlPropertyStore::builtin().unwrap();
        let mut study = Study::new("Engineer", "Timber");
        let mut case = DesignCase::new("GL24h", SectionSpec::glulam("GL24h", 0.3), 5.0);
        case.qk = 2_000.0;
        let id = study.add_case(case);

        let report = study.run_case(&id, store).unwrap();
        assert_eq!(report.section_type, SectionType::RectangularWood);
        assert!(report.h < 0.3);
        assert!((report.qk_zul - 2_000.0).abs() < 10.0);
        assert!(report.bottom_diameter.is_none());
        assert!(report.feasible);
        assert!(report.co2 > 0.0);
    }

    #[test]
    fn test_run_case_rejects_invalid_code() {
        let store = TomlPropertyStore::builtin().unwrap();
        let mut study = Study::new("Engineer", "Invalid code");
        let id = study.add_case(DesignCase::new("GL24h", SectionSpec::glulam("GL24h", 0.2), 5.0));
        study.code.concrete.gamma_c = 0.0;

        match study.run_case(&id, store) {
            Err(CalcError::Configuration { setting, .. }) => assert_eq!(setting, "concrete.gamma_c"),
            other => panic!("expected a configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_run_orders_by_label() {
        let store = TomlPropertyStore::builtin().unwrap();
        let mut study = Study::new("Engineer", "Order");
        for (label, span) in [("b", 4.0), ("a", 5.0)] {
            let mut case = DesignCase::new(label, SectionSpec::glulam("GL24h", 0.2), span);
            case.qk = 2_000.0;
            case.max_iterations = 20;
            study.add_case(case);
        }
        let reports = study.run(store).unwrap();
        let labels: Vec<_> = reports.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, ["a", "b"]);
    }

    #[test]
    fn test_study_serialization() {
        let mut study = Study::new("Jane Engineer", "Comparison");
        study.add_case(DesignCase::new("RC", concrete_spec(), 6.0));
        let json = serde_json::to_string_pretty(&study).unwrap();
        assert!(json.contains("Jane Engineer"));
        assert!(json.contains("rc_rec"));
        let roundtrip: Study = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.meta, study.meta);
        assert_eq!(roundtrip.case_count(), 1);
        assert_eq!(roundtrip.cases.values().next().unwrap().section, concrete_spec());
    }
}
