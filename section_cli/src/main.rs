//! # EcoSection CLI
//!
//! Runs a design study and prints the optimized sections.
//!
//! ```text
//! section_cli [study.json]
//! ```
//!
//! Without an argument the built-in comparison runs: GL24h against
//! C25/30 + B500B floor strips over spans of 4 to 16 m, each sized for the
//! ultimate and for the serviceability limit state. Set `RUST_LOG=debug` to
//! follow the optimizer trial by trial.

use std::path::Path;
use std::process::ExitCode;

use section_core::floor::FloorLayerSpec;
use section_core::project::{CaseReport, DesignCase, SectionSpec, Study};
use section_core::sections::ReinforcementLayout;
use section_core::units::{
    KilonewtonMeters, KilonewtonsPerSquareMeter, Meters, Millimeters, NewtonMeters, NewtonsPerSquareMeter,
};
use section_core::{load_study, CalcError, CalcResult, Criterion, Objective, TomlPropertyStore};

const PARQUET: &str = "Parkett 2-Schicht werkversiegelt, 11 mm";
const SCREED: &str = "Unterlagsboden Zement, 85 mm";

/// GL24h vs. C25/30 strips with 750 N/m² partitions and 2 kN/m² live load.
fn reference_study() -> CalcResult<Study> {
    let mut study = Study::new("EcoSection", "Timber vs. concrete span comparison");
    let reinforcement = ReinforcementLayout::new((0.014, 0.15), (0.01, 0.15))?;

    for span in (4..=16).step_by(2).map(f64::from) {
        for criterion in [Criterion::Uls, Criterion::Sls1] {
            let mut wood = DesignCase::new(
                format!("GL24h {:>4.1} m {}", span, criterion),
                SectionSpec::glulam("GL24h", 0.2),
                span,
            );
            wood.floor = vec![
                FloorLayerSpec::new(PARQUET),
                FloorLayerSpec::new(SCREED),
                FloorLayerSpec::new("Glaswolle").with_thickness(0.03),
                FloorLayerSpec::new("Kies gebrochen").with_thickness(0.12),
            ];

            let mut concrete = DesignCase::new(
                format!("RC    {:>4.1} m {}", span, criterion),
                SectionSpec::reinforced_concrete("C25/30", "B500B", 0.2, reinforcement),
                span,
            );
            concrete.floor = vec![
                FloorLayerSpec::new(PARQUET),
                FloorLayerSpec::new(SCREED),
                FloorLayerSpec::new("Glaswolle").with_thickness(0.03),
            ];
            concrete.max_iterations = 10;

            for mut case in [wood, concrete] {
                case.g2k = 750.0;
                case.qk = 2_000.0;
                case.objective = Objective::Gwp;
                case.criterion = criterion;
                study.add_case(case);
            }
        }
    }
    Ok(study)
}

fn mm(value: f64) -> f64 {
    Millimeters::from(Meters(value)).0
}

fn print_table(reports: &[CaseReport]) {
    println!(
        "{:<22} {:<22} {:>8} {:>8} {:>10} {:>10} {:>10} {:>8} {:>12} {:>6}",
        "Case", "Section", "h [mm]", "Ø [mm]", "M_Ed", "M_Rd", "qk,zul", "w/w_adm", "CO2 [kg]", "OK"
    );
    println!("{}", "─".repeat(126));
    for r in reports {
        let diameter = r
            .bottom_diameter
            .map(|d| format!("{:.1}", mm(d)))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<22} {:<22} {:>8.1} {:>8} {:>10.1} {:>10.1} {:>10.2} {:>8.2} {:>12.1} {:>6}",
            r.label,
            r.description,
            mm(r.h),
            diameter,
            KilonewtonMeters::from(NewtonMeters(r.m_ed)).0,
            KilonewtonMeters::from(NewtonMeters(r.m_rd)).0,
            KilonewtonsPerSquareMeter::from(NewtonsPerSquareMeter(r.qk_zul)).0,
            r.sls_utilization,
            r.co2,
            if r.feasible { "[OK]" } else { "[FAIL]" }
        );
    }
    println!();
    println!("M_Ed and M_Rd in kNm, qk,zul in kN/m²; CO2 per strip over the span, section and floor");
}

fn run() -> CalcResult<Vec<CaseReport>> {
    let study = match std::env::args().nth(1) {
        Some(path) => load_study(Path::new(&path))?,
        None => reference_study()?,
    };
    log::info!(
        "running '{}' with {} ({} cases)",
        study.meta.title,
        study.code.display_name(),
        study.case_count()
    );
    study.run(TomlPropertyStore::builtin()?)
}

fn report_error(e: &CalcError) {
    eprintln!("Error [{}]: {}", e.error_code(), e);
    if let Ok(json) = serde_json::to_string_pretty(e) {
        eprintln!();
        eprintln!("Error JSON:");
        eprintln!("{}", json);
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(reports) => {
            print_table(&reports);
            println!();
            println!("JSON Output:");
            match serde_json::to_string_pretty(&reports) {
                Ok(json) => println!("{}", json),
                Err(e) => log::error!("could not serialize reports: {}", e),
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}
