use super::common::*;
use crate::grading::rules::constraints;
use crate::grading::{ConstraintMessages, RuleSet};
use crate::workbook::{Field, SheetKind, Workbook};

const FEW_SUFFIX: &str =
    " Move the design point into the feasible region of the constraint diagram.";
const MANY_SUFFIX: &str =
    " The design point misses nearly every constraint; revisit the W/S and T/W selection.";

/// Raises one required-T/W curve above the design T/W of 1.2.
fn raise_curve(wb: &mut Workbook, row: u32) {
    for col in 11..=31 {
        wb.set(Field::at(SheetKind::Consts, row, col), 2.0);
    }
}

#[test]
fn compliant_table_is_silent() {
    let result = run_module(constraints::run, &compliant_workbook());
    assert_eq!(result.delta, 0);
    assert!(result.feedback.is_empty(), "{:?}", result.feedback);
}

#[test]
fn short_radius_counts_as_failure() {
    let mut wb = compliant_workbook();
    set(&mut wb, "main!Y37", 300.0);

    let result = run_module(constraints::run, &wb);

    assert_eq!(result.delta, -1);
    assert_eq!(
        result.feedback,
        vec![
            "Mission radius of 300.0 nm is below the threshold of 375 nm.".to_string(),
            ConstraintMessages::default().summary,
        ]
    );
}

#[test]
fn radius_and_payload_objectives_are_reported_without_deduction() {
    let mut wb = compliant_workbook();
    set(&mut wb, "main!Y37", 420.0);
    set(&mut wb, "main!AB4", 2.0);

    let result = run_module(constraints::run, &wb);

    assert_eq!(result.delta, 0);
    assert_eq!(
        result.feedback,
        vec![
            "Meets mission radius objective (420.0 nm).",
            "Meets payload objective (8 AIM-120, 2 AIM-9).",
        ]
    );
}

#[test]
fn fractional_payload_is_rejected() {
    let mut wb = compliant_workbook();
    set(&mut wb, "main!AB3", 7.5);

    let result = run_module(constraints::run, &wb);

    assert_eq!(result.delta, -1);
    assert_eq!(result.feedback[0], ConstraintMessages::default().payload_integer);
}

#[test]
fn low_payload_reports_rounded_count() {
    let mut wb = compliant_workbook();
    set(&mut wb, "main!AB3", 5.999);

    let result = run_module(constraints::run, &wb);

    assert_eq!(result.feedback[0], "Payload of 6 AIM-120 is below the threshold of 8.");
}

#[test]
fn mach_objective_is_suppressed_when_curve_fails() {
    let mut wb = compliant_workbook();
    set(&mut wb, "main!U3", 2.3);

    let passing = run_module(constraints::run, &wb);
    assert_eq!(
        passing.feedback,
        vec!["MaxMach: Meets objective Mach 2.20 (design Mach 2.30)."]
    );

    raise_curve(&mut wb, 23);
    let failing = run_module(constraints::run, &wb);

    assert_eq!(failing.delta, 0);
    assert_eq!(
        failing.feedback,
        vec![format!(
            "Design point lies below the constraint curve for: MaxMach.{FEW_SUFFIX}"
        )]
    );
}

#[test]
fn every_curve_failing_uses_the_many_suffix() {
    let mut wb = compliant_workbook();
    for row in [23, 24, 26, 27, 28, 29, 32] {
        raise_curve(&mut wb, row);
    }
    set(&mut wb, "consts!L33", 50.0);

    let result = run_module(constraints::run, &wb);

    assert_eq!(result.delta, 0);
    assert_eq!(
        result.feedback,
        vec![
            "Takeoff: design T/W of 1.200 is below the required 2.000 at the design W/S."
                .to_string(),
            "Landing: design W/S of 60.0 exceeds the landing limit of 50.0.".to_string(),
            format!(
                "Design point lies below the constraint curves for: MaxMach, Supercruise, \
                 Combat Turn 1, Combat Turn 2, Ps1, Ps2, Takeoff, Landing.{MANY_SUFFIX}"
            ),
        ]
    );
}

#[test]
fn distance_objective_waits_for_curve_outcome() {
    let mut wb = compliant_workbook();
    set(&mut wb, "main!X12", 2_400.0);

    let passing = run_module(constraints::run, &wb);
    assert_eq!(
        passing.feedback,
        vec!["Meets takeoff distance objective (2400 ft)."]
    );

    raise_curve(&mut wb, 32);
    let failing = run_module(constraints::run, &wb);
    assert!(failing
        .feedback
        .iter()
        .all(|line| !line.starts_with("Meets takeoff")));
    assert!(failing.feedback[0].starts_with("Takeoff: design T/W"));
}

#[test]
fn long_landing_distance_fails() {
    let mut wb = compliant_workbook();
    set(&mut wb, "main!X13", 5_200.0);

    let result = run_module(constraints::run, &wb);

    assert_eq!(result.delta, -1);
    assert_eq!(
        result.feedback[0],
        "Landing distance of 5200 ft exceeds the threshold of 5000 ft."
    );
}

#[test]
fn drag_index_must_be_an_allowed_value() {
    let mut wb = compliant_workbook();
    set(&mut wb, "main!Y12", 0.02);
    set(&mut wb, "main!Y13", 0.045);

    let result = run_module(constraints::run, &wb);

    assert_eq!(result.delta, -1);
    assert_eq!(
        result.feedback,
        vec![
            "Takeoff: CDx 0.0200 must be one of 0, 0.035.".to_string(),
            ConstraintMessages::default().summary,
        ]
    );
}

#[test]
fn missing_fuel_capacity_fails_every_mid_mission_beta() {
    let mut wb = compliant_workbook();
    clear(&mut wb, "main!O15");

    let result = run_module(constraints::run, &wb);

    let beta_lines: Vec<&String> = result
        .feedback
        .iter()
        .filter(|line| line.contains("weight fraction"))
        .collect();
    assert_eq!(beta_lines.len(), 6);
    assert_eq!(
        beta_lines[0],
        "MaxMach: weight fraction (beta) should be NaN, found 0.600."
    );
    assert_eq!(result.delta, -1);
}

#[test]
fn missing_pinned_mach_is_a_failure() {
    let mut wb = compliant_workbook();
    clear(&mut wb, "main!U6");

    let result = run_module(constraints::run, &wb);

    assert_eq!(
        result.feedback[0],
        "Combat Turn 1: Mach NaN does not match the required Mach 1.20."
    );
    assert_eq!(result.delta, -1);
}

#[test]
fn load_factor_threshold_and_objective() {
    let mut wb = compliant_workbook();
    set(&mut wb, "main!V6", 2.5);
    set(&mut wb, "main!V7", 4.6);

    let result = run_module(constraints::run, &wb);

    assert_eq!(
        result.feedback,
        vec![
            "Combat Turn 1: load factor 2.50 is below the threshold of 3.00.".to_string(),
            "Combat Turn 2: Meets objective load factor 4.50 (design 4.60).".to_string(),
            ConstraintMessages::default().summary,
        ]
    );
}

#[test]
fn custom_constraint_table_replaces_standard_rows() {
    let rules = RuleSet::from_json(
        r#"{
            "constraints": {
                "specs": [
                    { "label": "Dash", "row": 5, "mach": { "minimum": { "threshold": 1.9 } } }
                ]
            }
        }"#,
    )
    .expect("rule set parses");
    let mut wb = compliant_workbook();
    set(&mut wb, "main!U5", 1.7);

    let result = run_with(constraints::run, &wb, &rules);

    assert_eq!(
        result.feedback,
        vec![
            "Dash: Mach 1.70 is below the threshold of 1.90.".to_string(),
            ConstraintMessages::default().summary,
        ]
    );
}
