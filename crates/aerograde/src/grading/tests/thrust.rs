use super::common::*;
use crate::grading::rules::thrust;
use crate::grading::ThrustMessages;

#[test]
fn adequate_thrust_and_short_roll_pass() {
    let result = run_module(thrust::run, &compliant_workbook());
    assert_eq!(result.delta, 0);
    assert!(result.feedback.is_empty());
}

#[test]
fn shortfall_counts_stations_and_skips_takeoff() {
    let mut wb = compliant_workbook();
    set(&mut wb, "miss!D49", 9_000.0);
    set(&mut wb, "miss!N49", 10_000.0);
    set(&mut wb, "main!K38", 5_000.0);

    let result = run_module(thrust::run, &wb);

    assert_eq!(result.delta, -1);
    assert_eq!(
        result.feedback,
        vec![
            "Thrust available does not exceed drag at 2 flight condition(s) on the Miss tab. -1 point"
                .to_string()
        ]
    );
}

#[test]
fn long_takeoff_roll_costs_a_point() {
    let mut wb = compliant_workbook();
    set(&mut wb, "main!K38", 3_100.0);

    let result = run_module(thrust::run, &wb);

    assert_eq!(result.delta, -1);
    assert_eq!(result.feedback, vec![ThrustMessages::default().takeoff_roll]);
}

#[test]
fn stations_with_missing_or_text_values_are_skipped() {
    let mut wb = compliant_workbook();
    clear(&mut wb, "miss!C48");
    set(&mut wb, "miss!E49", "n/a");
    set(&mut wb, "miss!E48", 20_000.0);

    let result = run_module(thrust::run, &wb);

    assert_eq!(result.delta, 0);
}
