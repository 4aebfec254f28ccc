use super::common::*;
use crate::grading::rules::cost;

#[test]
fn cost_between_objective_and_ceiling_is_silent() {
    let result = run_module(cost::run, &compliant_workbook());
    assert_eq!(result.delta, 0);
    assert!(result.feedback.is_empty());
}

#[test]
fn cost_above_ceiling_deducts() {
    let mut wb = compliant_workbook();
    set(&mut wb, "main!Q31", 121.3);

    let result = run_module(cost::run, &wb);

    assert_eq!(result.delta, -1);
    assert_eq!(
        result.feedback,
        vec!["Recurring unit cost of $121.3M exceeds the threshold of $115.0M. -1 point"]
    );
}

#[test]
fn cost_at_objective_is_reported() {
    let mut wb = compliant_workbook();
    set(&mut wb, "main!Q31", 100.0);

    let result = run_module(cost::run, &wb);

    assert_eq!(result.delta, 0);
    assert_eq!(result.feedback, vec!["Meets recurring cost objective ($100.0M)."]);
}

#[test]
fn missing_cost_is_skipped() {
    let mut wb = compliant_workbook();
    clear(&mut wb, "main!Q31");
    assert!(run_module(cost::run, &wb).feedback.is_empty());
}
