use super::common::*;
use crate::grading::rules::attachments;
use crate::grading::AttachmentMessages;

#[test]
fn attached_and_aligned_layout_passes() {
    let result = run_module(attachments::run, &compliant_workbook());
    assert_eq!(result.delta, 0);
    assert!(result.feedback.is_empty(), "{:?}", result.feedback);
}

#[test]
fn pcs_past_fuselage_end_is_detached() {
    let mut wb = compliant_workbook();
    set(&mut wb, "main!C23", 48.5);

    let result = run_module(attachments::run, &wb);
    let messages = AttachmentMessages::default();

    assert_eq!(result.delta, -1);
    assert_eq!(result.feedback.first(), Some(&messages.pcs_longitudinal));
    assert_eq!(result.feedback.last(), Some(&messages.deduction));
}

#[test]
fn inactive_pcs_is_not_checked() {
    let mut wb = compliant_workbook();
    set(&mut wb, "main!C18", 0.5);
    set(&mut wb, "main!C23", 48.5);
    set(&mut wb, "main!C25", 9.0);

    let result = run_module(attachments::run, &wb);

    assert!(result.feedback.is_empty(), "{:?}", result.feedback);
}

#[test]
fn outboard_vertical_tail_is_detached() {
    let mut wb = compliant_workbook();
    set(&mut wb, "main!H24", 3.5);

    let result = run_module(attachments::run, &wb);

    assert_eq!(
        result.feedback,
        vec![
            AttachmentMessages::default().vt_lateral,
            AttachmentMessages::default().deduction,
        ]
    );
}

#[test]
fn components_behind_fuselage_share_the_single_deduction() {
    let mut wb = compliant_workbook();
    set(&mut wb, "main!G23", 51.0);

    let result = run_module(attachments::run, &wb);

    assert_eq!(result.delta, -1);
    assert_eq!(
        result.feedback[0],
        "Components are located at or behind the end of the fuselage (length 50.0 ft)."
    );
}

#[test]
fn strake_must_reach_the_wing_leading_edge() {
    let mut wb = compliant_workbook();
    set(&mut wb, "main!D18", 30.0);
    set(&mut wb, "geom!K15", 45.0);
    set(&mut wb, "geom!M152", 5.0);
    set(&mut wb, "geom!L38", 8.0);

    // Wing leading edge at the junction: 5 / tan(45 deg) + 8 = 13.
    set(&mut wb, "geom!L155", 10.0);
    let result = run_module(attachments::run, &wb);
    assert_eq!(result.feedback[0], AttachmentMessages::default().strake);

    set(&mut wb, "geom!L155", 12.8);
    assert!(run_module(attachments::run, &wb).feedback.is_empty());
}

#[test]
fn tail_aspect_ratio_must_stay_below_wing() {
    let mut wb = compliant_workbook();
    set(&mut wb, "main!C19", 4.0);

    let result = run_module(attachments::run, &wb);

    assert_eq!(
        result.feedback[0],
        "PCS aspect ratio of 4.00 must be lower than the wing aspect ratio of 3.50."
    );
}

#[test]
fn engine_must_fit_inside_the_fuselage() {
    let mut wb = compliant_workbook();
    set(&mut wb, "main!F28", 25.0);
    set(&mut wb, "main!F29", 7.0);

    let result = run_module(attachments::run, &wb);

    assert_eq!(
        result.feedback,
        vec![
            "Engine extends 5.0 ft past the end of the fuselage.".to_string(),
            "Engine diameter of 7.0 ft does not fit inside the fuselage height at the engine station."
                .to_string(),
            AttachmentMessages::default().deduction,
        ]
    );
}

#[test]
fn offset_tails_must_overlap_the_pcs_root() {
    let mut wb = compliant_workbook();
    set(&mut wb, "main!H23", 30.0);

    let result = run_module(attachments::run, &wb);

    assert_eq!(result.feedback[0], AttachmentMessages::default().tail_overlap);

    set(&mut wb, "main!H24", 0.0);
    assert!(run_module(attachments::run, &wb).feedback.is_empty());
}

#[test]
fn misaligned_trailing_edge_is_flagged() {
    let mut wb = compliant_workbook();
    // PCS tip chord 6: trailing edge runs (50, 2) -> (53, 7).
    set(&mut wb, "geom!D8", 6.0);

    let result = run_module(attachments::run, &wb);

    assert_eq!(result.delta, -1);
    assert_eq!(
        result.feedback[0],
        "PCS trailing edge at 59.0 deg is not aligned with a wing edge (planform alignment)."
    );
}

#[test]
fn edge_whose_normal_returns_to_the_body_is_accepted() {
    let mut wb = compliant_workbook();
    // Vertical tail leading edge (40, 2) -> (48, 4): 14 deg, normal meets x = 49.
    set(&mut wb, "geom!G10", 48.0);
    set(&mut wb, "geom!H10", 4.0);
    set(&mut wb, "geom!D10", 0.0);

    let result = run_module(attachments::run, &wb);

    assert!(
        result.feedback.iter().all(|line| !line.contains("leading edge")),
        "{:?}",
        result.feedback
    );
}
