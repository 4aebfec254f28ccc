use crate::grading::{RuleContext, RuleResult};
use crate::workbook::Field;

const NOSE_LOAD_PERCENT: Field = Field::gear("J19");
const TIPBACK_ANGLE: Field = Field::gear("L19");
const TAIL_STRIKE_ANGLE: Field = Field::gear("L20");
const ROLLOVER_ANGLE: Field = Field::gear("M19");
const ROLLOVER_LIMIT: Field = Field::gear("M20");
const ROTATION_SPEED: Field = Field::gear("N19");

/// Landing gear geometry. Checks whose cells are empty are skipped.
pub(crate) fn run(ctx: &RuleContext<'_>) -> RuleResult {
    let rules = &ctx.rules.gear;
    let msg = &ctx.messages.gear;
    let mut result = RuleResult::default();

    if let Some(nose) = ctx.number(NOSE_LOAD_PERCENT) {
        if nose < rules.nose_load_min || nose > rules.nose_load_max {
            result.note(msg.nose.clone());
        }
    }

    if let (Some(angle), Some(limit)) = (ctx.number(TIPBACK_ANGLE), ctx.number(TAIL_STRIKE_ANGLE)) {
        if !(angle < limit) {
            result.note(msg.tipback.clone());
        }
    }

    if let (Some(angle), Some(limit)) = (ctx.number(ROLLOVER_ANGLE), ctx.number(ROLLOVER_LIMIT)) {
        if !(angle < limit) {
            result.note(msg.rollover.clone());
        }
    }

    if let Some(speed) = ctx.number(ROTATION_SPEED) {
        if !(speed < rules.rotation_speed_max) {
            result.note(msg.rotation.clone());
        }
    }

    if !result.feedback.is_empty() {
        result.deduct(msg.deduction.clone());
    }
    result
}
