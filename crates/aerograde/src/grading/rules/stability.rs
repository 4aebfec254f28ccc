use super::between;
use crate::grading::{RuleContext, RuleResult};
use crate::workbook::Field;

const STATIC_MARGIN: Field = Field::main("M10");
const ROLL_DERIVATIVE: Field = Field::main("O10");
const YAW_DERIVATIVE: Field = Field::main("P10");
const DERIVATIVE_RATIO: Field = Field::main("Q10");

/// Static margin, lateral-directional derivatives and their ratio.
///
/// Missing values fail their check.
pub(crate) fn run(ctx: &RuleContext<'_>) -> RuleResult {
    let rules = &ctx.rules.stability;
    let msg = &ctx.messages.stability;
    let read = |field| ctx.number(field).unwrap_or(f64::NAN);

    let mut result = RuleResult::default();
    let mut stable = true;

    let margin = read(STATIC_MARGIN);
    if !between(margin, rules.static_margin_min, rules.static_margin_max) {
        result.note(msg.static_margin.clone());
        stable = false;
    } else if margin < 0.0 {
        result.note(msg.static_margin_warning.clone());
    }

    if !(read(ROLL_DERIVATIVE) < rules.roll_derivative_max) {
        result.note(msg.roll.clone());
        stable = false;
    }

    if !(read(YAW_DERIVATIVE) > rules.yaw_derivative_min) {
        result.note(msg.yaw.clone());
        stable = false;
    }

    if !between(read(DERIVATIVE_RATIO), rules.ratio_min, rules.ratio_max) {
        result.note(msg.ratio.clone());
        stable = false;
    }

    if !stable {
        result.deduct(msg.deduction.clone());
    }
    result
}
