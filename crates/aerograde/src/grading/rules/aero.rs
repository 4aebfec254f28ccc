use super::between;
use crate::fmt_args;
use crate::format::render;
use crate::grading::{RuleContext, RuleResult};
use crate::workbook::Field;

const MAX_LIFT_COEFFICIENT: Field = Field::aero("C5");
const OSWALD_EFFICIENCY: Field = Field::aero("C6");
const ZERO_LIFT_DRAG: Field = Field::aero("C7");

/// Plausibility of the aerodynamic inputs. Each violated check costs a point.
pub(crate) fn run(ctx: &RuleContext<'_>) -> RuleResult {
    let rules = &ctx.rules.aero;
    let msg = &ctx.messages.aero;
    let mut result = RuleResult::default();

    if let Some(cl_max) = ctx.number(MAX_LIFT_COEFFICIENT) {
        if cl_max > rules.max_cl {
            result.deduct(render(&msg.cl_max, &fmt_args![cl_max, rules.max_cl]));
        }
    }

    if let Some(oswald) = ctx.number(OSWALD_EFFICIENCY) {
        if !between(oswald, rules.oswald_min, rules.oswald_max) {
            result.deduct(render(
                &msg.oswald,
                &fmt_args![oswald, rules.oswald_min, rules.oswald_max],
            ));
        }
    }

    if let Some(cd0) = ctx.number(ZERO_LIFT_DRAG) {
        if cd0 < rules.cd0_min {
            result.deduct(render(&msg.cd0, &fmt_args![cd0, rules.cd0_min]));
        }
    }

    result
}
