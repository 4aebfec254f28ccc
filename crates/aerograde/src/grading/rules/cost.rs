use crate::fmt_args;
use crate::format::render;
use crate::grading::{RuleContext, RuleResult};
use crate::workbook::Field;

/// Recurring flyaway cost per aircraft, $M.
const UNIT_COST: Field = Field::main("Q31");

pub(crate) fn run(ctx: &RuleContext<'_>) -> RuleResult {
    let rules = &ctx.rules.cost;
    let msg = &ctx.messages.cost;
    let mut result = RuleResult::default();

    let Some(cost) = ctx.number(UNIT_COST) else {
        return result;
    };
    if cost > rules.ceiling {
        result.deduct(render(&msg.ceiling, &fmt_args![cost, rules.ceiling]));
    } else if cost <= rules.objective {
        result.note(render(&msg.objective, &fmt_args![cost]));
    }
    result
}
