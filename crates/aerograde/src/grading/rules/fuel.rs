use crate::fmt_args;
use crate::format::render;
use crate::grading::{RuleContext, RuleResult};
use crate::workbook::Field;

const FUEL_REQUIRED: Field = Field::main("O17");
pub(crate) const FUEL_AVAILABLE: Field = Field::main("O18");
const VOLUME_REMAINING: Field = Field::main("Q18");

/// Mission fuel and internal volume budget.
pub(crate) fn run(ctx: &RuleContext<'_>) -> RuleResult {
    let rules = &ctx.rules.fuel;
    let msg = &ctx.messages.fuel;
    let mut result = RuleResult::default();

    if let (Some(available), Some(required)) = (ctx.number(FUEL_AVAILABLE), ctx.number(FUEL_REQUIRED)) {
        if available < required + rules.fuel_reserve {
            result.note(render(&msg.fuel, &fmt_args![available, required]));
        }
    }

    if let Some(remaining) = ctx.number(VOLUME_REMAINING) {
        if remaining < rules.volume_reserve {
            let over = rules.volume_reserve - remaining;
            result.note(render(&msg.volume, &fmt_args![over]));
        }
    }

    if !result.feedback.is_empty() {
        result.deduct(msg.deduction.clone());
    }
    result
}
