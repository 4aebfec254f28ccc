use crate::fmt_args;
use crate::format::render;
use crate::grading::{RuleContext, RuleResult};
use crate::workbook::{Field, SheetKind};

/// Flight-condition columns C..=N on the mission analysis sheet.
const STATION_COLUMNS: std::ops::RangeInclusive<u32> = 3..=14;
const DRAG_ROW: u32 = 48;
const AVAILABLE_ROW: u32 = 49;
const TAKEOFF_ROLL: Field = Field::main("K38");
const TAKEOFF_REQUIRED: Field = Field::main("X12");

/// Thrust margin at every flight condition, then takeoff roll.
///
/// A thrust shortfall ends the module before the takeoff comparison.
pub(crate) fn run(ctx: &RuleContext<'_>) -> RuleResult {
    let msg = &ctx.messages.thrust;
    let mut result = RuleResult::default();

    let shortfalls = STATION_COLUMNS
        .filter(|&col| {
            let drag = ctx.number(Field::at(SheetKind::Miss, DRAG_ROW, col));
            let available = ctx.number(Field::at(SheetKind::Miss, AVAILABLE_ROW, col));
            match (drag, available) {
                (Some(drag), Some(available)) if drag.is_finite() && available.is_finite() => {
                    available <= drag
                }
                _ => false,
            }
        })
        .count();

    if shortfalls > 0 {
        result.deduct(render(&msg.shortfall, &fmt_args![shortfalls]));
        return result;
    }

    if let (Some(roll), Some(required)) = (ctx.number(TAKEOFF_ROLL), ctx.number(TAKEOFF_REQUIRED)) {
        if roll > required {
            result.deduct(msg.takeoff_roll.clone());
        }
    }
    result
}
