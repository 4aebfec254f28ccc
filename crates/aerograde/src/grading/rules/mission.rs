//! Mission profile: nine fixed legs checked against the design mission.
//!
//! Findings are advisory and never change the score.

use super::{at_least, between, within};
use crate::fmt_args;
use crate::format::render;
use crate::grading::{RuleContext, RuleResult};
use crate::workbook::{Field, SheetKind};

const LEG_COLUMNS: [u32; 9] = [11, 12, 13, 14, 16, 18, 19, 22, 23];
const ALTITUDE_ROW: u32 = 33;
const MACH_ROW: u32 = 35;
const AFTERBURNER_ROW: u32 = 36;
const DISTANCE_ROW: u32 = 38;
const TIME_ROW: u32 = 39;
const SUPERCRUISE_MACH: Field = Field::main("U4");

const CRUISE_LEGS: [usize; 3] = [3, 4, 8];
const SUPERCRUISE_LEGS: [usize; 2] = [5, 7];
const COMBAT_LEG: usize = 6;
const LOITER_LEG: usize = 9;

/// One column of the mission table; absent cells read as NaN.
#[derive(Debug, Clone, Copy)]
struct Leg {
    altitude: f64,
    mach: f64,
    afterburner: f64,
    distance: f64,
    time: f64,
}

fn read_legs(ctx: &RuleContext<'_>) -> [Leg; 9] {
    let cell = |row: u32, col: u32| {
        ctx.number(Field::at(SheetKind::Main, row, col))
            .unwrap_or(f64::NAN)
    };
    LEG_COLUMNS.map(|col| Leg {
        altitude: cell(ALTITUDE_ROW, col),
        mach: cell(MACH_ROW, col),
        afterburner: cell(AFTERBURNER_ROW, col),
        distance: cell(DISTANCE_ROW, col),
        time: cell(TIME_ROW, col),
    })
}

pub(crate) fn run(ctx: &RuleContext<'_>) -> RuleResult {
    let rules = &ctx.rules.mission;
    let msg = &ctx.messages.mission;
    let legs = read_legs(ctx);
    let leg = |number: usize| legs[number - 1];
    let supercruise_mach = ctx.number(SUPERCRUISE_MACH);

    let (alt_tol, mach_tol, ab_tol) = (
        rules.altitude_tolerance,
        rules.mach_tolerance,
        rules.afterburner_tolerance,
    );
    let no_afterburner = |l: Leg| within(l.afterburner, 0.0, ab_tol);

    let mut result = RuleResult::default();

    let (first, second, third) = (leg(1), leg(2), leg(3));
    if !(within(first.altitude, 0.0, alt_tol)
        && within(first.afterburner, rules.full_afterburner, ab_tol))
    {
        result.note(render(
            &msg.leg1,
            &fmt_args![first.altitude, first.afterburner],
        ));
    }

    if !between(
        second.altitude,
        first.altitude - alt_tol,
        third.altitude + alt_tol,
    ) {
        result.note(render(
            &msg.leg2_altitude,
            &fmt_args![second.altitude, first.altitude, third.altitude],
        ));
    }
    if !between(second.mach, first.mach - mach_tol, third.mach + mach_tol) {
        result.note(render(
            &msg.leg2_mach,
            &fmt_args![second.mach, first.mach, third.mach],
        ));
    }
    if !no_afterburner(second) {
        result.note(render(&msg.leg2_afterburner, &fmt_args![second.afterburner]));
    }

    for number in 3..=LOITER_LEG {
        let l = leg(number);
        if CRUISE_LEGS.contains(&number) {
            let ok = at_least(l.altitude, rules.cruise_altitude, alt_tol)
                && within(l.mach, rules.cruise_mach, mach_tol)
                && no_afterburner(l);
            if !ok {
                result.note(render(
                    &msg.cruise,
                    &fmt_args![number, l.altitude, l.mach, l.afterburner],
                ));
            }
        } else if SUPERCRUISE_LEGS.contains(&number) {
            let ok = at_least(l.altitude, rules.cruise_altitude, alt_tol)
                && supercruise_mach.is_some_and(|target| within(l.mach, target, mach_tol))
                && no_afterburner(l)
                && at_least(
                    l.distance,
                    rules.supercruise_distance,
                    rules.distance_tolerance,
                );
            if !ok {
                result.note(render(
                    &msg.supercruise,
                    &fmt_args![number, l.altitude, l.mach, l.afterburner, l.distance],
                ));
            }
        } else if number == COMBAT_LEG {
            let ok = within(l.altitude, rules.combat_altitude, alt_tol)
                && at_least(l.mach, rules.combat_mach, mach_tol)
                && within(l.afterburner, rules.full_afterburner, ab_tol)
                && at_least(l.time, rules.combat_time, rules.time_tolerance);
            if !ok {
                result.note(render(
                    &msg.combat,
                    &fmt_args![number, l.altitude, l.mach, l.afterburner, l.time],
                ));
            }
        } else if number == LOITER_LEG {
            let ok = within(l.altitude, rules.loiter_altitude, alt_tol)
                && within(l.mach, rules.loiter_mach, mach_tol)
                && no_afterburner(l)
                && within(l.time, rules.loiter_time, rules.time_tolerance);
            if !ok {
                result.note(render(
                    &msg.loiter,
                    &fmt_args![number, l.altitude, l.mach, l.afterburner, l.time],
                ));
            }
        }
    }

    if !result.feedback.is_empty() {
        result.note(msg.summary.clone());
    }
    result
}
