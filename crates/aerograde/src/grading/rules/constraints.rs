//! Constraint table: mission radius, payload, the per-condition rows, and the
//! design point against the constraint curves.
//!
//! Curve outcomes are evaluated first so that objective messages for a
//! condition whose curve check failed can be suppressed. Curve failures are
//! reported but do not count toward the deduction.

use super::fuel::FUEL_AVAILABLE;
use crate::fmt_args;
use crate::format::{fixed, render};
use crate::grading::{
    ConstraintSpec, DistanceKind, DistanceLimit, DragIndexTarget, RuleContext, RuleResult,
    Target, WeightFractionTarget,
};
use crate::pchip::pchip;
use crate::workbook::{Field, SheetKind};

const COL_WEIGHT_FRACTION: u32 = 19;
const COL_ALTITUDE: u32 = 20;
const COL_MACH: u32 = 21;
const COL_LOAD_FACTOR: u32 = 22;
const COL_AFTERBURNER: u32 = 23;
/// Specific excess power; takeoff and landing rows hold the field length here.
const COL_PS: u32 = 24;
const COL_DRAG_INDEX: u32 = 25;

const MISSION_RADIUS: Field = Field::main("Y37");
const AIM120_COUNT: Field = Field::main("AB3");
const AIM9_COUNT: Field = Field::main("AB4");
const DESIGN_WING_LOADING: Field = Field::main("P13");
const DESIGN_THRUST_LOADING: Field = Field::main("Q13");
const FUEL_CAPACITY: Field = Field::main("O15");

const CURVE_AXIS_ROW: u32 = 22;
const CURVE_COLUMNS: std::ops::RangeInclusive<u32> = 11..=31;
const LANDING_WING_LOADING_LIMIT: Field = Field::consts("L33");

pub(crate) fn run(ctx: &RuleContext<'_>) -> RuleResult {
    let rules = &ctx.rules.constraints;
    let msg = &ctx.messages.constraint;
    let mut result = RuleResult::default();
    let mut failures = 0usize;

    if let Some(radius) = ctx.number(MISSION_RADIUS) {
        if radius < rules.radius_threshold - rules.distance_tolerance {
            result.note(render(
                &msg.radius_low,
                &fmt_args![radius, rules.radius_threshold],
            ));
            failures += 1;
        } else if radius >= rules.radius_objective - rules.distance_tolerance {
            result.note(render(&msg.radius_objective, &fmt_args![radius]));
        }
    }

    let tolerance = rules.payload_integer_tolerance;
    match (
        whole_count(ctx.number(AIM120_COUNT), tolerance),
        whole_count(ctx.number(AIM9_COUNT), tolerance),
    ) {
        (Some(aim120), Some(aim9)) => {
            if aim120 < rules.aim120_minimum {
                result.note(render(
                    &msg.payload_low,
                    &fmt_args![aim120, rules.aim120_minimum],
                ));
                failures += 1;
            } else if aim9 >= rules.aim9_objective {
                result.note(render(&msg.payload_objective, &fmt_args![aim120, aim9]));
            }
        }
        _ => {
            result.note(msg.payload_integer.clone());
            failures += 1;
        }
    }

    let curves = CurveOutcome::evaluate(ctx);
    let mut distance_objectives: Vec<(&str, String)> = Vec::new();

    for spec in &rules.specs {
        let curve_ok = !curves.failed(&spec.label);
        let row = RowReader { ctx, spec };
        let label = spec.label.as_str();

        let mach = row.value(COL_MACH);
        match spec.mach {
            Target::Unchecked => {}
            Target::Equal(target) => {
                if !mach.is_some_and(|m| m.is_finite() && (m - target).abs() <= rules.mach_tolerance) {
                    result.note(render(&msg.mach_equal, &fmt_args![label, mach, target]));
                    failures += 1;
                }
            }
            Target::Minimum { threshold, objective } => {
                if let Some(m) = mach {
                    if m < threshold - rules.mach_tolerance {
                        result.note(render(&msg.mach_minimum, &fmt_args![label, m, threshold]));
                        failures += 1;
                    } else if let Some(objective) = objective {
                        if curve_ok && m >= objective - rules.mach_tolerance {
                            result.note(render(
                                &msg.mach_objective,
                                &fmt_args![label, objective, m],
                            ));
                        }
                    }
                }
            }
        }

        if let Some(altitude) = row.value(COL_ALTITUDE) {
            match spec.altitude {
                Target::Unchecked => {}
                Target::Equal(target) => {
                    if (altitude - target).abs() > rules.altitude_tolerance {
                        result.note(render(
                            &msg.altitude_equal,
                            &fmt_args![label, altitude, target],
                        ));
                        failures += 1;
                    }
                }
                Target::Minimum { threshold, .. } => {
                    if altitude < threshold - rules.altitude_tolerance {
                        result.note(render(
                            &msg.altitude_minimum,
                            &fmt_args![label, altitude, threshold],
                        ));
                        failures += 1;
                    }
                }
            }
        }

        if let Some(n) = row.value(COL_LOAD_FACTOR) {
            match spec.load_factor {
                Target::Unchecked => {}
                Target::Equal(target) => {
                    if (n - target).abs() > rules.load_factor_tolerance {
                        result.note(render(&msg.load_factor_equal, &fmt_args![label, n, target]));
                        failures += 1;
                    }
                }
                Target::Minimum { threshold, objective } => {
                    if n < threshold - rules.load_factor_tolerance {
                        result.note(render(
                            &msg.load_factor_minimum,
                            &fmt_args![label, n, threshold],
                        ));
                        failures += 1;
                    } else if let Some(objective) = objective {
                        if curve_ok && n >= objective - rules.load_factor_tolerance {
                            result.note(render(
                                &msg.load_factor_objective,
                                &fmt_args![label, objective, n],
                            ));
                        }
                    }
                }
            }
        }

        if let (Some(target), Some(setting)) = (spec.afterburner, row.value(COL_AFTERBURNER)) {
            if (setting - target).abs() > rules.afterburner_tolerance {
                result.note(render(
                    &msg.afterburner_equal,
                    &fmt_args![label, setting, target],
                ));
                failures += 1;
            }
        }

        if let Some(ps) = row.value(COL_PS) {
            match spec.ps {
                Target::Unchecked => {}
                Target::Equal(target) => {
                    if (ps - target).abs() > rules.ps_tolerance {
                        result.note(render(&msg.ps_equal, &fmt_args![label, ps, target]));
                        failures += 1;
                    }
                }
                Target::Minimum { threshold, objective } => {
                    if ps < threshold - rules.ps_tolerance {
                        result.note(render(&msg.ps_minimum, &fmt_args![label, ps, threshold]));
                        failures += 1;
                    } else if let Some(objective) = objective {
                        if curve_ok && ps >= objective - rules.ps_tolerance {
                            result.note(render(
                                &msg.ps_objective,
                                &fmt_args![label, objective, ps],
                            ));
                        }
                    }
                }
            }
        }

        let beta_target = match spec.weight_fraction {
            WeightFractionTarget::Unchecked => None,
            WeightFractionTarget::Equal(target) => Some(target),
            WeightFractionTarget::MidMissionFuel => Some(mid_mission_weight_fraction(ctx)),
        };
        if let Some(target) = beta_target {
            let beta = row.value(COL_WEIGHT_FRACTION).unwrap_or(f64::NAN);
            let matches = target.is_finite()
                && beta.is_finite()
                && (beta - target).abs() <= rules.weight_fraction_tolerance;
            if !matches {
                result.note(render(&msg.beta_equal, &fmt_args![label, target, beta]));
                failures += 1;
            }
        }

        let cdx = row.value(COL_DRAG_INDEX);
        match &spec.drag_index {
            DragIndexTarget::Unchecked => {}
            DragIndexTarget::Equal(target) => {
                if cdx.map_or(true, |c| (c - target).abs() > rules.drag_index_tolerance) {
                    result.note(render(&msg.cdx_equal, &fmt_args![label, cdx, *target]));
                    failures += 1;
                }
            }
            DragIndexTarget::OneOf(allowed) => {
                let matched = cdx.is_some_and(|c| {
                    c.is_finite()
                        && allowed
                            .iter()
                            .any(|v| (c - v).abs() < rules.drag_index_tolerance)
                });
                if !matched {
                    result.note(render(
                        &msg.cdx_allowed,
                        &fmt_args![label, cdx, allowed_list(allowed)],
                    ));
                    failures += 1;
                }
            }
        }

        if let Some(limit) = &spec.distance {
            if let Some(distance) = row.value(COL_PS) {
                let (high, objective) = distance_messages(ctx, limit);
                if distance > limit.threshold + rules.distance_tolerance {
                    result.note(render(high, &fmt_args![distance, limit.threshold]));
                    failures += 1;
                } else if distance <= limit.objective + rules.distance_tolerance {
                    distance_objectives.push((label, render(objective, &fmt_args![distance])));
                }
            }
        }
    }

    for (label, line) in distance_objectives {
        if !curves.failed(label) {
            result.note(line);
        }
    }
    result.feedback.extend(curves.lines);

    if failures > 0 {
        result.deduct(msg.summary.clone());
    }
    result
}

fn distance_messages<'a>(ctx: &'a RuleContext<'_>, limit: &DistanceLimit) -> (&'a str, &'a str) {
    let msg = &ctx.messages.constraint;
    match limit.kind {
        DistanceKind::Takeoff => (&msg.takeoff_high, &msg.takeoff_objective),
        DistanceKind::Landing => (&msg.landing_high, &msg.landing_objective),
    }
}

struct RowReader<'a, 'b> {
    ctx: &'a RuleContext<'b>,
    spec: &'a ConstraintSpec,
}

impl RowReader<'_, '_> {
    fn value(&self, col: u32) -> Option<f64> {
        self.ctx
            .number(Field::at(SheetKind::Main, self.spec.row, col))
    }
}

/// `1 - available / (2 * capacity)`; NaN when either cell is missing.
fn mid_mission_weight_fraction(ctx: &RuleContext<'_>) -> f64 {
    let available = ctx.number(FUEL_AVAILABLE).unwrap_or(f64::NAN);
    let capacity = ctx.number(FUEL_CAPACITY).unwrap_or(f64::NAN);
    1.0 - available / (2.0 * capacity)
}

/// Rounds a store count, rejecting values more than `tolerance` off a whole
/// number. Missing or non-finite counts read as zero.
fn whole_count(value: Option<f64>, tolerance: f64) -> Option<i64> {
    let raw = value.filter(|v| v.is_finite()).unwrap_or(0.0);
    let rounded = raw.round();
    ((raw - rounded).abs() <= tolerance).then_some(rounded as i64)
}

/// `0, 0.035`: three decimals with trailing zeros dropped.
fn allowed_list(values: &[f64]) -> String {
    values
        .iter()
        .map(|value| {
            let text = fixed(*value, 3);
            let trimmed = text.trim_end_matches('0');
            trimmed.strip_suffix('.').unwrap_or(trimmed).to_string()
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Design point checked against every constraint curve.
struct CurveOutcome {
    failed: Vec<String>,
    lines: Vec<String>,
}

impl CurveOutcome {
    fn evaluate(ctx: &RuleContext<'_>) -> Self {
        let rules = &ctx.rules.constraints;
        let msg = &ctx.messages.constraint;
        let mut outcome = Self {
            failed: Vec::new(),
            lines: Vec::new(),
        };

        let wing_loading = ctx
            .number(DESIGN_WING_LOADING)
            .filter(|v| v.is_finite());
        let thrust_loading = ctx
            .number(DESIGN_THRUST_LOADING)
            .filter(|v| v.is_finite());

        if let (Some(ws), Some(tw)) = (wing_loading, thrust_loading) {
            let axis = curve_row(ctx, CURVE_AXIS_ROW);
            for spec in &rules.specs {
                let Some(row) = spec.curve_row else {
                    continue;
                };
                let Some(required) = pchip(&axis, &curve_row(ctx, row), ws) else {
                    continue;
                };
                if tw < required {
                    outcome.fail(&spec.label);
                    if spec.report_curve_detail {
                        outcome.lines.push(render(
                            &msg.curve_detail,
                            &fmt_args![spec.label.as_str(), tw, required],
                        ));
                    }
                }
            }
        }

        if let (Some(ws), Some(limit)) = (wing_loading, ctx.number(LANDING_WING_LOADING_LIMIT)) {
            if ws > limit {
                let label = rules
                    .specs
                    .iter()
                    .find(|spec| {
                        spec.distance
                            .is_some_and(|d| d.kind == DistanceKind::Landing)
                    })
                    .map_or("Landing", |spec| spec.label.as_str());
                outcome.fail(label);
                outcome
                    .lines
                    .push(render(&msg.landing_curve, &fmt_args![ws, limit]));
            }
        }

        if !outcome.failed.is_empty() {
            let plural = if outcome.failed.len() > 1 { "s" } else { "" };
            let mut line = render(
                &msg.curve_failure,
                &fmt_args![plural, outcome.failed.join(", ")],
            );
            line.push_str(if outcome.failed.len() > rules.many_curve_failures {
                &msg.curve_suffix_many
            } else {
                &msg.curve_suffix_few
            });
            outcome.lines.push(line);
        }
        outcome
    }

    fn fail(&mut self, label: &str) {
        if !self.failed.iter().any(|existing| existing == label) {
            self.failed.push(label.to_string());
        }
    }

    fn failed(&self, label: &str) -> bool {
        self.failed.iter().any(|existing| existing == label)
    }
}

/// Constants-sheet row sampled over the curve columns; gaps read as NaN.
fn curve_row(ctx: &RuleContext<'_>, row: u32) -> Vec<f64> {
    CURVE_COLUMNS
        .map(|col| {
            ctx.number(Field::at(SheetKind::Consts, row, col))
                .unwrap_or(f64::NAN)
        })
        .collect()
}
