//! Component placement, attachment and planform shaping.
//!
//! Every finding feeds a single deduction. Components whose reference area is
//! below the activity threshold are treated as absent and skip their checks.

use crate::fmt_args;
use crate::format::render;
use crate::grading::{RuleContext, RuleResult};
use crate::workbook::{Field, SheetKind};

const FUSELAGE_LENGTH: Field = Field::main("B32");
const FUSELAGE_Z_CENTER: Field = Field::main("D52");
const FUSELAGE_WIDTH: Field = Field::main("E52");
const FUSELAGE_HEIGHT: Field = Field::main("F52");

const AREA_ROW: u32 = 18;
const ASPECT_RATIO_ROW: u32 = 19;
const X_ROW: u32 = 23;
const Y_ROW: u32 = 24;
const Z_ROW: u32 = 25;
/// Columns B..=H of the component table, including engine and inlet.
const COMPONENT_COLUMNS: std::ops::RangeInclusive<u32> = 2..=8;

const ENGINE_X: Field = Field::main("F23");
const ENGINE_Z: Field = Field::main("F25");
const ENGINE_LENGTH: Field = Field::main("F28");
const ENGINE_DIAMETER: Field = Field::main("F29");

const STRAKE_SWEEP: Field = Field::geom("K15");
const STRAKE_SPAN_STATION: Field = Field::geom("M152");
const STRAKE_LEADING_EDGE: Field = Field::geom("L155");
const WING_APEX: Field = Field::geom("L38");

const PLANFORM_ROOT_CHORD: u32 = 3;
const PLANFORM_TIP_CHORD: u32 = 4;
const PLANFORM_ROOT_X: u32 = 5;
const PLANFORM_ROOT_Y: u32 = 6;
const PLANFORM_TIP_X: u32 = 7;
const PLANFORM_TIP_Y: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Surface {
    Wing,
    Pcs,
    Strake,
    Canard,
    VerticalTail,
}

impl Surface {
    const ALL: [Surface; 5] = [
        Surface::Wing,
        Surface::Pcs,
        Surface::Strake,
        Surface::Canard,
        Surface::VerticalTail,
    ];

    const SHAPED: [Surface; 4] = [
        Surface::Pcs,
        Surface::Strake,
        Surface::Canard,
        Surface::VerticalTail,
    ];

    fn name(self) -> &'static str {
        match self {
            Surface::Wing => "Wing",
            Surface::Pcs => "PCS",
            Surface::Strake => "Strake",
            Surface::Canard => "Canard",
            Surface::VerticalTail => "Vertical tail",
        }
    }

    /// Column of the main-sheet component table.
    fn column(self) -> u32 {
        match self {
            Surface::Wing => 2,
            Surface::Pcs => 3,
            Surface::Strake => 4,
            Surface::Canard => 5,
            Surface::VerticalTail => 8,
        }
    }

    fn at_column(col: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|surface| surface.column() == col)
    }

    /// Row of the geometry-sheet planform table.
    fn planform_row(self) -> u32 {
        match self {
            Surface::Wing => 7,
            Surface::Pcs => 8,
            Surface::Strake => 9,
            Surface::VerticalTail => 10,
            Surface::Canard => 11,
        }
    }

    /// Strakes blend into the wing root, so only their leading edge is shaped.
    fn shaped_edges(self) -> &'static [EdgeKind] {
        match self {
            Surface::Strake => &[EdgeKind::Leading],
            _ => &[EdgeKind::Leading, EdgeKind::Trailing],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EdgeKind {
    Leading,
    Trailing,
}

impl EdgeKind {
    fn name(self) -> &'static str {
        match self {
            EdgeKind::Leading => "leading",
            EdgeKind::Trailing => "trailing",
        }
    }
}

/// Straight planform edge from root (x, y) to tip (x, y).
#[derive(Debug, Clone, Copy, PartialEq)]
struct Edge {
    root: (f64, f64),
    tip: (f64, f64),
}

impl Edge {
    /// Direction in degrees, folded into `[0, 180)`.
    fn angle(&self) -> f64 {
        let dx = self.tip.0 - self.root.0;
        let dy = self.tip.1 - self.root.1;
        dy.atan2(dx).to_degrees().rem_euclid(180.0)
    }

    /// Whether the normal through the tip meets the centerline inside the
    /// fuselage, so the edge reflects back along the body.
    fn normal_meets_fuselage(&self, fuselage_length: f64) -> bool {
        let dx = self.tip.0 - self.root.0;
        if dx == 0.0 {
            return false;
        }
        let dy = self.tip.1 - self.root.1;
        let x = self.tip.0 + self.tip.1 * dy / dx;
        x.is_finite() && (0.0..=fuselage_length).contains(&x)
    }
}

#[derive(Debug, Clone, Copy)]
struct Planform {
    root_chord: f64,
    tip_chord: f64,
    root: (f64, f64),
    tip: (f64, f64),
}

impl Planform {
    fn read(ctx: &RuleContext<'_>, surface: Surface) -> Option<Self> {
        let cell = |col| ctx.number(Field::at(SheetKind::Geom, surface.planform_row(), col));
        Some(Self {
            root_chord: cell(PLANFORM_ROOT_CHORD)?,
            tip_chord: cell(PLANFORM_TIP_CHORD)?,
            root: (cell(PLANFORM_ROOT_X)?, cell(PLANFORM_ROOT_Y)?),
            tip: (cell(PLANFORM_TIP_X)?, cell(PLANFORM_TIP_Y)?),
        })
    }

    fn edge(&self, kind: EdgeKind) -> Edge {
        match kind {
            EdgeKind::Leading => Edge {
                root: self.root,
                tip: self.tip,
            },
            EdgeKind::Trailing => Edge {
                root: (self.root.0 + self.root_chord, self.root.1),
                tip: (self.tip.0 + self.tip_chord, self.tip.1),
            },
        }
    }
}

fn angle_between(a: f64, b: f64) -> f64 {
    let diff = (a - b).abs() % 180.0;
    diff.min(180.0 - diff)
}

fn component(ctx: &RuleContext<'_>, row: u32, col: u32) -> Option<f64> {
    ctx.number(Field::at(SheetKind::Main, row, col))
}

fn is_active(ctx: &RuleContext<'_>, surface: Surface) -> bool {
    component(ctx, AREA_ROW, surface.column())
        .map_or(true, |area| area >= ctx.rules.attachments.active_area)
}

fn root_chord(ctx: &RuleContext<'_>, surface: Surface) -> Option<f64> {
    ctx.number(Field::at(
        SheetKind::Geom,
        surface.planform_row(),
        PLANFORM_ROOT_CHORD,
    ))
}

pub(crate) fn run(ctx: &RuleContext<'_>) -> RuleResult {
    let rules = &ctx.rules.attachments;
    let msg = &ctx.messages.attachment;
    let mut result = RuleResult::default();

    let fuselage_length = ctx.number(FUSELAGE_LENGTH);
    let z_center = ctx.number(FUSELAGE_Z_CENTER);
    let width = ctx.number(FUSELAGE_WIDTH);
    let height = ctx.number(FUSELAGE_HEIGHT);

    let pcs_active = is_active(ctx, Surface::Pcs);
    let vt_active = is_active(ctx, Surface::VerticalTail);
    let pcs_x = component(ctx, X_ROW, Surface::Pcs.column());
    let vt_x = component(ctx, X_ROW, Surface::VerticalTail.column());
    let vt_y = component(ctx, Y_ROW, Surface::VerticalTail.column());
    let pcs_root = root_chord(ctx, Surface::Pcs);
    let vt_root = root_chord(ctx, Surface::VerticalTail);

    let overhangs = |x: Option<f64>, chord: Option<f64>| match (x, chord, fuselage_length) {
        (Some(x), Some(chord), Some(length)) => x > length - rules.attach_chord_fraction * chord,
        _ => false,
    };
    if pcs_active && overhangs(pcs_x, pcs_root) {
        result.note(msg.pcs_longitudinal.clone());
    }
    if vt_active && overhangs(vt_x, vt_root) {
        result.note(msg.vt_longitudinal.clone());
    }

    if pcs_active {
        let pcs_z = component(ctx, Z_ROW, Surface::Pcs.column());
        if let (Some(z), Some(center), Some(height)) = (pcs_z, z_center, height) {
            if z < center - height / 2.0 || z > center + height / 2.0 {
                result.note(msg.pcs_vertical.clone());
            }
        }
    }

    if vt_active {
        if let (Some(y), Some(width)) = (vt_y, width) {
            if y > width / 2.0 {
                result.note(msg.vt_lateral.clone());
            }
        }
    }

    if component(ctx, AREA_ROW, Surface::Strake.column()).is_some_and(|area| area > rules.active_area) {
        let junction = (
            ctx.number(STRAKE_SWEEP),
            ctx.number(STRAKE_SPAN_STATION),
            ctx.number(STRAKE_LEADING_EDGE),
            ctx.number(WING_APEX),
        );
        if let (Some(sweep), Some(y), Some(strake), Some(apex)) = junction {
            let wing = y / (90.0 - sweep).to_radians().tan() + apex;
            if !(wing < strake + rules.strake_tolerance) {
                result.note(msg.strake.clone());
            }
        }
    }

    if let Some(length) = fuselage_length {
        let behind = COMPONENT_COLUMNS
            .filter(|&col| Surface::at_column(col).map_or(true, |surface| is_active(ctx, surface)))
            .filter_map(|col| component(ctx, X_ROW, col))
            .any(|x| x >= length);
        if behind {
            result.note(render(&msg.behind_fuselage, &fmt_args![length]));
        }
    }

    let wing_ar = component(ctx, ASPECT_RATIO_ROW, Surface::Wing.column())
        .filter(|_| is_active(ctx, Surface::Wing));
    if let Some(wing_ar) = wing_ar {
        for surface in [Surface::Pcs, Surface::Canard, Surface::VerticalTail] {
            if !is_active(ctx, surface) {
                continue;
            }
            if let Some(ar) = component(ctx, ASPECT_RATIO_ROW, surface.column()) {
                if ar >= wing_ar {
                    result.note(render(
                        &msg.aspect_ratio,
                        &fmt_args![surface.name(), ar, wing_ar],
                    ));
                }
            }
        }
    }

    if let (Some(x), Some(engine_length), Some(length)) =
        (ctx.number(ENGINE_X), ctx.number(ENGINE_LENGTH), fuselage_length)
    {
        let protrusion = x + engine_length - length;
        if protrusion > rules.engine_protrusion_allowance {
            result.note(render(&msg.engine_protrusion, &fmt_args![protrusion]));
        }
    }

    if let (Some(z), Some(diameter), Some(center), Some(height)) =
        (ctx.number(ENGINE_Z), ctx.number(ENGINE_DIAMETER), z_center, height)
    {
        let top = z + diameter / 2.0;
        let bottom = z - diameter / 2.0;
        if top > center + height / 2.0 || bottom < center - height / 2.0 {
            result.note(render(&msg.engine_clearance, &fmt_args![diameter]));
        }
    }

    if pcs_active && vt_active {
        if let (Some(y), Some(vt_x), Some(vt_root), Some(pcs_x), Some(pcs_root)) =
            (vt_y, vt_x, vt_root, pcs_x, pcs_root)
        {
            let overlaps = vt_x < pcs_x + pcs_root && pcs_x < vt_x + vt_root;
            if y.abs() > rules.offset_tail_threshold && !overlaps {
                result.note(msg.tail_overlap.clone());
            }
        }
    }

    for line in stealth_findings(ctx, fuselage_length) {
        result.note(line);
    }

    if !result.feedback.is_empty() {
        result.deduct(msg.deduction.clone());
    }
    result
}

/// Edges of the other lifting surfaces that are neither parallel to a wing
/// edge nor reflect back onto the fuselage.
fn stealth_findings(ctx: &RuleContext<'_>, fuselage_length: Option<f64>) -> Vec<String> {
    let rules = &ctx.rules.attachments;
    if !is_active(ctx, Surface::Wing) {
        return Vec::new();
    }
    let Some(wing) = Planform::read(ctx, Surface::Wing) else {
        return Vec::new();
    };
    let references = [
        wing.edge(EdgeKind::Leading).angle(),
        wing.edge(EdgeKind::Trailing).angle(),
    ];

    let mut findings = Vec::new();
    for surface in Surface::SHAPED {
        if !is_active(ctx, surface) {
            continue;
        }
        let Some(planform) = Planform::read(ctx, surface) else {
            continue;
        };
        for &kind in surface.shaped_edges() {
            let edge = planform.edge(kind);
            let angle = edge.angle();
            let parallel = references
                .iter()
                .any(|reference| angle_between(angle, *reference) <= rules.parallel_tolerance_deg);
            let reflects_to_body =
                fuselage_length.is_some_and(|length| edge.normal_meets_fuselage(length));
            if !parallel && !reflects_to_body {
                findings.push(render(
                    &ctx.messages.attachment.stealth,
                    &fmt_args![surface.name(), kind.name(), angle],
                ));
            }
        }
    }
    findings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_angles_fold_into_half_turn() {
        let swept = Edge {
            root: (10.0, 0.0),
            tip: (20.0, 10.0),
        };
        assert!((swept.angle() - 45.0).abs() < 1e-9);

        let reversed = Edge {
            root: (20.0, 10.0),
            tip: (10.0, 0.0),
        };
        assert!((reversed.angle() - 45.0).abs() < 1e-9);
    }

    #[test]
    fn angle_between_wraps_at_180() {
        assert!((angle_between(178.0, 2.0) - 4.0).abs() < 1e-9);
        assert!((angle_between(30.0, 35.0) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn normal_through_tip_meets_centerline() {
        // Highly swept edge: normal from (40, 4) lands at x = 40 + 4 * 4 / 20.
        let edge = Edge {
            root: (20.0, 0.0),
            tip: (40.0, 4.0),
        };
        assert!(edge.normal_meets_fuselage(50.0));
        assert!(!edge.normal_meets_fuselage(40.0));

        let spanwise = Edge {
            root: (30.0, 0.0),
            tip: (30.0, 8.0),
        };
        assert!(!spanwise.normal_meets_fuselage(50.0));
    }
}
