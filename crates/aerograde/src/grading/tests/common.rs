use axum::response::Response;
use serde_json::Value;

use crate::grading::rules::RuleFn;
use crate::grading::{MessageCatalog, RuleContext, RuleResult, RuleSet};
use crate::workbook::{CellValue, Field, SheetKind, Workbook};

/// Mission table columns, leg 1 through leg 9.
const LEG_COLUMNS: [&str; 9] = ["K", "L", "M", "N", "P", "R", "S", "V", "W"];

pub(super) const CUTOUT: &str =
    "Automated checks only. Report, drawings and presentation are graded separately.";

/// Writes altitude, Mach, AB, distance and time for one mission leg.
pub(super) fn set_leg(
    workbook: &mut Workbook,
    leg: usize,
    altitude: f64,
    mach: f64,
    afterburner: f64,
    distance: f64,
    time: f64,
) {
    let col = LEG_COLUMNS[leg - 1];
    for (row, value) in [
        (33, altitude),
        (35, mach),
        (36, afterburner),
        (38, distance),
        (39, time),
    ] {
        set(workbook, &format!("main!{col}{row}"), value);
    }
}

/// `sheet!A1` shorthand for fixture edits.
pub(super) fn set(workbook: &mut Workbook, address: &str, value: impl Into<CellValue>) {
    workbook.set(field(address), value);
}

pub(super) fn clear(workbook: &mut Workbook, address: &str) {
    workbook.set(field(address), CellValue::Empty);
}

fn field(address: &str) -> Field {
    let (sheet, cell) = address.split_once('!').expect("sheet!cell address");
    Field {
        sheet: SheetKind::from_name(sheet).expect("known sheet"),
        cell: cell.parse().expect("valid A1 reference"),
    }
}

/// Constraint table row: beta, altitude, Mach, n, AB, Ps (or field length), CDx.
fn set_constraint_row(workbook: &mut Workbook, row: u32, values: [Option<f64>; 7]) {
    for (col, value) in ["S", "T", "U", "V", "W", "X", "Y"].iter().zip(values) {
        if let Some(value) = value {
            set(workbook, &format!("main!{col}{row}"), value);
        }
    }
}

/// A submission that passes every rule module without feedback.
pub(super) fn compliant_workbook() -> Workbook {
    let mut wb = Workbook::new(None);

    // Mission profile.
    set_leg(&mut wb, 1, 0.0, 0.3, 100.0, 2000.0, 1.0);
    set_leg(&mut wb, 2, 20_000.0, 0.6, 0.0, 20.0, 2.0);
    set_leg(&mut wb, 3, 35_000.0, 0.9, 0.0, 300.0, 30.0);
    set_leg(&mut wb, 4, 35_000.0, 0.9, 0.0, 100.0, 12.0);
    set_leg(&mut wb, 5, 40_000.0, 1.6, 0.0, 150.0, 10.0);
    set_leg(&mut wb, 6, 30_000.0, 1.2, 100.0, 10.0, 2.0);
    set_leg(&mut wb, 7, 40_000.0, 1.6, 0.0, 150.0, 10.0);
    set_leg(&mut wb, 8, 35_000.0, 0.9, 0.0, 400.0, 40.0);
    set_leg(&mut wb, 9, 10_000.0, 0.4, 0.0, 0.0, 20.0);

    // Thrust margin at every station and takeoff roll.
    for col in ["C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N"] {
        set(&mut wb, &format!("miss!{col}48"), 10_000.0);
        set(&mut wb, &format!("miss!{col}49"), 15_000.0);
    }

    // Radius, payload, design point, fuel.
    set(&mut wb, "main!Y37", 380.0);
    set(&mut wb, "main!AB3", 8.0);
    set(&mut wb, "main!AB4", 0.0);
    set(&mut wb, "main!P13", 60.0);
    set(&mut wb, "main!Q13", 1.2);
    set(&mut wb, "main!O15", 20_000.0);
    set(&mut wb, "main!O17", 15_000.0);
    set(&mut wb, "main!O18", 16_000.0);
    set(&mut wb, "main!Q18", 10.0);

    // beta = 1 - 16000 / (2 * 20000) on the flight rows.
    let beta = Some(0.6);
    set_constraint_row(&mut wb, 3, [beta, Some(35_000.0), Some(2.0), None, Some(100.0), Some(0.0), Some(0.0)]);
    set_constraint_row(&mut wb, 4, [beta, Some(35_000.0), Some(1.6), None, Some(0.0), Some(0.0), Some(0.0)]);
    set_constraint_row(&mut wb, 6, [beta, Some(30_000.0), Some(1.2), Some(3.5), Some(100.0), Some(0.0), Some(0.0)]);
    set_constraint_row(&mut wb, 7, [beta, Some(10_000.0), Some(0.9), Some(4.2), Some(100.0), Some(0.0), Some(0.0)]);
    set_constraint_row(&mut wb, 8, [beta, Some(30_000.0), Some(1.15), Some(1.0), Some(100.0), Some(450.0), Some(0.0)]);
    set_constraint_row(&mut wb, 9, [beta, Some(10_000.0), Some(0.9), Some(1.0), Some(0.0), Some(450.0), Some(0.0)]);
    set_constraint_row(&mut wb, 12, [Some(1.0), Some(0.0), Some(1.2), Some(0.03), Some(100.0), Some(2800.0), Some(0.0)]);
    set_constraint_row(&mut wb, 13, [Some(1.0), Some(0.0), Some(1.3), Some(0.5), Some(0.0), Some(4000.0), Some(0.0)]);

    // Constraint curves: W/S axis 20..=220 and a flat required T/W of 0.5.
    for (idx, col) in (11..=31).enumerate() {
        let ws = 20.0 + 10.0 * idx as f64;
        wb.set(Field::at(SheetKind::Consts, 22, col), ws);
        for row in [23, 24, 26, 27, 28, 29, 32] {
            wb.set(Field::at(SheetKind::Consts, row, col), 0.5);
        }
    }
    set(&mut wb, "consts!L33", 100.0);

    // Component table: wing B, PCS C, strake D, canard E, engine F, VT H.
    for (col, area, aspect_ratio) in [
        ("B", 500.0, 3.5),
        ("C", 100.0, 2.5),
        ("D", 0.0, 0.0),
        ("E", 0.0, 0.0),
        ("H", 60.0, 1.5),
    ] {
        set(&mut wb, &format!("main!{col}18"), area);
        set(&mut wb, &format!("main!{col}19"), aspect_ratio);
    }
    set(&mut wb, "main!B23", 20.0);
    set(&mut wb, "main!C23", 42.0);
    set(&mut wb, "main!F23", 30.0);
    set(&mut wb, "main!H23", 40.0);
    set(&mut wb, "main!H24", 2.0);
    set(&mut wb, "main!C25", 0.0);
    set(&mut wb, "main!F25", 0.0);
    set(&mut wb, "main!F28", 15.0);
    set(&mut wb, "main!F29", 3.5);
    set(&mut wb, "main!B32", 50.0);
    set(&mut wb, "main!D52", 0.0);
    set(&mut wb, "main!E52", 6.0);
    set(&mut wb, "main!F52", 6.0);

    // Planforms: wing LE at 45 deg and TE at 90 deg; tails match.
    for (row, root, tip, root_x, root_y, tip_x, tip_y) in [
        (7, 20.0, 5.0, 15.0, 2.0, 30.0, 17.0),
        (8, 8.0, 3.0, 42.0, 2.0, 47.0, 7.0),
        (10, 8.0, 3.0, 40.0, 2.0, 45.0, 7.0),
    ] {
        for (col, value) in [
            ("C", root),
            ("D", tip),
            ("E", root_x),
            ("F", root_y),
            ("G", tip_x),
            ("H", tip_y),
        ] {
            set(&mut wb, &format!("geom!{col}{row}"), value);
        }
    }

    // Stability, cost.
    set(&mut wb, "main!M10", 0.05);
    set(&mut wb, "main!O10", -0.002);
    set(&mut wb, "main!P10", 0.003);
    set(&mut wb, "main!Q10", -0.6);
    set(&mut wb, "main!Q31", 105.0);

    set(&mut wb, "aero!C5", 1.4);
    set(&mut wb, "aero!C6", 0.8);
    set(&mut wb, "aero!C7", 0.015);

    set(&mut wb, "gear!J19", 15.0);
    set(&mut wb, "gear!L19", 10.0);
    set(&mut wb, "gear!L20", 15.0);
    set(&mut wb, "gear!M19", 50.0);
    set(&mut wb, "gear!M20", 63.0);
    set(&mut wb, "gear!N19", 150.0);

    wb
}

/// Runs one rule module with the standard rules and English catalog.
pub(super) fn run_module(run: RuleFn, workbook: &Workbook) -> RuleResult {
    run_with(run, workbook, &RuleSet::standard())
}

pub(super) fn run_with(run: RuleFn, workbook: &Workbook, rules: &RuleSet) -> RuleResult {
    let messages = MessageCatalog::english();
    run(&RuleContext {
        workbook,
        rules,
        messages: &messages,
    })
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1 << 20)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
