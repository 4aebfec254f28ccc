//! In-memory workbook model and the numeric cell accessor the rule modules read through.

mod address;
mod loader;

pub use address::{AddressError, CellRef, Field};
pub use loader::{WorkbookError, WorkbookLoader};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Sheets of a design submission the grader knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SheetKind {
    Main,
    Geom,
    Miss,
    Consts,
    Gear,
    Aero,
}

impl SheetKind {
    pub const ALL: [SheetKind; 6] = [
        SheetKind::Main,
        SheetKind::Geom,
        SheetKind::Miss,
        SheetKind::Consts,
        SheetKind::Gear,
        SheetKind::Aero,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SheetKind::Main => "main",
            SheetKind::Geom => "geom",
            SheetKind::Miss => "miss",
            SheetKind::Consts => "consts",
            SheetKind::Gear => "gear",
            SheetKind::Aero => "aero",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let lowered = name.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|kind| kind.name() == lowered)
    }
}

impl fmt::Display for SheetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One scalar cell. Serialized untagged so JSON workbooks read as plain arrays.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    #[default]
    Empty,
}

const ERROR_MARKERS: [&str; 7] = [
    "#DIV/0!", "#VALUE!", "#REF!", "#NAME?", "#NUM!", "#NULL!", "#N/A",
];

impl CellValue {
    /// Classifies raw text the way a spreadsheet export presents it.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return CellValue::Empty;
        }
        match parse_numeric(trimmed) {
            Some(number) => CellValue::Number(number),
            None => CellValue::Text(trimmed.to_string()),
        }
    }

    /// Numeric view of the cell; `None` means absent (empty or non-numeric).
    ///
    /// Non-finite numbers come back as `Some`, so callers can tell a present
    /// but invalid value apart from a missing one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(number) => Some(*number),
            CellValue::Text(text) => parse_numeric(text.trim()),
            CellValue::Empty => None,
        }
    }

    /// True for Excel error markers such as `#DIV/0!`.
    pub fn is_error_marker(&self) -> bool {
        match self {
            CellValue::Text(text) => {
                let trimmed = text.trim();
                ERROR_MARKERS
                    .iter()
                    .any(|marker| marker.eq_ignore_ascii_case(trimmed))
            }
            _ => false,
        }
    }

    pub fn is_non_finite_number(&self) -> bool {
        matches!(self, CellValue::Number(number) if !number.is_finite())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

fn parse_numeric(text: &str) -> Option<f64> {
    // Rejects the "inf"/"nan" spellings f64::from_str would otherwise accept.
    let numeric_chars = text
        .chars()
        .all(|ch| ch.is_ascii_digit() || matches!(ch, '+' | '-' | '.' | 'e' | 'E'));
    if text.is_empty() || !numeric_chars {
        return None;
    }
    text.parse::<f64>().ok()
}

/// A grid of rows, each an ordered run of cells. Rows may be ragged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sheet {
    rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<Vec<CellValue>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn get(&self, cell: CellRef) -> Option<&CellValue> {
        let (row, col) = cell.zero_based()?;
        self.rows.get(row)?.get(col)
    }

    pub fn number(&self, cell: CellRef) -> Option<f64> {
        self.get(cell).and_then(CellValue::as_number)
    }

    pub fn set(&mut self, cell: CellRef, value: impl Into<CellValue>) {
        let Some((row, col)) = cell.zero_based() else {
            return;
        };
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.rows[row];
        if cells.len() <= col {
            cells.resize(col + 1, CellValue::Empty);
        }
        cells[col] = value.into();
    }

    /// Every populated coordinate in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (CellRef, &CellValue)> {
        self.rows.iter().enumerate().flat_map(|(row_idx, row)| {
            row.iter()
                .enumerate()
                .map(move |(col_idx, value)| (CellRef::from_zero_based(row_idx, col_idx), value))
        })
    }
}

/// A design submission: named sheets plus an optional display name.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Workbook {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    sheets: BTreeMap<SheetKind, Sheet>,
}

impl Workbook {
    pub fn new(name: Option<String>) -> Self {
        Self {
            name,
            sheets: BTreeMap::new(),
        }
    }

    pub fn with_sheet(mut self, kind: SheetKind, sheet: Sheet) -> Self {
        self.sheets.insert(kind, sheet);
        self
    }

    pub fn insert_sheet(&mut self, kind: SheetKind, sheet: Sheet) {
        self.sheets.insert(kind, sheet);
    }

    pub fn sheet(&self, kind: SheetKind) -> Option<&Sheet> {
        self.sheets.get(&kind)
    }

    pub fn sheet_mut(&mut self, kind: SheetKind) -> &mut Sheet {
        self.sheets.entry(kind).or_default()
    }

    pub fn value(&self, field: Field) -> Option<&CellValue> {
        self.sheet(field.sheet)?.get(field.cell)
    }

    /// Numeric read through a named field; missing sheets read as absent.
    pub fn number(&self, field: Field) -> Option<f64> {
        self.sheet(field.sheet)?.number(field.cell)
    }

    pub fn set(&mut self, field: Field, value: impl Into<CellValue>) {
        self.sheet_mut(field.sheet).set(field.cell, value);
    }
}
