use super::SheetKind;
use std::fmt;
use std::str::FromStr;

/// 1-based spreadsheet coordinate (`B32` is row 32, column 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellRef {
    pub row: u32,
    pub col: u32,
}

impl CellRef {
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Compile-time parser for the fixed addresses the rule schemas use.
    ///
    /// Panics (at compile time when used in a `const`) on anything other than
    /// upper-case column letters followed by a non-zero row number.
    pub const fn from_a1(a1: &str) -> Self {
        let bytes = a1.as_bytes();
        let mut idx = 0;
        let mut col: u32 = 0;
        while idx < bytes.len() && bytes[idx].is_ascii_uppercase() {
            col = col * 26 + (bytes[idx] - b'A' + 1) as u32;
            idx += 1;
        }
        let digits_start = idx;
        let mut row: u32 = 0;
        while idx < bytes.len() && bytes[idx].is_ascii_digit() {
            row = row * 10 + (bytes[idx] - b'0') as u32;
            idx += 1;
        }
        if col == 0 || row == 0 || idx == digits_start || idx != bytes.len() {
            panic!("invalid A1 cell reference");
        }
        Self { row, col }
    }

    pub(crate) fn from_zero_based(row_idx: usize, col_idx: usize) -> Self {
        Self {
            row: row_idx as u32 + 1,
            col: col_idx as u32 + 1,
        }
    }

    pub(crate) fn zero_based(self) -> Option<(usize, usize)> {
        if self.row == 0 || self.col == 0 {
            return None;
        }
        Some((self.row as usize - 1, self.col as usize - 1))
    }

    pub fn column_letters(self) -> String {
        let mut letters = Vec::new();
        let mut n = self.col;
        while n > 0 {
            let rem = (n - 1) % 26;
            letters.push((b'A' + rem as u8) as char);
            n = (n - 1) / 26;
        }
        letters.iter().rev().collect()
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column_letters(), self.row)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a valid cell reference")]
pub struct AddressError(pub String);

impl FromStr for CellRef {
    type Err = AddressError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let cleaned: String = raw
            .trim()
            .chars()
            .filter(|ch| *ch != '$')
            .map(|ch| ch.to_ascii_uppercase())
            .collect();
        let split = cleaned
            .find(|ch: char| ch.is_ascii_digit())
            .ok_or_else(|| AddressError(raw.to_string()))?;
        let (letters, digits) = cleaned.split_at(split);
        if letters.is_empty() || !letters.chars().all(|ch| ch.is_ascii_uppercase()) {
            return Err(AddressError(raw.to_string()));
        }

        let col = letters.bytes().try_fold(0u32, |acc, byte| {
            acc.checked_mul(26)
                .and_then(|value| value.checked_add((byte - b'A' + 1) as u32))
        });
        let row = digits.parse::<u32>().ok().filter(|row| *row > 0);

        match (col, row) {
            (Some(col), Some(row)) => Ok(Self { row, col }),
            _ => Err(AddressError(raw.to_string())),
        }
    }
}

/// Named location of one datum in the workbook: a sheet plus a fixed cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Field {
    pub sheet: SheetKind,
    pub cell: CellRef,
}

impl Field {
    pub const fn new(sheet: SheetKind, a1: &str) -> Self {
        Self {
            sheet,
            cell: CellRef::from_a1(a1),
        }
    }

    pub const fn main(a1: &str) -> Self {
        Self::new(SheetKind::Main, a1)
    }

    pub const fn geom(a1: &str) -> Self {
        Self::new(SheetKind::Geom, a1)
    }

    pub const fn miss(a1: &str) -> Self {
        Self::new(SheetKind::Miss, a1)
    }

    pub const fn consts(a1: &str) -> Self {
        Self::new(SheetKind::Consts, a1)
    }

    pub const fn gear(a1: &str) -> Self {
        Self::new(SheetKind::Gear, a1)
    }

    pub const fn aero(a1: &str) -> Self {
        Self::new(SheetKind::Aero, a1)
    }

    pub const fn at(sheet: SheetKind, row: u32, col: u32) -> Self {
        Self {
            sheet,
            cell: CellRef::new(row, col),
        }
    }
}
