use super::{CellValue, Sheet, SheetKind, Workbook};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum WorkbookError {
    #[error("failed to read workbook at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid CSV data in sheet '{sheet}': {source}")]
    Csv {
        sheet: SheetKind,
        #[source]
        source: csv::Error,
    },
    #[error("invalid workbook JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("workbook at {0} does not contain a main sheet")]
    MissingMainSheet(PathBuf),
}

/// Builds a [`Workbook`] from exported sheet data.
///
/// The directory form expects one headerless `<sheet>.csv` per sheet
/// (`main.csv`, `geom.csv`, ...); sheets without a file are simply absent.
pub struct WorkbookLoader;

impl WorkbookLoader {
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Workbook, WorkbookError> {
        let dir = dir.as_ref();
        let name = dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());
        let mut workbook = Workbook::new(name);

        for kind in SheetKind::ALL {
            let path = dir.join(format!("{}.csv", kind.name()));
            if !path.is_file() {
                continue;
            }
            let file = std::fs::File::open(&path).map_err(|source| WorkbookError::Io {
                path: path.clone(),
                source,
            })?;
            let sheet = Self::sheet_from_csv(kind, file)?;
            debug!(sheet = %kind, rows = sheet.rows().len(), "loaded sheet");
            workbook.insert_sheet(kind, sheet);
        }

        if workbook.sheet(SheetKind::Main).is_none() {
            return Err(WorkbookError::MissingMainSheet(dir.to_path_buf()));
        }

        Ok(workbook)
    }

    pub fn sheet_from_csv<R: Read>(kind: SheetKind, reader: R) -> Result<Sheet, WorkbookError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut rows = Vec::new();

        for record in csv_reader.records() {
            let record = record.map_err(|source| WorkbookError::Csv { sheet: kind, source })?;
            rows.push(record.iter().map(CellValue::parse).collect());
        }

        Ok(Sheet::from_rows(rows))
    }

    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Workbook, WorkbookError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| WorkbookError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_reader(file)
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Workbook, WorkbookError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Directory of CSV sheets, or a single `.json` workbook file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Workbook, WorkbookError> {
        let path = path.as_ref();
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_path(path)
        } else {
            Self::from_dir(path)
        }
    }
}
