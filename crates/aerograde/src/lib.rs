//! Rule engine that grades aircraft design workbooks and renders the
//! feedback log returned to design teams.

pub mod baseline;
pub mod config;
pub mod error;
pub mod format;
pub mod grading;
pub mod pchip;
pub mod telemetry;
pub mod workbook;
