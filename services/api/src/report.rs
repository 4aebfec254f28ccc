use crate::infra::{build_grader, init_cli, with_overrides};
use aerograde::baseline::{compare_logs, Baselines, Comparison};
use aerograde::error::AppError;
use aerograde::grading::GradingResult;
use aerograde::workbook::WorkbookLoader;
use chrono::Utc;
use clap::Args;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct GradeArgs {
    /// Workbook directory of `<sheet>.csv` files, or a `.json` workbook
    pub(crate) workbook: PathBuf,
    /// Rule set override (JSON)
    #[arg(long)]
    pub(crate) rules: Option<PathBuf>,
    /// Message catalog override (JSON)
    #[arg(long)]
    pub(crate) messages: Option<PathBuf>,
    /// Print the timestamped JSON report instead of the feedback log
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct CompareArgs {
    /// Workbook directory of `<sheet>.csv` files, or a `.json` workbook
    pub(crate) workbook: PathBuf,
    /// Baseline log file; defaults to APP_BASELINES_PATH
    #[arg(long)]
    pub(crate) baselines: Option<PathBuf>,
    /// Baseline entry to compare against; defaults to the workbook name
    #[arg(long)]
    pub(crate) name: Option<String>,
    /// Rule set override (JSON)
    #[arg(long)]
    pub(crate) rules: Option<PathBuf>,
    /// Message catalog override (JSON)
    #[arg(long)]
    pub(crate) messages: Option<PathBuf>,
}

pub(crate) fn run_grade(args: GradeArgs) -> Result<ExitCode, AppError> {
    let GradeArgs {
        workbook,
        rules,
        messages,
        json,
    } = args;

    let config = init_cli()?;
    let grader = build_grader(&with_overrides(config.grading, rules, messages))?;
    let workbook = WorkbookLoader::from_path(&workbook)?;
    let result = grader.grade(&workbook);

    if json {
        let report = result.report(workbook.name.as_deref(), Utc::now());
        let rendered = serde_json::to_string_pretty(&report).map_err(std::io::Error::from)?;
        println!("{rendered}");
    } else {
        println!("{}", result.feedback_log);
    }

    Ok(ExitCode::SUCCESS)
}

pub(crate) fn run_compare(args: CompareArgs) -> Result<ExitCode, AppError> {
    let CompareArgs {
        workbook,
        baselines,
        name,
        rules,
        messages,
    } = args;

    let config = init_cli()?;
    let baselines_path = baselines
        .or_else(|| config.grading.baselines_path.clone())
        .ok_or_else(|| {
            AppError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no baselines file given (use --baselines or APP_BASELINES_PATH)",
            ))
        })?;
    let grader = build_grader(&with_overrides(config.grading, rules, messages))?;
    let baselines = Baselines::from_path(&baselines_path)?;

    let name = name.unwrap_or_else(|| workbook_stem(&workbook));
    let entry = baselines.find(&name)?;
    let workbook = WorkbookLoader::from_path(&workbook)?;
    let result = grader.grade(&workbook);

    let comparison = compare_result(&entry.log_lines, &result, &name);
    info!(
        baseline = %entry.file,
        rows = comparison.rows.len(),
        mismatches = comparison.mismatches,
        "compared against baseline"
    );
    print!("{}", render_comparison(&entry.file, &comparison));

    Ok(if comparison.is_match() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn workbook_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

pub(crate) fn compare_result(
    expected: &[String],
    result: &GradingResult,
    file_name: &str,
) -> Comparison {
    let actual: Vec<&str> = result.lines().collect();
    compare_logs(expected, &actual, file_name)
}

/// Mismatched rows followed by a one-line verdict.
pub(crate) fn render_comparison(file: &str, comparison: &Comparison) -> String {
    let mut output = String::new();
    for row in comparison.rows.iter().filter(|row| !row.matched) {
        output.push_str(&format!("#{} expected: {}\n", row.index, row.expected));
        output.push_str(&format!("#{}   actual: {}\n", row.index, row.actual));
    }
    if comparison.is_match() {
        output.push_str(&format!(
            "{file}: PASS ({} lines match)\n",
            comparison.rows.len()
        ));
    } else {
        output.push_str(&format!(
            "{file}: FAIL ({} of {} lines differ)\n",
            comparison.mismatches,
            comparison.rows.len()
        ));
    }
    output
}
