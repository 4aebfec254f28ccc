//! Regression comparison of grading logs against reference logs.
//!
//! Reference logs come from the legacy grader and carry a few artefacts
//! (mis-decoded comparison signs, header lines naming the file) that are
//! normalized away before the line-by-line alignment.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// `≥` and `≤` read as UTF-8 bytes through a Windows-1252 decoder.
const MISDECODED_GE: &str = "\u{e2}\u{2030}\u{a5}";
const MISDECODED_LE: &str = "\u{e2}\u{2030}\u{a4}";
const HEADER_PREFIXES: [&str; 2] = ["ge 3_", "ge 5_"];
const MAX_LOOKAHEAD: usize = 10;

#[derive(Debug, thiserror::Error)]
pub enum BaselineError {
    #[error("failed to read baselines {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid baseline JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no baseline recorded for {0}")]
    Missing(String),
}

/// Reference log for one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaselineEntry {
    pub file: String,
    pub log_lines: Vec<String>,
}

/// Reference logs keyed by submission file name.
#[derive(Debug, Clone, Default)]
pub struct Baselines {
    entries: HashMap<String, BaselineEntry>,
}

impl Baselines {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, BaselineError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| BaselineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, BaselineError> {
        let entries: Vec<BaselineEntry> = serde_json::from_str(raw)?;
        debug!(count = entries.len(), "loaded baseline logs");
        Ok(Self::from_entries(entries))
    }

    /// Later entries replace earlier ones with the same file name.
    pub fn from_entries(entries: impl IntoIterator<Item = BaselineEntry>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|entry| (entry.file.clone(), entry))
                .collect(),
        }
    }

    pub fn get(&self, file: &str) -> Option<&BaselineEntry> {
        self.entries.get(file)
    }

    /// Exact match first, then a case-insensitive match on the file stem, so
    /// a `team-07` directory finds the `team-07.xlsm` entry.
    pub fn find(&self, name: &str) -> Result<&BaselineEntry, BaselineError> {
        if let Some(entry) = self.entries.get(name) {
            return Ok(entry);
        }
        let wanted = name.to_ascii_lowercase();
        let mut candidates: Vec<&BaselineEntry> = self
            .entries
            .values()
            .filter(|entry| file_stem(&entry.file).to_ascii_lowercase() == wanted)
            .collect();
        candidates.sort_by(|a, b| a.file.cmp(&b.file));
        candidates
            .into_iter()
            .next()
            .ok_or_else(|| BaselineError::Missing(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn file_stem(file: &str) -> &str {
    file.rsplit_once('.').map_or(file, |(stem, _)| stem)
}

/// One aligned pair of lines; `index` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffRow {
    pub index: usize,
    pub expected: String,
    pub actual: String,
    pub matched: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comparison {
    pub rows: Vec<DiffRow>,
    pub mismatches: usize,
}

impl Comparison {
    pub fn is_match(&self) -> bool {
        self.mismatches == 0
    }
}

pub fn normalize_line(line: &str) -> String {
    line.replace(MISDECODED_GE, "≥")
        .replace(MISDECODED_LE, "≤")
        .replace('\r', "")
        .trim_end()
        .to_string()
}

/// Normalizes every line and drops blank lines and header lines: those ending
/// in `.xlsm`, naming `file_name`, or starting with a section prefix.
pub fn normalize_log<S: AsRef<str>>(lines: &[S], file_name: &str) -> Vec<String> {
    let file_name = file_name.to_lowercase();
    lines
        .iter()
        .map(|line| normalize_line(line.as_ref()))
        .filter(|line| {
            if line.is_empty() {
                return false;
            }
            let lower = line.to_lowercase();
            if lower.ends_with(".xlsm") {
                return false;
            }
            if !file_name.is_empty() && lower.contains(&file_name) {
                return false;
            }
            !HEADER_PREFIXES.iter().any(|prefix| lower.starts_with(prefix))
        })
        .collect()
}

/// Aligns `actual` against `expected`.
///
/// On a mismatch the next [`MAX_LOOKAHEAD`] actual lines are searched for the
/// expected line; if found, the skipped actual lines are recorded as
/// mismatches and alignment resumes there. Otherwise both sides advance.
pub fn compare_logs<E, A>(expected: &[E], actual: &[A], file_name: &str) -> Comparison
where
    E: AsRef<str>,
    A: AsRef<str>,
{
    let exp = normalize_log(expected, "");
    let act = normalize_log(actual, file_name);

    let mut rows = Vec::new();
    let mut mismatches = 0;
    let (mut i_exp, mut i_act) = (0, 0);
    let line = |lines: &[String], idx: usize| lines.get(idx).cloned().unwrap_or_default();

    while i_exp < exp.len() || i_act < act.len() {
        let expected_line = line(&exp, i_exp);
        let actual_line = line(&act, i_act);

        if expected_line == actual_line {
            rows.push(DiffRow {
                index: rows.len() + 1,
                expected: expected_line,
                actual: actual_line,
                matched: true,
            });
            i_exp += 1;
            i_act += 1;
            continue;
        }

        let realign = (1..=MAX_LOOKAHEAD)
            .take_while(|offset| i_act + offset < act.len())
            .find(|offset| act[i_act + offset] == expected_line);

        match realign {
            Some(offset) => {
                for skipped in &act[i_act..i_act + offset] {
                    rows.push(DiffRow {
                        index: rows.len() + 1,
                        expected: expected_line.clone(),
                        actual: skipped.clone(),
                        matched: false,
                    });
                    mismatches += 1;
                }
                i_act += offset;
            }
            None => {
                rows.push(DiffRow {
                    index: rows.len() + 1,
                    expected: expected_line,
                    actual: actual_line,
                    matched: false,
                });
                mismatches += 1;
                i_exp += 1;
                i_act += 1;
            }
        }
    }

    Comparison { rows, mismatches }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_repairs_signs_and_drops_headers() {
        let raw = [
            "Team 7 Design.xlsm",
            "GE 3_Team7 results",
            "Leg 3: Must be \u{e2}\u{2030}\u{a5}35,000 ft  \r",
            "",
            "   ",
            "team7_final notes",
            "Total score: 9/10",
        ];
        let cleaned = normalize_log(&raw, "Team7_Final");
        assert_eq!(
            cleaned,
            vec!["Leg 3: Must be ≥35,000 ft", "Total score: 9/10"]
        );
    }

    #[test]
    fn identical_logs_match() {
        let lines = ["a", "b", "c"];
        let comparison = compare_logs(&lines, &lines, "");
        assert!(comparison.is_match());
        assert_eq!(comparison.rows.len(), 3);
        assert!(comparison.rows.iter().all(|row| row.matched));
    }

    #[test]
    fn extra_actual_lines_are_skipped_by_lookahead() {
        let expected = ["a", "b", "c"];
        let actual = ["a", "x", "y", "b", "c"];

        let comparison = compare_logs(&expected, &actual, "");

        assert_eq!(comparison.mismatches, 2);
        let summary: Vec<(&str, &str, bool)> = comparison
            .rows
            .iter()
            .map(|row| (row.expected.as_str(), row.actual.as_str(), row.matched))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("a", "a", true),
                ("b", "x", false),
                ("b", "y", false),
                ("b", "b", true),
                ("c", "c", true),
            ]
        );
        assert_eq!(comparison.rows[4].index, 5);
    }

    #[test]
    fn lookahead_is_bounded() {
        let expected = ["target"];
        let mut actual: Vec<String> = (0..11).map(|i| format!("noise {i}")).collect();
        actual.push("target".to_string());

        let comparison = compare_logs(&expected, &actual, "");

        assert_eq!(comparison.rows[0].expected, "target");
        assert_eq!(comparison.rows[0].actual, "noise 0");
        assert_eq!(comparison.mismatches, 12);
    }

    #[test]
    fn missing_actual_lines_compare_against_empty() {
        let comparison = compare_logs(&["a", "b"], &["a"], "");
        assert_eq!(comparison.mismatches, 1);
        assert_eq!(comparison.rows[1].actual, "");
    }

    #[test]
    fn loads_entries_and_matches_by_stem() {
        let baselines = Baselines::from_json(
            r#"[{ "file": "Team-07.xlsm", "logLines": ["Total score: 8/10"] }]"#,
        )
        .expect("baselines parse");

        assert_eq!(baselines.len(), 1);
        assert!(baselines.get("Team-07.xlsm").is_some());
        let entry = baselines.find("team-07").expect("stem lookup");
        assert_eq!(entry.log_lines, vec!["Total score: 8/10"]);
        assert!(matches!(
            baselines.find("team-08"),
            Err(BaselineError::Missing(name)) if name == "team-08"
        ));
    }
}
