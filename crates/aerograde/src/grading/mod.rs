//! Rule evaluation: the grading orchestrator and the rule modules it sequences.

mod config;
mod messages;
pub mod router;
mod rules;

#[cfg(test)]
mod tests;

pub use config::{
    AeroRules, AttachmentRules, ConstraintRules, ConstraintSpec, CostRules, DistanceKind,
    DistanceLimit, DragIndexTarget, FuelRules, GearRules, MissionRules, RuleSet, RuleSetError,
    StabilityRules, Target, WeightFractionTarget,
};
pub use messages::{
    AeroMessages, AttachmentMessages, CatalogError, ConstraintMessages, CostMessages,
    FuelMessages, GearMessages, MessageCatalog, MissionMessages, StabilityMessages,
    SummaryMessages, ThrustMessages,
};
pub use router::grading_router;

use crate::config::GradingConfig;
use crate::error::AppError;
use crate::fmt_args;
use crate::format::render;
use crate::workbook::{CellRef, Field, SheetKind, Workbook};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

pub const BASE_SCORE: i32 = 10;
pub const MAX_SCORE: i32 = 10;

/// Feedback and score change produced by one rule module.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RuleResult {
    pub delta: i32,
    pub feedback: Vec<String>,
}

impl RuleResult {
    pub(crate) fn note(&mut self, line: String) {
        self.feedback.push(line);
    }

    pub(crate) fn deduct(&mut self, line: String) {
        self.feedback.push(line);
        self.delta -= 1;
    }
}

/// Read-only inputs shared by every rule module during one grading pass.
pub struct RuleContext<'a> {
    pub workbook: &'a Workbook,
    pub rules: &'a RuleSet,
    pub messages: &'a MessageCatalog,
}

impl RuleContext<'_> {
    pub fn number(&self, field: Field) -> Option<f64> {
        self.workbook.number(field)
    }
}

/// Final outcome of a grading pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradingResult {
    pub score: i32,
    pub max_score: i32,
    pub score_line: String,
    pub cutout_line: String,
    pub feedback_log: String,
}

impl GradingResult {
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.feedback_log.lines()
    }

    pub fn report(&self, workbook: Option<&str>, graded_at: DateTime<Utc>) -> GradeReport {
        GradeReport {
            graded_at,
            workbook: workbook.map(str::to_string),
            score: self.score,
            max_score: self.max_score,
            score_line: self.score_line.clone(),
            cutout_line: self.cutout_line.clone(),
            lines: self.lines().map(str::to_string).collect(),
            log: self.feedback_log.clone(),
        }
    }
}

/// Timestamped grading outcome as returned by the HTTP and CLI surfaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeReport {
    pub graded_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workbook: Option<String>,
    pub score: i32,
    pub max_score: i32,
    pub score_line: String,
    pub cutout_line: String,
    pub lines: Vec<String>,
    pub log: String,
}

/// Stateless grader applying a rule set and message catalog to workbooks.
#[derive(Debug, Clone, Default)]
pub struct Grader {
    rules: RuleSet,
    messages: MessageCatalog,
}

impl Grader {
    pub fn new(rules: RuleSet, messages: MessageCatalog) -> Self {
        Self { rules, messages }
    }

    pub fn standard() -> Self {
        Self::new(RuleSet::standard(), MessageCatalog::english())
    }

    /// Built-in rules and catalog, replaced by any override file configured.
    pub fn from_config(config: &GradingConfig) -> Result<Self, AppError> {
        let rules = match &config.rules_path {
            Some(path) => {
                info!(path = %path.display(), "loading rule set override");
                RuleSet::from_path(path)?
            }
            None => RuleSet::standard(),
        };
        let messages = match &config.messages_path {
            Some(path) => {
                info!(path = %path.display(), "loading message catalog override");
                MessageCatalog::from_path(path)?
            }
            None => MessageCatalog::english(),
        };
        Ok(Self::new(rules, messages))
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn messages(&self) -> &MessageCatalog {
        &self.messages
    }

    pub fn grade(&self, workbook: &Workbook) -> GradingResult {
        let invalid = invalid_main_cells(workbook);
        if !invalid.is_empty() {
            let refs: Vec<String> = invalid.iter().map(CellRef::to_string).collect();
            let message = render(
                &self.messages.summary.invalid_workbook,
                &fmt_args![refs.join(", ")],
            );
            warn!(
                workbook = workbook.name.as_deref().unwrap_or("<unnamed>"),
                invalid = invalid.len(),
                "workbook rejected by preflight"
            );
            return GradingResult {
                score: 0,
                max_score: MAX_SCORE,
                score_line: message.clone(),
                cutout_line: String::new(),
                feedback_log: message,
            };
        }

        let context = RuleContext {
            workbook,
            rules: &self.rules,
            messages: &self.messages,
        };

        let mut feedback: Vec<String> = Vec::new();
        if let Some(name) = &workbook.name {
            feedback.push(name.clone());
        }

        let mut score = BASE_SCORE;
        for (module, run) in rules::PIPELINE {
            let result = run(&context);
            debug!(
                module,
                delta = result.delta,
                lines = result.feedback.len(),
                "rule module evaluated"
            );
            score += result.delta;
            feedback.extend(result.feedback);
        }

        let score = score.max(0);
        let score_line = render(
            &self.messages.summary.score,
            &fmt_args![i64::from(score), i64::from(MAX_SCORE)],
        );
        let cutout_line = self.messages.summary.cutout.clone();
        feedback.push(score_line.clone());
        feedback.push(cutout_line.clone());

        info!(
            workbook = workbook.name.as_deref().unwrap_or("<unnamed>"),
            score,
            "graded workbook"
        );

        GradingResult {
            score,
            max_score: MAX_SCORE,
            score_line,
            cutout_line,
            feedback_log: feedback.join("\n"),
        }
    }
}

/// Error markers and non-finite numbers on the main sheet, row-major.
pub fn invalid_main_cells(workbook: &Workbook) -> Vec<CellRef> {
    let Some(main) = workbook.sheet(SheetKind::Main) else {
        return Vec::new();
    };
    main.cells()
        .filter(|(_, value)| value.is_error_marker() || value.is_non_finite_number())
        .map(|(cell, _)| cell)
        .collect()
}
