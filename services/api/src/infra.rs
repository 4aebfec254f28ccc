use aerograde::config::{AppConfig, GradingConfig};
use aerograde::error::AppError;
use aerograde::grading::Grader;
use aerograde::telemetry;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Loads configuration and installs logging for the one-shot commands.
pub(crate) fn init_cli() -> Result<AppConfig, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    Ok(config)
}

/// Command-line paths take precedence over the environment.
pub(crate) fn with_overrides(
    mut grading: GradingConfig,
    rules: Option<PathBuf>,
    messages: Option<PathBuf>,
) -> GradingConfig {
    if rules.is_some() {
        grading.rules_path = rules;
    }
    if messages.is_some() {
        grading.messages_path = messages;
    }
    grading
}

pub(crate) fn build_grader(grading: &GradingConfig) -> Result<Arc<Grader>, AppError> {
    Grader::from_config(grading).map(Arc::new)
}
