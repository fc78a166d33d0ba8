use metrics_exporter_prometheus::PrometheusHandle;
use oas_estimator::config::EstimatorConfig;
use oas_estimator::error::AppError;
use oas_estimator::intake::{
    EstimationRequest, EstimationService, Language, ReferenceEvaluator, Translations,
};
use std::fs;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::debug;

pub(crate) type Estimator = EstimationService<ReferenceEvaluator>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Loads both translation tables and pins the validation year from config.
pub(crate) fn estimation_service(config: &EstimatorConfig) -> Result<Arc<Estimator>, AppError> {
    let translations = Translations::load(&config.translations_dir)?;
    let schema = config.schema();
    debug!(
        year = schema.year(),
        translations = %config.translations_dir.display(),
        "estimation service configured"
    );

    Ok(Arc::new(EstimationService::new(
        Arc::new(ReferenceEvaluator::default()),
        Arc::new(translations),
        schema,
    )))
}

pub(crate) fn parse_language(raw: &str) -> Result<Language, String> {
    raw.parse()
        .map_err(|_| format!("unsupported language '{raw}' (expected en or fr)"))
}

/// Reads a JSON object of answers keyed by field name.
pub(crate) fn read_answers(path: &Path) -> Result<EstimationRequest, AppError> {
    let raw = fs::read_to_string(path)?;
    let body: serde_json::Value = serde_json::from_str(&raw)?;
    Ok(EstimationRequest::from_json(&body)?)
}
