use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use prospect_ai::workflows::qualification::{QualificationError, QualificationPolicy};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Resolves the active qualification policy: the JSON file when a path is
/// configured, the built-in defaults otherwise.
pub(crate) fn load_policy(path: Option<&Path>) -> Result<QualificationPolicy, QualificationError> {
    match path {
        Some(path) => Ok(QualificationPolicy::from_json_file(path)?),
        None => Ok(QualificationPolicy::default()),
    }
}
