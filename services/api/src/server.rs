use crate::cli::ServeArgs;
use crate::infra::{load_policy, AppState};
use crate::routes::with_qualification_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

use prospect_ai::config::AppConfig;
use prospect_ai::error::AppError;
use prospect_ai::telemetry;
use prospect_ai::workflows::qualification::{QualificationService, ScoreDrivenReasoner};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(config.environment, &config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let policy = load_policy(config.policy_path.as_deref())?;
    let service = Arc::new(QualificationService::new(
        policy,
        Arc::new(ScoreDrivenReasoner),
    )?);

    let app = with_qualification_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "qualification engine ready");

    axum::serve(listener, app).await?;
    Ok(())
}
