use crate::cli::ServeArgs;
use crate::infra::{load_engine, AppState};
use crate::routes::with_recruit_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use recruit_finder::config::AppConfig;
use recruit_finder::error::AppError;
use recruit_finder::telemetry;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let engine = load_engine(&config.engine, None)?;
    let warmed = Arc::clone(&engine);
    let recommended = tokio::task::spawn_blocking(move || warmed.recommendations().len())
        .await
        .map_err(std::io::Error::other)?;

    let app = with_recruit_routes(engine)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, recommended, "recruit tag service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
