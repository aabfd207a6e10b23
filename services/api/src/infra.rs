use metrics_exporter_prometheus::PrometheusHandle;
use recruit_finder::config::EngineConfig;
use recruit_finder::error::AppError;
use recruit_finder::recruit::{RecruitEngine, Roster};
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::warn;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Loads the roster (optionally from an overriding path) and wraps it in an engine.
pub(crate) fn load_engine(
    config: &EngineConfig,
    roster_override: Option<PathBuf>,
) -> Result<Arc<RecruitEngine>, AppError> {
    let path = roster_override.unwrap_or_else(|| config.roster_path.clone());
    let roster = Roster::from_path(&path)?;

    let skipped = roster.issues().iter().filter(|issue| issue.is_fatal()).count();
    if skipped > 0 {
        warn!(skipped, path = %path.display(), "roster records skipped");
    }

    Ok(Arc::new(RecruitEngine::new(roster, config)))
}
