use job_board::config::StoreConfig;
use job_board::latency::SimulatedLatency;
use job_board::store::{FileBackend, MemoryBackend, StoreBackend};
use job_board::JobBoard;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

pub(crate) type SharedBackend = Box<dyn StoreBackend>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// File-backed when a data directory is configured, otherwise process-local.
pub(crate) fn open_backend(config: &StoreConfig) -> SharedBackend {
    match &config.data_dir {
        Some(dir) => {
            info!(data_dir = %dir.display(), "using file-backed store");
            Box::new(FileBackend::new(dir.clone()))
        }
        None => {
            info!("using in-memory store; data is lost on exit");
            Box::new(MemoryBackend::new())
        }
    }
}

pub(crate) fn build_board(
    config: &StoreConfig,
    latency: SimulatedLatency,
) -> JobBoard<SharedBackend> {
    JobBoard::new(open_backend(config), latency)
}
