use crate::error::AppError;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Installs the Prometheus recorder. Calling it again is a no-op.
pub fn init_metrics() -> Result<(), AppError> {
    if METRICS_HANDLE.get().is_some() {
        return Ok(());
    }

    let handle = PrometheusBuilder::new().install_recorder().map_err(|e| {
        AppError::InternalError(anyhow::anyhow!(
            "Failed to install Prometheus recorder: {}",
            e
        ))
    })?;

    // Lost races leave the first handle in place.
    let _ = METRICS_HANDLE.set(handle);
    Ok(())
}

/// Metrics in Prometheus text exposition format.
pub fn render_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string())
}

