use announcement_service::config::AnnouncementConfig;
use announcement_service::startup::Application;
use service_core::observability::{init_metrics, init_tracing};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let otlp_endpoint = std::env::var("OTLP_ENDPOINT").ok();
    init_tracing("announcement-service", &log_level, otlp_endpoint.as_deref());

    init_metrics().map_err(|e| {
        tracing::error!("Failed to initialize metrics: {}", e);
        std::io::Error::other(format!("Metrics error: {}", e))
    })?;

    let config = AnnouncementConfig::load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to start announcement-service: {}", e);
        std::io::Error::other(format!("Startup error: {}", e))
    })?;

    app.run_until_stopped().await
}
