//! # riskform-api: Binary Entry Point
//!
//! Starts the Axum HTTP server for the risk assessment form.
//! Binds to a configurable port (default 8080).

use anyhow::Context;
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing_subscriber::EnvFilter;

use riskform_api::state::{AppConfig, AppState, LogFormat};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing(LogFormat::from_env());

    let config = AppConfig::from_env().context("reading configuration")?;
    if config.access_secret.is_none() {
        tracing::warn!("ACCESS_SECRET is not set: sessions start unlocked");
    }
    tracing::info!(
        max_sessions = config.max_sessions,
        idle_secs = config.session_idle_timeout.as_secs(),
        "session limits"
    );
    let port = config.port;

    let metrics = PrometheusBuilder::new()
        .install_recorder()
        .context("installing Prometheus recorder")?;

    let state = AppState::with_config(config).with_metrics(metrics);
    let app = riskform_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("riskform API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    axum::serve(listener, app).await.context("serving HTTP")?;

    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}
