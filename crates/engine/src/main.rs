use std::path::PathBuf;
use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusBuilder;

use safeguard_engine::config;
use safeguard_engine::routes::{self, AppState};
use safeguard_engine::scoring::{patterns, RiskScorer};
use safeguard_engine::SignalDetectionLedger;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Safeguard engine starting");

    // Load configuration — fail loudly on misconfiguration.
    let config_dir = std::env::var("SAFEGUARD_CONFIG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config"));

    let engine_config = match config::load_config(&config_dir) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load configuration — refusing to start");
            std::process::exit(1);
        }
    };

    let broken = patterns::broken_families();
    if !broken.is_empty() {
        tracing::error!(
            families = ?broken,
            "Contextual patterns failed to compile — refusing to start"
        );
        std::process::exit(1);
    }

    // Install Prometheus metrics recorder.
    let metrics_handle = PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus metrics recorder");

    let scorer = RiskScorer::new(engine_config.system.scoring.clone());
    let ledger = Arc::new(SignalDetectionLedger::new(
        engine_config.system.ledger.clone(),
        engine_config.system.export.clone(),
    ));

    tracing::info!(
        lexicon_version = scorer.lexicon_version(),
        threshold = ledger.current_threshold(),
        "Safety core initialized"
    );

    let state = Arc::new(AppState {
        scorer,
        ledger,
        metrics_handle,
    });

    let app = routes::router(state);

    let port: u16 = std::env::var("SAFEGUARD_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .expect("Failed to bind TCP listener");

    tracing::info!(port = port, "Safeguard engine listening");

    axum::serve(listener, app).await.expect("HTTP server error");
}
