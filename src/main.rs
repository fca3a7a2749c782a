mod adapters;
mod application;
mod config;
mod domain;
mod interface;
mod ports;

use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use adapters::{JsonConfigStore, LogDisplay, MemoryReportStore, SoundNotifier, SystemPing, WebhookNotifier};
use application::{MonitorScheduler, SettingsService};
use config::Config;
use interface::http::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("pingmon={},tower_http=info", config.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting pingmon v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: {:?}", config);

    // Settings
    let store = Arc::new(JsonConfigStore::new(config.settings_path.clone()));
    let settings = Arc::new(SettingsService::new(store));

    // Sinks
    let reports = Arc::new(MemoryReportStore::new(config.history_size));
    let mut scheduler = MonitorScheduler::new(Arc::new(SystemPing::new()))
        .with_probe_timeout(config.probe_timeout())
        .with_display(Arc::new(LogDisplay::new()))
        .with_display(reports.clone())
        .with_notifier(Arc::new(SoundNotifier::new()));

    if let Some(url) = &config.webhook_url {
        match WebhookNotifier::new(url.clone()) {
            Ok(notifier) => {
                info!("Webhook alerts enabled");
                scheduler = scheduler.with_notifier(Arc::new(notifier));
            }
            Err(e) => warn!("Failed to set up webhook alerts: {}. Continuing without them.", e),
        }
    }

    let monitor = Arc::new(scheduler.start(settings.subscribe())?);
    info!("Monitor running");

    if config.http_enabled {
        let app = create_router(AppState {
            settings,
            reports,
            monitor: monitor.clone(),
        });
        let addr = format!("0.0.0.0:{}", config.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;

        info!("Listening on {}", addr);
        info!("  -> Status: http://localhost:{}/api/status", config.port);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
    } else {
        shutdown_signal().await;
    }

    monitor.shutdown().await;
    info!("Shutdown complete");

    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C signal"),
        _ = terminate => info!("Received terminate signal"),
    }
}
