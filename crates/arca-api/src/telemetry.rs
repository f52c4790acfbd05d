//! Tracing initialization.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing with an env-filtered fmt subscriber.
///
/// Safe to call more than once (later calls are no-ops), so tests can share
/// it with the binary.
pub fn init_telemetry() {
    let _ = tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "arca=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

pub async fn shutdown_telemetry() {
    tracing::debug!("Telemetry shutdown");
}
