//! Logging setup for the portfolio service.
//!
//! # Purpose
//! Installs a `tracing` subscriber with an `EnvFilter` (`RUST_LOG`, default
//! `info`) and the `fmt` layer.
//!
//! # Notes
//! Initialization is guarded by `OnceLock` to keep startup idempotent in tests.
use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

static OBS_INIT: OnceLock<()> = OnceLock::new();

pub fn init_observability(service_name: &str) {
    OBS_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer();
        // A subscriber installed elsewhere (e.g. by a test harness) wins.
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init();
    });
    tracing::debug!(service = service_name, "observability initialized");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_observability_is_idempotent() {
        init_observability("portfolio-api-test");
        init_observability("portfolio-api-test");
        assert!(OBS_INIT.get().is_some());
    }
}
