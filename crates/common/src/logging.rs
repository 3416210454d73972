use tracing_subscriber::{fmt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Installs the global subscriber for the named service. RUST_LOG wins
/// over the configured `observability.log_level`; repeat calls are
/// no-ops so test binaries can initialize freely.
pub fn init_logging(service: &str, observability: &ObservabilityConfig) {
    if tracing::dispatcher::has_been_set() {
        return;
    }

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&observability.log_level));

    fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(service, "logging initialized");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeat_initialization_is_a_no_op() {
        let observability = ObservabilityConfig::default();
        init_logging("progression-api", &observability);
        init_logging("progression-api", &observability);
    }
}
