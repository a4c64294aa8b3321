use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Install the fmt subscriber used by both binaries. `RUST_LOG` overrides the
/// default `info` filter.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
