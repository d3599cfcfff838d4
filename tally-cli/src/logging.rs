use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_FILTER: &str = "tally=info";

/// Install the global subscriber. RUST_LOG wins over the configured filter;
/// logs go to stderr so stdout stays clean for results.
pub fn init_tracing(configured: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(configured))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
