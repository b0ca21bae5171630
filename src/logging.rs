use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "portfolio_valuation=info";

/// Logs go to stderr; stdout carries the JSON reports.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
