use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable checked before `RUST_LOG`.
pub const LOG_ENV: &str = "CCB_LOG";

/// Resolve the active filter: `CCB_LOG`, then `RUST_LOG`, then `fallback`.
pub fn log_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Human-readable logs on stderr; stdout is reserved for command output.
pub fn init_cli_logger(verbose: bool) {
    let fallback = if verbose { "ccb_api=debug,info" } else { "ccb_api=warn" };

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .without_time()
        .compact();

    tracing_subscriber::registry()
        .with(log_filter(fallback))
        .with(layer)
        .init();
}

/// One JSON object per line on stderr.
pub fn init_json_logger() {
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .json()
        .with_current_span(false);

    tracing_subscriber::registry()
        .with(log_filter("ccb_api=info"))
        .with(layer)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_filter_is_used_without_env() {
        if std::env::var_os(LOG_ENV).is_some() || std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        assert_eq!(log_filter("ccb_api=warn").to_string(), "ccb_api=warn");
    }
}
