use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter directive: the app at `level`, noisy dependencies at `warn`.
pub(crate) fn default_directive(level: &str) -> String {
    format!(
        "campusbyte={level},campusbyte_db={level},tower_http=warn,hyper=warn,tonic=warn,h2=warn,sqlx=warn"
    )
}

/// Console-only logging, used when observability is disabled.
///
/// - **Log Level**: `LOG_LEVEL` (default `info`), overridden entirely by `RUST_LOG`
/// - **Format**: compact, with file and line
pub fn init_basic_console_logging() {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(&log_level)));

    let console_layer = fmt::layer()
        .compact()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_filter(env_filter);

    // A second init (tests, CLI reuse) is not an error worth failing on.
    let _ = tracing_subscriber::registry().with(console_layer).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_quiets_dependencies() {
        let directive = default_directive("debug");
        assert!(directive.starts_with("campusbyte=debug"));
        assert!(directive.contains("sqlx=warn"));
        assert!(EnvFilter::try_new(directive).is_ok());
    }
}
