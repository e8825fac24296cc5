// LootSleuth - util/logging.rs
//
// Structured diagnostics on stderr.
//
// Level sources, highest first: RUST_LOG, the --debug flag, the
// [logging] level key in config.toml, then "info". Stdout carries the
// extraction summary and analysis table, so diagnostics never go there.

use tracing_subscriber::EnvFilter;

/// Filter directive from the level sources, `None` meaning "use RUST_LOG".
fn directive(rust_log_set: bool, debug_flag: bool, config_level: Option<&str>) -> Option<String> {
    if rust_log_set {
        None
    } else if debug_flag {
        Some("debug".to_string())
    } else {
        Some(
            config_level
                .unwrap_or(super::constants::DEFAULT_LOG_LEVEL)
                .to_string(),
        )
    }
}

/// Source locations are only worth printing at debug or trace.
fn wants_locations(rust_log_set: bool, debug_flag: bool, config_level: Option<&str>) -> bool {
    rust_log_set || debug_flag || matches!(config_level, Some("debug" | "trace"))
}

/// Install the global subscriber. A second call is a no-op.
pub fn init(debug_flag: bool, config_level: Option<&str>) {
    let rust_log_set = std::env::var("RUST_LOG").is_ok();
    let filter = match directive(rust_log_set, debug_flag, config_level) {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::from_default_env(),
    };
    let locations = wants_locations(rust_log_set, debug_flag, config_level);

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(locations)
        .with_file(locations)
        .with_line_number(locations)
        .compact()
        .try_init();

    tracing::debug!(
        app = super::constants::APP_NAME,
        version = super::constants::APP_VERSION,
        "Logging initialised"
    );
}
