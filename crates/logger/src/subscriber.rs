use std::env::var;

use tracing::{level_filters::LevelFilter, warn};
use tracing_subscriber::{Layer, filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Output formats selectable through `RUST_LOG_FORMAT`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Compact,
    Json,
}

impl LogFormat {
    /// `None` for values that name no known format
    fn parse(value: &str) -> Option<Self> {
        match value {
            "" | "compact" => Some(LogFormat::Compact),
            "json" => Some(LogFormat::Json),
            _ => None,
        }
    }
}

/// Install the global subscriber at `INFO`, overridable through `RUST_LOG`.
pub fn init_tracing() {
    init_tracing_with_level(LevelFilter::INFO);
}

/// Install the global subscriber with `level` as the default directive.
///
/// `RUST_LOG_FORMAT=json` switches the output to one JSON object per event.
/// Calling this twice is harmless; the second install is ignored.
pub fn init_tracing_with_level(level: LevelFilter) {
    let env_filter = EnvFilter::builder().with_default_directive(level.into()).from_env_lossy();

    let log_format = var("RUST_LOG_FORMAT").unwrap_or_default();
    let format = LogFormat::parse(&log_format);

    let log_layer = match format.unwrap_or(LogFormat::Compact) {
        LogFormat::Json => tracing_subscriber::fmt::layer().json().with_filter(env_filter).boxed(),
        LogFormat::Compact => tracing_subscriber::fmt::layer()
            .compact()
            .without_time()
            .with_filter(env_filter)
            .boxed(),
    };

    let installed = tracing_subscriber::registry().with(log_layer).try_init().is_ok();
    if installed && format.is_none() {
        warn!("Unknown RUST_LOG_FORMAT '{log_format}', falling back to compact output");
    }
}
