use std::fs;

use schoolhub_config::LogConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const CRATES: [&str; 6] = [
    "schoolhub",
    "schoolhub_auth",
    "schoolhub_cache",
    "schoolhub_client",
    "schoolhub_store",
    "schoolhub_cli",
];

/// Console output goes to stderr so command output on stdout stays clean.
/// Every request is also written to a daily JSON log.
///
/// The returned guard flushes the JSON log when dropped.
pub fn init_tracing(config: &LogConfig) -> anyhow::Result<WorkerGuard> {
    fs::create_dir_all(&config.dir)?;

    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(crate_directives(&config.level)));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .compact()
        .with_filter(console_filter);

    let json_appender = RollingFileAppender::new(Rotation::DAILY, &config.dir, "schoolhub.json");
    let (json_writer, guard) = tracing_appender::non_blocking(json_appender);

    let json_layer = fmt::layer()
        .json()
        .with_writer(json_writer)
        .with_current_span(true)
        .with_span_list(true)
        .with_filter(EnvFilter::new(crate_directives("info")));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(json_layer)
        .try_init()?;

    Ok(guard)
}

fn crate_directives(level: &str) -> String {
    CRATES
        .iter()
        .map(|name| format!("{name}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crate_directives() {
        let directives = crate_directives("debug");
        assert!(directives.starts_with("schoolhub=debug,schoolhub_auth=debug"));
        assert!(directives.ends_with("schoolhub_cli=debug"));
    }
}
