use std::io;
use tracing_appender::rolling;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

const STDOUT_FILTER: &str = "info,api=info,web_request=warn,hyper=warn,reqwest=warn";
const FILE_FILTER: &str = "info,web_request=debug,api=debug";
const CLI_FILTER: &str = "warn";

/// `RUST_LOG` takes precedence over the built-in directives.
fn filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Server logging: human-readable stdout plus a daily rolling file in `log_dir`.
pub fn configure_logging(log_dir: &str) {
    let stdout_log = fmt::layer()
        .with_writer(io::stdout)
        .with_filter(filter(STDOUT_FILTER));

    let file_appender = rolling::daily(log_dir, "trialscope.log");
    let file_log = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_filter(filter(FILE_FILTER));

    tracing_subscriber::Registry::default()
        .with(stdout_log)
        .with(file_log)
        .init();
}

/// CLI logging: warnings and errors on stderr so stdout stays clean for results.
pub fn configure_cli_logging() {
    let stderr_log = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .with_filter(filter(CLI_FILTER));

    tracing_subscriber::Registry::default()
        .with(stderr_log)
        .init();
}
