//! Tracing subscriber bootstrap.

use anyhow::anyhow;
use bookswap_kernel::settings::{LogFormat, TelemetrySettings};
use tracing_subscriber::EnvFilter;

/// Build the filter from `RUST_LOG`, falling back to the configured directive.
pub fn env_filter(settings: &TelemetrySettings) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.filter))
}

/// Install the global tracing subscriber.
///
/// Fails if a subscriber has already been installed for this process.
pub fn init(settings: &TelemetrySettings) -> anyhow::Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(settings))
        .with_target(true)
        .with_writer(std::io::stderr);

    let installed = match settings.log_format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().flatten_event(true).try_init(),
    };

    installed.map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))?;

    tracing::debug!(
        target: "bookswap-telemetry",
        format = ?settings.log_format,
        "telemetry initialized"
    );
    Ok(())
}
