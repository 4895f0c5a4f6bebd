//! # Logging
//!
//! Installs the global `tracing` subscriber.
//!
//! `RUST_LOG` takes precedence; otherwise the configured log level applies to
//! this crate only.

use crate::config::ProvisionerSettings;
use tracing_subscriber::EnvFilter;

/// Initialize the global subscriber from settings. Safe to call more than once.
pub fn init_logging(settings: &ProvisionerSettings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "apim_provisioner={}",
            settings.log_level.to_lowercase()
        ))
    });

    // stdout carries command output
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    let result = if settings.log_format.eq_ignore_ascii_case("json") {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    // A subscriber installed by an embedding process wins
    if let Err(e) = result {
        tracing::debug!("Global tracing subscriber already set: {e}");
    }
}
