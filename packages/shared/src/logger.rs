//! Logging setup for the Genkan binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// Both the library crate of the binary and the binary itself are enabled at
/// `default_log_level`. `RUST_LOG` overrides the whole filter when set.
///
/// # Arguments
///
/// * `crate_name` - The library crate to enable (e.g., "genkan_server")
/// * `binary_name` - The name of the binary (e.g., "genkan-server")
/// * `default_log_level` - The default log level (e.g., "debug", "info")
///
/// # Examples
///
/// ```no_run
/// use genkan_shared::logger::setup_logger;
///
/// setup_logger("genkan_server", "genkan-server", "info");
/// ```
pub fn setup_logger(crate_name: &str, binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                default_filter(crate_name, binary_name, default_log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build the default `EnvFilter` directive string.
///
/// Cargo binary names may contain `-`, tracing targets never do. A binary that
/// shares its library's name gets a single directive.
fn default_filter(crate_name: &str, binary_name: &str, level: &str) -> String {
    let mut targets = vec![
        crate_name.replace('-', "_"),
        binary_name.replace('-', "_"),
        "tower_http".to_string(),
    ];
    targets.dedup();
    targets
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect::<Vec<_>>()
        .join(",")
}
