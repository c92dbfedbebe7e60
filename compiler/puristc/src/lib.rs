//! Purist front-end driver.
//!
//! The `purist` binary is a thin dispatcher over [`commands`]. Everything
//! it does is available here as a library so the commands can be tested
//! without spawning processes.

pub mod commands;
mod config;
mod error;

pub use config::DriverConfig;
pub use error::DriverError;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=purist_layout=trace` or `RUST_LOG=purist_parse=debug`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_bracketed_fields(true),
                )
                .with(filter)
                .init();
        }
    });
}
