//! Tensorfield Tools
//!
//! The `fieldscope` CLI: runs the analysis passes against built-in analytic
//! fields and writes the results as JSON.

pub mod commands;
pub mod error;
pub mod fields;
pub mod output;

pub use error::{Result, ToolError};

use tracing_subscriber::{EnvFilter, fmt};

/// Initialize logging with a default filter.
///
/// Use `RUST_LOG` environment variable to override the default filter.
/// Default is `info`, with `debug` for the tool and the analysis passes.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tensorfield_tools=debug,tensorfield_lens=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
