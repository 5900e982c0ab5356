//! cli
//!
//! Command-line interface layer for xcodeproj.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Install the tracing subscriber
//! - Delegate to command handlers
//! - Does NOT mutate project graphs directly
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and dispatches to
//! handlers that hand exactly one operation to the [`crate::engine`]
//! runner.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use crate::engine;
use anyhow::Result;

/// Environment variable holding the log filter when `--debug` is absent.
pub const LOG_ENV: &str = "XCODEPROJ_LOG";

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    init_logging(cli.debug);

    // Configuration may turn verification off too; handlers combine both.
    let ctx = engine::Context {
        debug: cli.debug,
        quiet: cli.quiet,
        verify: !cli.no_verify,
    };

    commands::dispatch(cli.command, &ctx)
}

/// Initialize tracing on stderr.
fn init_logging(debug: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if debug {
        EnvFilter::new("xcodeproj=debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // A subscriber may already be installed when embedded.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();
}
