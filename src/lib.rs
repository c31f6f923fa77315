//! # cmdtree
//!
//! Command tree dispatch for command line programs.
//! A host registers a tree of commands, each with its own flags and handler;
//! `cmdtree` picks the command named by the arguments, works out which of its
//! flags were given and runs its handler, or prints its usage when asked for
//! help.
//!
//! ## Features
//!
//! - Nested sub-commands resolved in a single left-to-right pass
//! - Presence-only flags, `-h`/`-help` injected on every command
//! - Permissive parsing: unknown commands and flags are never errors
//! - Per-run state returned as values, so a tree can be executed repeatedly
//!
//! ## Example
//!
//! ```no_run
//! use cmdtree::core::{Command, CommandTree, Flag};
//! use std::io::Write;
//!
//! let mut tree = CommandTree::new("program", "Does things")?;
//! tree.add_command(
//!     tree.root(),
//!     Command::new("greet", "Say hello")
//!         .with_flag(Flag::new("-l", "-loud", "Shout"))
//!         .with_run(|invocation| {
//!             let mut out = invocation.output();
//!             writeln!(out, "hello {:?}", invocation.arguments())?;
//!             Ok(())
//!         }),
//! )?;
//!
//! let args: Vec<String> = std::env::args().skip(1).collect();
//! tree.execute(&args)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod utils;

pub use crate::core::{Command, CommandId, CommandTree, Flag, Invocation};
pub use crate::error::{CliError, Result};

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging with appropriate verbosity
pub fn setup_logging(debug: bool) -> anyhow::Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
