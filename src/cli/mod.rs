//! Demo program wiring
//!
//! Provides argument access and the demo command tree.

pub mod args;
pub mod commands;

pub use args::program_args;
pub use commands::{PROGRAM_NAME, build_tree};
