//! Utility modules for common functionality
//!
//! Provides the output sink shared by every command in a tree.

pub mod output;

pub use output::{Output, SharedBuffer};
