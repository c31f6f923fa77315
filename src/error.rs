//! Error types for the command tree
//!
//! Registration and configuration problems get their own variants. Resolution
//! and flag matching never fail; the only runtime error is whatever a handler
//! returns, which is carried through untouched.

use thiserror::Error;

/// Main error type for the command tree
#[derive(Error, Debug)]
pub enum CliError {
    /// Error returned by a command handler, passed through as-is
    #[error(transparent)]
    Handler(anyhow::Error),

    /// A sibling command with the same name is already registered
    #[error("Command `{name}` is already registered under `{parent}`")]
    DuplicateCommand { parent: String, name: String },

    /// A flag name is already declared on the command
    #[error("Flag `{flag}` is already declared on command `{command}`")]
    DuplicateFlag { command: String, flag: String },

    /// A command or flag name that could never match a token
    #[error("Invalid {kind} name `{name}`: {reason}")]
    InvalidName {
        kind: &'static str,
        name: String,
        reason: String,
    },

    /// Command id does not belong to this tree
    #[error("Unknown command id: {id}")]
    UnknownCommand { id: usize },

    /// Writing to the output sink failed
    #[error("Output error: failed to write {what}")]
    Output {
        what: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl CliError {
    /// Wrap a handler error without altering it
    pub fn handler(source: anyhow::Error) -> Self {
        Self::Handler(source)
    }

    /// Create a new duplicate command error
    pub fn duplicate_command(parent: impl Into<String>, name: impl Into<String>) -> Self {
        Self::DuplicateCommand {
            parent: parent.into(),
            name: name.into(),
        }
    }

    /// Create a new duplicate flag error
    pub fn duplicate_flag(command: impl Into<String>, flag: impl Into<String>) -> Self {
        Self::DuplicateFlag {
            command: command.into(),
            flag: flag.into(),
        }
    }

    /// Create a new invalid name error
    pub fn invalid_name(
        kind: &'static str,
        name: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidName {
            kind,
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a new output error
    pub fn output(what: impl Into<String>, source: std::io::Error) -> Self {
        Self::Output {
            what: what.into(),
            source,
        }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Whether this error came out of a handler
    pub fn is_handler(&self) -> bool {
        matches!(self, Self::Handler(_))
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, CliError>;
