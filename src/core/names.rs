//! Name validation for commands and flags

use crate::error::{CliError, Result};
use regex::Regex;
use tracing::trace;

/// Compiled rules for names accepted at registration time
#[derive(Debug, Clone)]
pub struct NameRules {
    /// A command name must be usable as a non-flag token
    re_command: Regex,
    /// A flag name must be flag-like
    re_flag: Regex,
}

impl NameRules {
    /// Compile the name rules
    pub fn new() -> Result<Self> {
        Ok(Self {
            re_command: Regex::new(r"^[^\s-]\S*$")
                .map_err(|e| CliError::config(format!("Failed to compile regex: {}", e)))?,
            re_flag: Regex::new(r"^-{1,2}[^-\s]\S*$")
                .map_err(|e| CliError::config(format!("Failed to compile regex: {}", e)))?,
        })
    }

    /// Check a sub-command name
    pub fn check_command(&self, name: &str) -> Result<()> {
        trace!(name, "checking command name");
        if name.is_empty() {
            return Err(CliError::invalid_name("command", name, "name is empty"));
        }
        if !self.re_command.is_match(name) {
            return Err(CliError::invalid_name(
                "command",
                name,
                "must not start with `-` or contain whitespace",
            ));
        }
        Ok(())
    }

    /// Check a flag's short or long name
    pub fn check_flag(&self, name: &str) -> Result<()> {
        trace!(name, "checking flag name");
        if !self.re_flag.is_match(name) {
            return Err(CliError::invalid_name(
                "flag",
                name,
                "expected `-name` or `--name` without whitespace",
            ));
        }
        Ok(())
    }
}
