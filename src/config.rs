//! Configuration for the command tree
//!
//! Centralizes the injected help and version flags and logging options, with
//! validation.

use crate::{
    core::flag::{Flag, is_flag},
    error::CliError,
};
use serde::{Deserialize, Serialize};

/// Environment variable that turns on debug logging in the host binary
pub const DEBUG_ENV: &str = "CMDTREE_DEBUG";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Enable debug logging
    pub debug: bool,
    /// Help flag injected into every command
    pub help: HelpConfig,
    /// Version flag added to the root when a version is set
    pub version: VersionConfig,
}

/// Help flag configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HelpConfig {
    /// Short form, `-h` by default
    pub short_name: String,
    /// Long form, `-help` by default
    pub long_name: String,
    /// Description listed in usage output
    pub description: String,
}

/// Version flag configuration
///
/// Either name may be left empty, not both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VersionConfig {
    /// Short form, none by default
    pub short_name: String,
    /// Long form, `-version` by default
    pub long_name: String,
    /// Description listed in usage output
    pub description: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug: false,
            help: HelpConfig::default(),
            version: VersionConfig::default(),
        }
    }
}

impl Default for HelpConfig {
    fn default() -> Self {
        Self {
            short_name: "-h".to_string(),
            long_name: "-help".to_string(),
            description: "Show help message".to_string(),
        }
    }
}

impl Default for VersionConfig {
    fn default() -> Self {
        Self {
            short_name: String::new(),
            long_name: "-version".to_string(),
            description: "Show version information".to_string(),
        }
    }
}

impl HelpConfig {
    /// The flag injected into every command
    pub fn flag(&self) -> Flag {
        Flag::new(&self.short_name, &self.long_name, &self.description)
    }
}

impl VersionConfig {
    /// The flag added to the root command
    pub fn flag(&self) -> Flag {
        Flag::new(&self.short_name, &self.long_name, &self.description)
    }

    /// Name advertised in the usage line, the long one when there is one
    pub fn display_name(&self) -> &str {
        if self.long_name.is_empty() {
            &self.short_name
        } else {
            &self.long_name
        }
    }
}

impl Config {
    /// Create configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let debug = lookup(DEBUG_ENV)
            .map(|value| {
                matches!(
                    value.trim().to_ascii_lowercase().as_str(),
                    "1" | "true" | "yes" | "on"
                )
            })
            .unwrap_or(false);

        Self {
            debug,
            ..Self::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), CliError> {
        for name in [&self.help.short_name, &self.help.long_name] {
            if !is_flag(name) {
                return Err(CliError::config(format!(
                    "help flag name `{name}` is not flag-like"
                )));
            }
        }

        if self.help.short_name == self.help.long_name {
            return Err(CliError::config(format!(
                "help flag short and long names are both `{}`",
                self.help.short_name
            )));
        }

        let version = self.version.flag();
        if version.names().next().is_none() {
            return Err(CliError::config("version flag needs a short or a long name"));
        }
        for name in version.names() {
            if !is_flag(name) {
                return Err(CliError::config(format!(
                    "version flag name `{name}` is not flag-like"
                )));
            }
        }
        if let Some(name) = version.clash_with(&self.help.flag()) {
            return Err(CliError::config(format!(
                "version flag name `{name}` is already the help flag"
            )));
        }

        Ok(())
    }
}
