//! Flag descriptors and token classification

use serde::{Deserialize, Serialize};

/// A recognized command line option
///
/// Only presence is tracked. The `value` placeholder is carried for
/// renderers and handlers but never filled from the command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flag {
    /// Short form, e.g. `-h`
    pub short_name: String,
    /// Long form, e.g. `-help`
    pub long_name: String,
    /// Description listed in usage output
    pub description: String,
    /// Untyped value placeholder
    pub value: String,
}

impl Flag {
    /// Create a new flag with the default `"false"` value
    pub fn new(
        short_name: impl Into<String>,
        long_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            short_name: short_name.into(),
            long_name: long_name.into(),
            description: description.into(),
            value: "false".to_string(),
        }
    }

    /// Set the value placeholder
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Whether `token` names this flag, by exact string equality.
    ///
    /// An empty name is an absent name and matches nothing.
    pub fn matches(&self, token: &str) -> bool {
        !token.is_empty() && (self.short_name == token || self.long_name == token)
    }

    /// The names this flag answers to, short first
    pub fn names(&self) -> impl Iterator<Item = &str> {
        [self.short_name.as_str(), self.long_name.as_str()]
            .into_iter()
            .filter(|name| !name.is_empty())
    }

    /// First of this flag's names that `other` already answers to
    pub fn clash_with(&self, other: &Flag) -> Option<&str> {
        self.names().find(|name| other.matches(name))
    }

    /// Whether this flag shares a name with `other`
    pub fn collides_with(&self, other: &Flag) -> bool {
        self.clash_with(other).is_some()
    }
}

/// Check whether a token looks like a flag.
///
/// Accepted shapes: `-f`, `-flag`, `-f=value`, `--flag`, `--flag=value`.
/// A lone `-` or `--` is a plain argument.
pub fn is_flag(token: &str) -> bool {
    let bytes = token.as_bytes();
    match bytes {
        [b'-', b'-', _, ..] => true,
        [b'-', second, ..] => *second != b'-',
        _ => false,
    }
}
