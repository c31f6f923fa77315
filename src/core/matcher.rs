//! Flag presence matching

use crate::core::{command::Command, flag::is_flag};
use tracing::{instrument, trace};

/// Which of a command's declared flags appeared in one invocation
///
/// Indexed in step with [`Command::flags`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedFlags {
    parsed: Vec<bool>,
}

impl ParsedFlags {
    /// Nothing parsed yet for a command with `count` flags
    pub fn none(count: usize) -> Self {
        Self {
            parsed: vec![false; count],
        }
    }

    /// Whether the flag at `index` was present
    pub fn is_parsed(&self, index: usize) -> bool {
        self.parsed.get(index).copied().unwrap_or(false)
    }

    /// Number of distinct declared flags that were present
    pub fn count(&self) -> usize {
        self.parsed.iter().filter(|parsed| **parsed).count()
    }

    /// Indices of the flags that were present
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.parsed
            .iter()
            .enumerate()
            .filter_map(|(index, parsed)| parsed.then_some(index))
    }

    fn mark(&mut self, index: usize) {
        if let Some(slot) = self.parsed.get_mut(index) {
            *slot = true;
        }
    }
}

/// Mark every declared flag of `command` named by a token in `args`.
///
/// Matching is exact string equality against the short or long name, so
/// `-f=bar` only matches a flag literally called `-f=bar`. Plain tokens and
/// undeclared flags are ignored.
#[instrument(level = "debug", skip_all, fields(command = command.name(), tokens = args.len()))]
pub fn match_flags<S: AsRef<str>>(command: &Command, args: &[S]) -> ParsedFlags {
    let mut parsed = ParsedFlags::none(command.flags().len());

    for token in args.iter().map(|token| token.as_ref()).filter(|token| is_flag(token)) {
        let mut known = false;
        for (index, flag) in command.flags().iter().enumerate() {
            if flag.matches(token) {
                parsed.mark(index);
                known = true;
            }
        }
        if !known {
            trace!(token, "ignoring undeclared flag");
        }
    }

    parsed
}
