//! Sub-command resolution
//!
//! Walks the argument tokens once, left to right, descending into a child
//! each time a plain token names one of the current command's children.
//! Flag declarations are never consulted here.

use crate::core::{
    command::{CommandId, CommandTree},
    flag::is_flag,
};
use tracing::{debug, instrument, trace};

/// Command selected by a resolution pass and the tokens left for it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution<'a, S> {
    /// Deepest command reached
    pub command: CommandId,
    /// Tokens after the one that selected `command`
    pub arguments: &'a [S],
}

/// Find the most specific command for `args`, starting at `start`.
///
/// A command without children resolves to itself with every token as its
/// arguments, and so does an id the tree does not know. Unknown names never
/// fail; they leave the selection where it is.
#[instrument(level = "debug", skip_all, fields(start = %start, tokens = args.len()))]
pub fn resolve_command<'a, S: AsRef<str>>(
    tree: &CommandTree,
    start: CommandId,
    args: &'a [S],
) -> Resolution<'a, S> {
    let mut resolution = Resolution {
        command: start,
        arguments: args,
    };

    if tree
        .get(start)
        .is_none_or(|command| command.commands().is_empty())
    {
        return resolution;
    }

    let mut candidate: Option<&str> = None;
    // Index of the token after the one being looked at.
    let mut offset = 1;

    for token in args {
        let token = token.as_ref();
        if is_flag(token) {
            trace!(token, offset, "skipping flag token");
        } else {
            candidate = Some(token);
        }

        // A candidate is spent once it selects a command.
        if let Some(name) = candidate {
            if let Some(child) = tree.child_named(resolution.command, name) {
                debug!(command = name, offset, "descending into sub-command");
                resolution = Resolution {
                    command: child,
                    arguments: &args[offset..],
                };
                candidate = None;
            }
        }

        offset += 1;
    }

    resolution
}
