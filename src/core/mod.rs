//! Command tree engine
//!
//! Contains the command arena, sub-command resolution, flag matching, version
//! reporting and the execution entry point that ties them together.

pub mod command;
pub mod execute;
pub mod flag;
pub mod handler;
pub mod matcher;
pub mod names;
pub mod resolver;
pub mod usage;
pub mod version;

pub use command::{Command, CommandId, CommandTree};
pub use execute::Invocation;
pub use flag::{Flag, is_flag};
pub use handler::{Handler, HandlerSlot};
pub use matcher::{ParsedFlags, match_flags};
pub use resolver::{Resolution, resolve_command};
pub use usage::{CommandSummary, FlagSummary, TemplateRenderer, Usage, UsageRenderer};
pub use version::VersionInfo;
