//! Usage projection and the default text renderer
//!
//! The tree only hands renderers a read-only [`Usage`] view of a command.
//! How that view becomes text is up to the [`UsageRenderer`].

use crate::core::command::{CommandId, CommandTree};
use serde::Serialize;
use std::io::{self, Write};

/// Everything a renderer may show for one command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Usage<'a> {
    pub name: &'a str,
    pub long_description: &'a str,
    /// Children in registration order
    pub commands: Vec<CommandSummary<'a>>,
    /// Flags in declaration order
    pub flags: Vec<FlagSummary<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandSummary<'a> {
    pub name: &'a str,
    pub short_description: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlagSummary<'a> {
    pub short_name: &'a str,
    pub long_name: &'a str,
    pub description: &'a str,
}

impl<'a> Usage<'a> {
    /// Project `id` out of `tree`, `None` when the id is not in the tree
    pub fn of(tree: &'a CommandTree, id: CommandId) -> Option<Self> {
        let command = tree.get(id)?;

        let commands = command
            .commands()
            .iter()
            .map(|child| {
                let child = tree.command(*child);
                CommandSummary {
                    name: child.name(),
                    short_description: child.short_description(),
                }
            })
            .collect();

        let flags = command
            .flags()
            .iter()
            .map(|flag| FlagSummary {
                short_name: &flag.short_name,
                long_name: &flag.long_name,
                description: &flag.description,
            })
            .collect();

        Some(Self {
            name: command.name(),
            long_description: command.long_description(),
            commands,
            flags,
        })
    }
}

/// Turns a [`Usage`] into text
pub trait UsageRenderer: Send + Sync {
    fn render(&self, usage: &Usage<'_>, out: &mut dyn Write) -> io::Result<()>;
}

/// Default renderer.
///
/// ```text
/// usage: <name> [-version] [-help] <command> [args]
///
///   <long description>
///
/// Commands:
///   <name>\t<short description>
///
/// Flags:
///   <short>, <long>\t<description>
///
/// Use <name> [command] -help for more information about a command.
/// ```
///
/// The description and both lists are left out when empty. `[-version]` is
/// only shown for a command that declares the version flag, and a flag with
/// a single name lists just that name.
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    help_name: String,
    version_name: Option<String>,
}

impl TemplateRenderer {
    /// `help_name` is the flag advertised in the first and last lines
    pub fn new(help_name: impl Into<String>) -> Self {
        Self {
            help_name: help_name.into(),
            version_name: None,
        }
    }

    /// Advertise `version_name` in the first line of commands declaring it
    #[must_use]
    pub fn with_version_name(mut self, version_name: impl Into<String>) -> Self {
        self.version_name = Some(version_name.into());
        self
    }

    fn declared_version(&self, usage: &Usage<'_>) -> Option<&str> {
        let name = self.version_name.as_deref()?;
        usage
            .flags
            .iter()
            .any(|flag| flag.short_name == name || flag.long_name == name)
            .then_some(name)
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new("-help")
    }
}

impl UsageRenderer for TemplateRenderer {
    fn render(&self, usage: &Usage<'_>, out: &mut dyn Write) -> io::Result<()> {
        write!(out, "usage: {} ", usage.name)?;
        if let Some(version) = self.declared_version(usage) {
            write!(out, "[{version}] ")?;
        }
        write!(out, "[{}] <command> [args]", self.help_name)?;
        if !usage.long_description.is_empty() {
            write!(out, "\n\n  {}", usage.long_description)?;
        }
        writeln!(out)?;

        if !usage.commands.is_empty() {
            writeln!(out, "\nCommands:")?;
            for command in &usage.commands {
                writeln!(out, "  {}\t{}", command.name, command.short_description)?;
            }
        }

        if !usage.flags.is_empty() {
            writeln!(out, "\nFlags:")?;
            for flag in &usage.flags {
                let names: Vec<&str> = [flag.short_name, flag.long_name]
                    .into_iter()
                    .filter(|name| !name.is_empty())
                    .collect();
                writeln!(out, "  {}\t{}", names.join(", "), flag.description)?;
            }
        }

        writeln!(
            out,
            "\nUse {} [command] {} for more information about a command.",
            usage.name, self.help_name
        )
    }
}
