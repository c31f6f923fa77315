//! Execution: resolve, match flags, then show help, show the version or run
//! the handler
//!
//! Every call builds a fresh [`Invocation`]; the tree itself is only read, so
//! the same tree can be executed repeatedly or from several threads.

use crate::{
    core::{
        command::{Command, CommandId, CommandTree},
        flag::Flag,
        matcher::{ParsedFlags, match_flags},
        resolver::resolve_command,
    },
    error::{CliError, Result},
    utils::Output,
};
use tracing::{debug, instrument, warn};

/// One resolved run of a command: what a handler gets to look at
#[derive(Debug)]
pub struct Invocation<'a> {
    tree: &'a CommandTree,
    command: CommandId,
    arguments: Vec<String>,
    parsed: ParsedFlags,
    output: Output,
}

impl<'a> Invocation<'a> {
    pub fn tree(&self) -> &'a CommandTree {
        self.tree
    }

    pub fn id(&self) -> CommandId {
        self.command
    }

    /// The selected command
    pub fn command(&self) -> &'a Command {
        self.tree.command(self.command)
    }

    pub fn name(&self) -> &'a str {
        self.command().name()
    }

    /// Tokens left after the selecting command name, flags included
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// Declared flag called `name`, short or long
    pub fn flag(&self, name: &str) -> Option<&'a Flag> {
        self.command().find_flag(name).map(|(_, flag)| flag)
    }

    /// Whether the declared flag called `name` was given
    pub fn is_set(&self, name: &str) -> bool {
        self.command()
            .find_flag(name)
            .is_some_and(|(index, _)| self.parsed.is_parsed(index))
    }

    /// Declared flags paired with whether each was given
    pub fn flags(&self) -> impl Iterator<Item = (&'a Flag, bool)> {
        self.command()
            .flags()
            .iter()
            .enumerate()
            .map(|(index, flag)| (flag, self.parsed.is_parsed(index)))
    }

    pub fn parsed_flags(&self) -> &ParsedFlags {
        &self.parsed
    }

    /// Sink for this run
    pub fn output(&self) -> Output {
        self.output.clone()
    }

    /// Whether the help flag of the selected command was given
    pub fn help_requested(&self) -> bool {
        self.flags()
            .any(|(flag, parsed)| parsed && self.tree.is_help_flag(flag))
    }

    /// Whether the root's version flag was given and a version is set
    pub fn version_requested(&self) -> bool {
        self.command == self.tree.root()
            && self
                .flags()
                .any(|(flag, parsed)| parsed && self.tree.is_version_flag(flag))
    }

    /// Write the selected command's usage to the output
    pub fn usage(&self) -> Result<()> {
        let mut out = self.output();
        self.tree.write_usage(self.command, &mut out)
    }
}

impl CommandTree {
    /// Resolve `args` (program name excluded) without dispatching
    pub fn resolve<S: AsRef<str>>(&self, args: &[S]) -> Invocation<'_> {
        self.resolve_with_output(args, self.output().clone())
    }

    /// Resolve `args` against a sink other than the tree's own
    pub fn resolve_with_output<S: AsRef<str>>(&self, args: &[S], output: Output) -> Invocation<'_> {
        let resolution = resolve_command(self, self.root(), args);
        let command = self.command(resolution.command);
        let parsed = match_flags(command, resolution.arguments);

        Invocation {
            tree: self,
            command: resolution.command,
            arguments: resolution
                .arguments
                .iter()
                .map(|arg| arg.as_ref().to_string())
                .collect(),
            parsed,
            output,
        }
    }

    /// Run the command selected by `args` (program name excluded).
    ///
    /// Shows usage instead when the selected command's help flag is given,
    /// and the version line when the root's version flag is. Neither of those
    /// fails: a sink that cannot be written to is only logged. Handler errors
    /// are returned unchanged as [`CliError::Handler`].
    pub fn execute<S: AsRef<str>>(&self, args: &[S]) -> Result<()> {
        self.execute_with_output(args, self.output().clone())
    }

    /// Like [`execute`](Self::execute), writing to `output` for this call only
    #[instrument(skip_all, fields(program = self.command(self.root()).name(), tokens = args.len()))]
    pub fn execute_with_output<S: AsRef<str>>(&self, args: &[S], output: Output) -> Result<()> {
        let invocation = self.resolve_with_output(args, output);
        debug!(
            command = invocation.name(),
            arguments = invocation.arguments().len(),
            flags = invocation.parsed_flags().count(),
            "resolved command"
        );

        if invocation.help_requested() {
            debug!(command = invocation.name(), "help requested, skipping handler");
            if let Err(e) = invocation.usage() {
                warn!(command = invocation.name(), error = %e, "failed to show usage");
            }
            return Ok(());
        }

        if invocation.version_requested() {
            debug!("version requested, skipping handler");
            if let Err(e) = self.write_version(&mut invocation.output()) {
                warn!(error = %e, "failed to show version");
            }
            return Ok(());
        }

        invocation
            .command()
            .handler()
            .run(&invocation)
            .map_err(CliError::handler)
    }
}
