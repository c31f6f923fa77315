//! Command nodes and the tree that owns them
//!
//! Commands live in an arena and refer to their children by [`CommandId`].
//! A parent owns its list of children; nothing points back up the tree.

use crate::{
    config::Config,
    core::{
        execute::Invocation,
        flag::Flag,
        handler::{Handler, HandlerSlot},
        names::NameRules,
        usage::{TemplateRenderer, Usage, UsageRenderer},
        version::VersionInfo,
    },
    error::{CliError, Result},
    utils::Output,
};
use std::fmt;
use tracing::{debug, instrument};

/// Handle to a command inside a [`CommandTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommandId(usize);

impl CommandId {
    /// Position of the command in its tree
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A named command with its flags, children and handler
#[derive(Debug)]
pub struct Command {
    name: String,
    short_description: String,
    long_description: String,
    flags: Vec<Flag>,
    commands: Vec<CommandId>,
    handler: HandlerSlot,
}

impl Command {
    /// Create a command with a no-op handler
    pub fn new(name: impl Into<String>, short_description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            short_description: short_description.into(),
            long_description: String::new(),
            flags: Vec::new(),
            commands: Vec::new(),
            handler: HandlerSlot::Noop,
        }
    }

    /// Set the text shown at the top of this command's usage
    #[must_use]
    pub fn with_long_description(mut self, description: impl Into<String>) -> Self {
        self.long_description = description.into();
        self
    }

    /// Declare a flag; names are checked when the command is registered
    #[must_use]
    pub fn with_flag(mut self, flag: Flag) -> Self {
        self.flags.push(flag);
        self
    }

    /// Run `f` when this command is selected
    #[must_use]
    pub fn with_run<F>(self, f: F) -> Self
    where
        F: Fn(&Invocation<'_>) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.with_handler(f)
    }

    /// Run `handler` when this command is selected
    #[must_use]
    pub fn with_handler<H: Handler + 'static>(mut self, handler: H) -> Self {
        self.handler = HandlerSlot::custom(handler);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn short_description(&self) -> &str {
        &self.short_description
    }

    pub fn long_description(&self) -> &str {
        &self.long_description
    }

    /// Declared flags, in declaration order
    pub fn flags(&self) -> &[Flag] {
        &self.flags
    }

    /// Child commands, in registration order
    pub fn commands(&self) -> &[CommandId] {
        &self.commands
    }

    pub fn handler(&self) -> &HandlerSlot {
        &self.handler
    }

    /// Find a declared flag by its short or long name
    pub fn find_flag(&self, name: &str) -> Option<(usize, &Flag)> {
        self.flags
            .iter()
            .enumerate()
            .find(|(_, flag)| flag.matches(name))
    }

    /// Name of `flag` that one of the declared flags already uses
    fn clash<'f>(&self, flag: &'f Flag) -> Option<&'f str> {
        self.flags
            .iter()
            .find_map(|existing| flag.clash_with(existing))
    }
}

/// Arena of commands rooted at the program command
pub struct CommandTree {
    nodes: Vec<Command>,
    config: Config,
    rules: NameRules,
    output: Output,
    renderer: Box<dyn UsageRenderer>,
    version: Option<VersionInfo>,
}

impl CommandTree {
    /// Create a tree whose root is named after the program
    pub fn new(name: impl Into<String>, short_description: impl Into<String>) -> Result<Self> {
        Self::from_command(Command::new(name, short_description), Config::default())
    }

    /// Create a tree from a prepared root command and configuration
    pub fn from_command(root: Command, config: Config) -> Result<Self> {
        config.validate()?;

        let renderer = TemplateRenderer::new(config.help.long_name.clone())
            .with_version_name(config.version.display_name());
        let mut tree = Self {
            nodes: Vec::new(),
            rules: NameRules::new()?,
            output: Output::stdout(),
            renderer: Box::new(renderer),
            version: None,
            config,
        };

        let root = tree.prepare(root)?;
        debug!(root = root.name(), "created command tree");
        tree.nodes.push(root);
        Ok(tree)
    }

    /// The program command
    pub fn root(&self) -> CommandId {
        CommandId(0)
    }

    /// Look up a command by id
    pub fn get(&self, id: CommandId) -> Option<&Command> {
        self.nodes.get(id.0)
    }

    /// Look up a command by id.
    ///
    /// Ids are only handed out by the tree that owns them; passing an id from
    /// another tree panics if it is out of range. Use [`get`](Self::get) when
    /// the id may be foreign.
    pub fn command(&self, id: CommandId) -> &Command {
        &self.nodes[id.0]
    }

    /// Number of commands, the root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree has at least its root
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Sink shared by every command in the tree
    pub fn output(&self) -> &Output {
        &self.output
    }

    /// Replace the sink for every command in the tree
    pub fn set_output(&mut self, output: Output) {
        self.output = output;
    }

    /// Replace the default usage renderer
    pub fn set_usage_renderer<R: UsageRenderer + 'static>(&mut self, renderer: R) {
        self.renderer = Box::new(renderer);
    }

    /// Register `command` as the last child of `parent`
    #[instrument(skip(self, command), fields(name = command.name()))]
    pub fn add_command(&mut self, parent: CommandId, command: Command) -> Result<CommandId> {
        let parent_name = self.checked(parent)?.name().to_string();
        self.rules.check_command(command.name())?;

        if self.child_named(parent, command.name()).is_some() {
            return Err(CliError::duplicate_command(parent_name, command.name()));
        }

        let command = self.prepare(command)?;
        let id = CommandId(self.nodes.len());
        self.nodes.push(command);
        self.nodes[parent.0].commands.push(id);

        debug!(parent = %parent_name, %id, "registered command");
        Ok(id)
    }

    /// Declare one more flag on an existing command
    pub fn add_flag(&mut self, id: CommandId, flag: Flag) -> Result<()> {
        self.checked(id)?;
        self.check_flag(&flag)?;

        let command = &mut self.nodes[id.0];
        if let Some(name) = command.clash(&flag) {
            return Err(CliError::duplicate_flag(&command.name, name));
        }
        command.flags.push(flag);
        Ok(())
    }

    /// Turn on the version flag of the root command.
    ///
    /// The flag is declared the first time; later calls only replace the
    /// reported version.
    #[instrument(skip(self, version, build))]
    pub fn set_version(&mut self, version: impl Into<String>, build: impl Into<String>) -> Result<()> {
        if self.version.is_none() {
            self.add_flag(self.root(), self.config.version.flag())?;
        }
        let info = VersionInfo::new(version, build);
        debug!(version = %info.version, build = %info.build, "version flag enabled");
        self.version = Some(info);
        Ok(())
    }

    /// Version reported by the version flag, if one was set
    pub fn version(&self) -> Option<&VersionInfo> {
        self.version.as_ref()
    }

    /// Replace the handler of an existing command
    pub fn set_handler<H: Handler + 'static>(&mut self, id: CommandId, handler: H) -> Result<()> {
        self.checked(id)?;
        self.nodes[id.0].handler = HandlerSlot::custom(handler);
        Ok(())
    }

    /// Set the long description of an existing command
    pub fn set_long_description(
        &mut self,
        id: CommandId,
        description: impl Into<String>,
    ) -> Result<()> {
        self.checked(id)?;
        self.nodes[id.0].long_description = description.into();
        Ok(())
    }

    /// First child of `parent` called `name`
    pub fn child_named(&self, parent: CommandId, name: &str) -> Option<CommandId> {
        self.get(parent)?
            .commands
            .iter()
            .copied()
            .find(|child| self.nodes[child.0].name == name)
    }

    /// Data a usage renderer needs for one command
    pub fn usage(&self, id: CommandId) -> Result<Usage<'_>> {
        Usage::of(self, id).ok_or(CliError::UnknownCommand { id: id.0 })
    }

    /// Render usage for `id` to `out`
    pub fn write_usage(&self, id: CommandId, out: &mut dyn std::io::Write) -> Result<()> {
        let usage = self.usage(id)?;
        self.renderer
            .render(&usage, out)
            .and_then(|()| out.flush())
            .map_err(|e| CliError::output(format!("usage for `{}`", usage.name), e))
    }

    /// Write `<program> version <version> build <build>` to the tree's sink
    pub fn show_version(&self) -> Result<()> {
        let mut out = self.output.clone();
        self.write_version(&mut out)
    }

    /// Write the version line to `out`
    pub fn write_version(&self, out: &mut dyn std::io::Write) -> Result<()> {
        let program = self.command(self.root()).name();
        let info = self
            .version
            .as_ref()
            .ok_or_else(|| CliError::config(format!("no version set for `{program}`")))?;
        info.write_line(program, out)
            .and_then(|()| out.flush())
            .map_err(|e| CliError::output(format!("version of `{program}`"), e))
    }

    /// Whether `flag` is the injected help flag
    pub fn is_help_flag(&self, flag: &Flag) -> bool {
        flag.collides_with(&self.config.help.flag())
    }

    /// Whether `flag` is the version flag and a version is set
    pub fn is_version_flag(&self, flag: &Flag) -> bool {
        self.version.is_some() && flag.collides_with(&self.config.version.flag())
    }

    fn checked(&self, id: CommandId) -> Result<&Command> {
        self.get(id).ok_or(CliError::UnknownCommand { id: id.0 })
    }

    fn check_flag(&self, flag: &Flag) -> Result<()> {
        if flag.names().next().is_none() {
            return Err(CliError::invalid_name(
                "flag",
                "",
                "a flag needs a short or a long name",
            ));
        }
        for name in flag.names() {
            self.rules.check_flag(name)?;
        }
        if flag.short_name == flag.long_name {
            return Err(CliError::invalid_name(
                "flag",
                flag.short_name.clone(),
                "short and long names are identical",
            ));
        }
        Ok(())
    }

    /// Validate declared flags and inject the help flag
    fn prepare(&self, mut command: Command) -> Result<Command> {
        let declared = std::mem::take(&mut command.flags);

        let help = self.config.help.flag();
        if !declared.iter().any(|flag| flag.collides_with(&help)) {
            command.flags.push(help);
        }

        for flag in declared {
            self.check_flag(&flag)?;
            if let Some(name) = command.clash(&flag) {
                return Err(CliError::duplicate_flag(&command.name, name));
            }
            command.flags.push(flag);
        }

        Ok(command)
    }
}

impl fmt::Debug for CommandTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandTree")
            .field("nodes", &self.nodes)
            .field("config", &self.config)
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}
