//! Command implementations for the demo program

use crate::{
    config::Config,
    core::{Command, CommandTree, Flag, Invocation, is_flag},
    error::Result,
};
use anyhow::{Context, bail};
use std::io::Write;
use tracing::{debug, instrument};

/// Name the demo registers as its root command
pub const PROGRAM_NAME: &str = "cmdtree-demo";

/// Version reported by `-version`
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build identifier reported by `-version`, set through `CMDTREE_BUILD_ID` at
/// compile time
pub const BUILD_ID: &str = match option_env!("CMDTREE_BUILD_ID") {
    Some(id) => id,
    None => "dev",
};

/// Build the demo command tree
pub fn build_tree(config: &Config) -> Result<CommandTree> {
    let root = Command::new(PROGRAM_NAME, "Command tree demo")
        .with_long_description("Small program showing nested commands, flags and help.")
        .with_run(execute_root_command);
    let mut tree = CommandTree::from_command(root, config.clone())?;
    tree.set_version(VERSION, BUILD_ID)?;

    tree.add_command(
        tree.root(),
        Command::new("greet", "Greet people by name")
            .with_long_description("Prints a greeting for every name given, or for the world.")
            .with_flag(Flag::new("-l", "-loud", "Shout the greeting"))
            .with_run(execute_greet_command),
    )?;

    let math = tree.add_command(
        tree.root(),
        Command::new("math", "Arithmetic helpers").with_run(execute_math_command),
    )?;
    tree.add_command(
        math,
        Command::new("sum", "Add integers together")
            .with_long_description("Prints the sum of every integer argument.")
            .with_run(execute_sum_command),
    )?;

    Ok(tree)
}

/// Non-flag arguments of an invocation
fn positional<'a>(invocation: &'a Invocation<'_>) -> impl Iterator<Item = &'a str> {
    invocation
        .arguments()
        .iter()
        .map(String::as_str)
        .filter(|arg| !is_flag(arg))
}

/// Execute the root command
#[instrument(skip_all)]
fn execute_root_command(invocation: &Invocation<'_>) -> anyhow::Result<()> {
    if let Some(unknown) = positional(invocation).next() {
        bail!(
            "unknown command `{}`, run `{} -help` for a list",
            unknown,
            invocation.name()
        );
    }

    invocation.usage()?;
    Ok(())
}

/// Execute the greet command
#[instrument(skip_all)]
fn execute_greet_command(invocation: &Invocation<'_>) -> anyhow::Result<()> {
    let mut names: Vec<&str> = positional(invocation).collect();
    if names.is_empty() {
        names.push("world");
    }
    let loud = invocation.is_set("-loud");
    debug!(count = names.len(), loud, "greeting");

    let mut out = invocation.output();
    for name in names {
        let greeting = format!("Hello, {name}!");
        if loud {
            writeln!(out, "{}", greeting.to_uppercase())?;
        } else {
            writeln!(out, "{greeting}")?;
        }
    }

    Ok(())
}

/// Execute the math command
fn execute_math_command(invocation: &Invocation<'_>) -> anyhow::Result<()> {
    invocation.usage()?;
    Ok(())
}

/// Execute the sum command
#[instrument(skip_all)]
fn execute_sum_command(invocation: &Invocation<'_>) -> anyhow::Result<()> {
    let mut total: i64 = 0;
    for arg in positional(invocation) {
        let value: i64 = arg
            .parse()
            .with_context(|| format!("`{arg}` is not an integer"))?;
        total = total
            .checked_add(value)
            .context("sum does not fit in 64 bits")?;
    }
    debug!(total, "computed sum");

    let mut out = invocation.output();
    writeln!(out, "{total}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::CliError, utils::Output};

    fn run(args: &[&str]) -> (std::result::Result<(), CliError>, String) {
        let mut tree = build_tree(&Config::default()).unwrap();
        let (output, buffer) = Output::buffer();
        tree.set_output(output);
        let result = tree.execute(args);
        (result, buffer.contents())
    }

    #[test]
    fn test_greet() {
        let (result, out) = run(&["greet", "Ada", "Linus"]);
        assert!(result.is_ok());
        assert_eq!(out, "Hello, Ada!\nHello, Linus!\n");

        let (_, out) = run(&["greet"]);
        assert_eq!(out, "Hello, world!\n");

        let (_, out) = run(&["greet", "-loud", "ada"]);
        assert_eq!(out, "HELLO, ADA!\n");
    }

    #[test]
    fn test_nested_sum() {
        let (result, out) = run(&["math", "sum", "1", "2", "39"]);
        assert!(result.is_ok());
        assert_eq!(out, "42\n");
    }

    #[test]
    fn test_sum_rejects_non_numbers() {
        let (result, out) = run(&["math", "sum", "1", "two"]);
        let err = result.unwrap_err();
        assert!(err.is_handler());
        assert!(err.to_string().contains("`two` is not an integer"));
        assert!(out.is_empty());
    }

    #[test]
    fn test_root_help_and_unknown_command() {
        let (result, out) = run(&["-help"]);
        assert!(result.is_ok());
        assert!(out.contains("Commands:\n  greet\tGreet people by name\n  math\tArithmetic helpers\n"));

        let (result, _) = run(&["frobnicate"]);
        assert!(result.unwrap_err().to_string().contains("unknown command `frobnicate`"));
    }

    #[test]
    fn test_version_flag() {
        let (result, out) = run(&["-version"]);
        assert!(result.is_ok());
        assert_eq!(out, format!("cmdtree-demo version {VERSION} build {BUILD_ID}\n"));

        let (_, out) = run(&["-help"]);
        assert!(out.starts_with("usage: cmdtree-demo [-version] [-help] <command> [args]\n"));
        assert!(out.contains("  -version\tShow version information\n"));
    }

    #[test]
    fn test_math_help_lists_sum() {
        let (result, out) = run(&["math", "-h"]);
        assert!(result.is_ok());
        assert!(out.starts_with("usage: math [-help] <command> [args]\n"));
        assert!(out.contains("  sum\tAdd integers together\n"));
    }
}
