use cmdtree::{
    CliError, Command, CommandTree, Flag, Invocation,
    core::{resolve_command, usage::Usage, usage::UsageRenderer},
    utils::{Output, SharedBuffer},
};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Records every invocation a handler sees
#[derive(Clone, Default)]
struct Recorder {
    calls: Arc<Mutex<Vec<(String, Vec<String>)>>>,
}

impl Recorder {
    fn handler(&self) -> impl Fn(&Invocation<'_>) -> anyhow::Result<()> + use<> {
        let calls = Arc::clone(&self.calls);
        move |invocation| {
            calls
                .lock()
                .unwrap()
                .push((invocation.name().to_string(), invocation.arguments().to_vec()));
            Ok(())
        }
    }

    fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

fn tree_with_sub(recorder: &Recorder) -> (CommandTree, SharedBuffer) {
    let root = Command::new("programName", "rootCommand Description")
        .with_long_description("rootCommand Long Description")
        .with_run(recorder.handler());
    let mut tree = CommandTree::from_command(root, Default::default()).unwrap();
    tree.add_command(
        tree.root(),
        Command::new("sub", "sub Description")
            .with_long_description("sub Long Description")
            .with_run(recorder.handler()),
    )
    .unwrap();

    let (output, buffer) = Output::buffer();
    tree.set_output(output);
    (tree, buffer)
}

#[test]
fn test_root_without_children_or_arguments() {
    let recorder = Recorder::default();
    let root = Command::new("programName", "root").with_run(recorder.handler());
    let tree = CommandTree::from_command(root, Default::default()).unwrap();

    tree.execute::<String>(&[]).unwrap();
    assert_eq!(recorder.calls(), [("programName".to_string(), Vec::<String>::new())]);
}

#[test]
fn test_sub_command_with_argument() {
    let recorder = Recorder::default();
    let (tree, buffer) = tree_with_sub(&recorder);

    tree.execute(&["sub", "argument1"]).unwrap();
    assert_eq!(
        recorder.calls(),
        [("sub".to_string(), vec!["argument1".to_string()])]
    );
    assert!(buffer.contents().is_empty());
}

#[test]
fn test_root_help_skips_handlers() {
    let recorder = Recorder::default();
    let (tree, buffer) = tree_with_sub(&recorder);

    tree.execute(&["-help"]).unwrap();
    assert!(recorder.calls().is_empty());

    let expected = "usage: programName [-help] <command> [args]\n\
                    \n  rootCommand Long Description\n\
                    \nCommands:\n  sub\tsub Description\n\
                    \nFlags:\n  -h, -help\tShow help message\n\
                    \nUse programName [command] -help for more information about a command.\n";
    assert_eq!(buffer.contents(), expected);
}

#[test]
fn test_sub_command_help_skips_handlers() {
    let recorder = Recorder::default();
    let (tree, buffer) = tree_with_sub(&recorder);

    tree.execute(&["sub", "-help"]).unwrap();
    assert!(recorder.calls().is_empty());

    let expected = "usage: sub [-help] <command> [args]\n\
                    \n  sub Long Description\n\
                    \nFlags:\n  -h, -help\tShow help message\n\
                    \nUse sub [command] -help for more information about a command.\n";
    assert_eq!(buffer.contents(), expected);
}

#[test]
fn test_help_flag_belongs_to_selected_command() {
    let recorder = Recorder::default();
    let (tree, buffer) = tree_with_sub(&recorder);

    // `-h` before `sub` is part of the root's tokens, not `sub`'s.
    tree.execute(&["-h", "sub"]).unwrap();
    assert_eq!(recorder.calls(), [("sub".to_string(), Vec::<String>::new())]);
    assert!(buffer.contents().is_empty());
}

#[test]
fn test_unknown_flags_and_commands_are_accepted() {
    let recorder = Recorder::default();
    let (tree, _) = tree_with_sub(&recorder);

    tree.execute(&["nope", "--whatever", "-x=1"]).unwrap();
    tree.execute(&["sub", "--whatever"]).unwrap();

    assert_eq!(
        recorder.calls(),
        [
            (
                "programName".to_string(),
                vec!["nope".to_string(), "--whatever".to_string(), "-x=1".to_string()]
            ),
            ("sub".to_string(), vec!["--whatever".to_string()]),
        ]
    );
}

#[test]
fn test_deep_tree_resolution() {
    let mut tree = CommandTree::new("programName", "root").unwrap();
    let a = tree.add_command(tree.root(), Command::new("cmdA", "")).unwrap();
    let b = tree.add_command(a, Command::new("cmdB", "")).unwrap();
    let c = tree
        .add_command(b, Command::new("cmdC", "").with_flag(Flag::new("-f", "-force", "")))
        .unwrap();

    let resolution = resolve_command(&tree, tree.root(), &["cmdA", "cmdB"]);
    assert_eq!(resolution.command, b);
    assert!(resolution.arguments.is_empty());

    let invocation = tree.resolve(&["cmdA", "-force", "cmdB", "cmdC", "-force", "x"]);
    assert_eq!(invocation.id(), c);
    assert_eq!(invocation.arguments(), ["-force", "x"]);
    assert!(invocation.is_set("-f"));

    // From a leaf, resolution never moves.
    let resolution = resolve_command(&tree, c, &["cmdA", "cmdB"]);
    assert_eq!(resolution.command, c);
}

#[test]
fn test_flag_parsed_only_on_selected_command() {
    let mut tree = CommandTree::new("programName", "root").unwrap();
    tree.add_flag(tree.root(), Flag::new("-v", "-verbose", "")).unwrap();
    tree.add_command(tree.root(), Command::new("sub", "")).unwrap();

    let invocation = tree.resolve(&["-v", "sub"]);
    assert_eq!(invocation.name(), "sub");
    assert!(!invocation.is_set("-v"));

    let invocation = tree.resolve(&["-v", "other"]);
    assert_eq!(invocation.name(), "programName");
    assert!(invocation.is_set("-verbose"));
}

#[test]
fn test_handler_error_is_returned_unchanged() {
    #[derive(Debug)]
    struct Quota(u32);

    impl std::fmt::Display for Quota {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "quota exceeded by {}", self.0)
        }
    }

    impl std::error::Error for Quota {}

    let mut tree = CommandTree::new("programName", "root").unwrap();
    tree.add_command(
        tree.root(),
        Command::new("upload", "").with_run(|_| Err(Quota(3).into())),
    )
    .unwrap();

    let err = tree.execute(&["upload"]).unwrap_err();
    assert_eq!(err.to_string(), "quota exceeded by 3");
    match err {
        CliError::Handler(inner) => assert_eq!(inner.downcast_ref::<Quota>().map(|q| q.0), Some(3)),
        other => panic!("Expected handler error, got {other:?}"),
    }
}

#[test]
fn test_handler_can_render_usage() {
    let root = Command::new("programName", "root").with_run(|invocation| {
        invocation.usage()?;
        Ok(())
    });
    let mut tree = CommandTree::from_command(root, Default::default()).unwrap();
    let (output, buffer) = Output::buffer();
    tree.set_output(output);

    tree.execute::<&str>(&[]).unwrap();
    assert!(buffer.contents().starts_with("usage: programName [-help]"));
}

#[test]
fn test_custom_renderer_receives_projection() {
    struct Names;

    impl UsageRenderer for Names {
        fn render(&self, usage: &Usage<'_>, out: &mut dyn Write) -> io::Result<()> {
            let children: Vec<_> = usage.commands.iter().map(|c| c.name).collect();
            let flags: Vec<_> = usage.flags.iter().map(|f| f.long_name).collect();
            writeln!(out, "{}|{}|{}", usage.name, children.join(","), flags.join(","))
        }
    }

    let mut tree = CommandTree::new("programName", "root").unwrap();
    tree.add_command(tree.root(), Command::new("a", "")).unwrap();
    tree.add_command(tree.root(), Command::new("b", "")).unwrap();
    tree.set_usage_renderer(Names);
    let (output, buffer) = Output::buffer();
    tree.set_output(output);

    tree.execute(&["-h"]).unwrap();
    assert_eq!(buffer.contents(), "programName|a,b|-help\n");
}

#[test]
fn test_concurrent_execution_on_shared_tree() {
    let mut tree = CommandTree::new("programName", "root").unwrap();
    tree.add_command(
        tree.root(),
        Command::new("echo", "").with_run(|invocation| {
            let mut out = invocation.output();
            writeln!(out, "{}", invocation.arguments().join(" "))?;
            Ok(())
        }),
    )
    .unwrap();
    let tree = Arc::new(tree);

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let tree = Arc::clone(&tree);
            std::thread::spawn(move || {
                let (output, buffer) = Output::buffer();
                let arg = format!("run{i}");
                tree.execute_with_output(&["echo", arg.as_str()], output)
                    .unwrap();
                buffer.contents()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), format!("run{i}\n"));
    }
}
