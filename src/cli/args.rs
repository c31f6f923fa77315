//! Process argument access for the demo program

/// Arguments after the program name, lossily converted to UTF-8
pub fn program_args() -> Vec<String> {
    collect_args(std::env::args_os())
}

fn collect_args<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = std::ffi::OsString>,
{
    args.into_iter()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect()
}
