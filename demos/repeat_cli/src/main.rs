//! `repeat` demo: a two-level command tree whose flags come from arguments,
//! `REPEAT_*` environment variables, and an optional config file.

mod cli;
mod usage;

use std::io::{self, Write};
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

fn main() -> color_eyre::Result<ExitCode> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let mut root = cli::build()?;
    let args = std::env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned());
    match root.parse_and_run(args, &cli::options()) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) if err.is_help_request() => {
            usage::write(&mut io::stdout().lock(), root.selected())?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) if err.is_no_exec() => {
            let mut stderr = io::stderr().lock();
            usage::write(&mut stderr, root.selected())?;
            writeln!(stderr, "\n{err}")?;
            Ok(ExitCode::from(2))
        }
        Err(err) => Err(err.into()),
    }
}
