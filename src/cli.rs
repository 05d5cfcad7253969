//! Thin process wrapper around the dispatcher.
//!
//! Maps dispatch outcomes to usage output and exit codes. This is the only
//! place that writes to a stream or terminates the process.

use crate::constants::{EXIT_FAILURE, EXIT_SUCCESS, EXIT_USAGE};
use crate::error::{DispatchError, Result};
use crate::project_identity;
use crate::registry::Registry;
use crate::usage::{render_command_usage, render_usage};
use std::io::{self, Write};
use std::path::Path;

/// Program name shown in usage: the basename of `argv[0]`.
pub fn program_name(argv0: &str) -> String {
    Path::new(argv0)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| argv0.to_string())
}

/// Run `argv` (program name first) against `registry`, writing usage and
/// errors to `out`. Returns the process exit code.
pub fn execute<I, S, W>(registry: &Registry, argv: I, out: &mut W) -> Result<i32>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
    W: Write,
{
    let argv: Vec<String> = argv.into_iter().map(Into::into).collect();
    let (program, rest) = match argv.split_first() {
        Some((argv0, rest)) => (program_name(argv0), rest),
        None => (project_identity::BINARY_NAME.to_string(), &argv[..]),
    };

    let globals = match registry.parse_globals(rest) {
        Ok(globals) => globals,
        Err(err) => return report(registry, &program, err, out),
    };
    if globals.help_requested() {
        write!(out, "{}", render_usage(registry, &program))?;
        return Ok(EXIT_SUCCESS);
    }

    match registry.dispatch(globals.args()) {
        Ok(entry) => {
            tracing::debug!(command = entry.name(), "command finished");
            Ok(EXIT_SUCCESS)
        }
        Err(err) => report(registry, &program, err, out),
    }
}

fn report<W: Write>(
    registry: &Registry,
    program: &str,
    err: DispatchError,
    out: &mut W,
) -> Result<i32> {
    let command_usage = err
        .command()
        .and_then(|name| registry.lookup(name))
        .map(|entry| render_command_usage(entry, program));

    match err {
        DispatchError::HelpRequested { .. } => {
            write!(out, "{}", command_usage.unwrap_or_default())?;
            Ok(EXIT_SUCCESS)
        }
        DispatchError::Usage => {
            write!(out, "{}", render_usage(registry, program))?;
            Ok(EXIT_USAGE)
        }
        DispatchError::NoSuchCommand { .. } | DispatchError::FlagParse { command: None, .. } => {
            writeln!(out, "error: {}", err)?;
            write!(out, "{}", render_usage(registry, program))?;
            Ok(EXIT_USAGE)
        }
        DispatchError::FlagParse { .. } | DispatchError::MissingRequiredFlags { .. } => {
            writeln!(out, "error: {}", err)?;
            match command_usage {
                Some(usage) => write!(out, "{}", usage)?,
                None => write!(out, "{}", render_usage(registry, program))?,
            }
            Ok(EXIT_USAGE)
        }
        DispatchError::Run { error, .. } => {
            writeln!(out, "error: {:#}", error)?;
            Ok(EXIT_FAILURE)
        }
        DispatchError::LockError(_) | DispatchError::StdIoError(_) => {
            writeln!(out, "error: {}", err)?;
            Ok(EXIT_FAILURE)
        }
    }
}

/// Run the process arguments against `registry` and exit. Output goes to
/// stderr.
pub fn run_and_exit(registry: &Registry) -> ! {
    let code = {
        let mut stderr = io::stderr().lock();
        match execute(registry, std::env::args(), &mut stderr) {
            Ok(code) => code,
            Err(e) => {
                let _ = writeln!(stderr, "error: {}", e);
                EXIT_FAILURE
            }
        }
    };
    std::process::exit(code)
}
