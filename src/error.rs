use crate::flags::FlagError;
use thiserror::Error;

/// Failures surfaced by the registry and dispatcher.
///
/// Variants raised after a command name matched carry that name, so callers
/// can pick between top-level usage and subcommand usage.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// No command given, or no commands registered at all.
    #[error("no command given")]
    Usage,

    #[error("unknown command '{name}'")]
    NoSuchCommand { name: String },

    /// The flag adapter rejected a token. `command` is `None` for global flags.
    #[error("{error}")]
    FlagParse {
        command: Option<String>,
        error: FlagError,
    },

    #[error("missing required flags for '{command}': {}", .missing.join(", "))]
    MissingRequiredFlags {
        command: String,
        missing: Vec<String>,
    },

    #[error("help requested for '{command}'")]
    HelpRequested { command: String },

    /// Whatever the command's run operation returned, unaltered. Displays
    /// the whole context chain of `error` and reports no source of its own.
    #[error("{error:#}")]
    Run {
        command: String,
        error: anyhow::Error,
    },

    #[error("Lock acquisition failed: {0}")]
    LockError(String),

    #[error("IO error: {0}")]
    StdIoError(#[from] std::io::Error),
}

impl DispatchError {
    /// Name of the matched command, if the failure happened after a match.
    pub fn command(&self) -> Option<&str> {
        match self {
            Self::FlagParse { command, .. } => command.as_deref(),
            Self::MissingRequiredFlags { command, .. }
            | Self::HelpRequested { command }
            | Self::Run { command, .. } => Some(command),
            _ => None,
        }
    }

    /// Sorted names of the required flags that were not supplied.
    pub fn missing_flags(&self) -> Option<&[String]> {
        match self {
            Self::MissingRequiredFlags { missing, .. } => Some(missing),
            _ => None,
        }
    }

    /// Unwraps the error a command's run operation produced.
    pub fn into_run_error(self) -> Option<anyhow::Error> {
        match self {
            Self::Run { error, .. } => Some(error),
            _ => None,
        }
    }

    /// True when top-level usage is the right response.
    pub fn wants_usage(&self) -> bool {
        matches!(self, Self::Usage | Self::NoSuchCommand { .. })
            || matches!(self, Self::FlagParse { command: None, .. })
    }
}

pub type Result<T> = std::result::Result<T, DispatchError>;
