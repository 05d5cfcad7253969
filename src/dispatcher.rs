//! Command dispatcher
//!
//! Resolves the first argument to a registered command, parses its flags,
//! validates required flags and runs it. Nothing here prints or exits; see
//! [`crate::cli`] for that.

use crate::error::{DispatchError, Result};
use crate::flags::ParsedFlags;
use crate::registry::{Entry, Registry};

/// A matched, validated command ready to run.
#[derive(Debug)]
pub struct Invocation<'r> {
    entry: &'r Entry,
    flags: ParsedFlags,
}

impl<'r> Invocation<'r> {
    pub fn entry(&self) -> &'r Entry {
        self.entry
    }

    pub fn flags(&self) -> &ParsedFlags {
        &self.flags
    }

    /// Leftover positional arguments handed to the command.
    pub fn args(&self) -> &[String] {
        self.flags.args()
    }

    /// Run the matched command with its leftover arguments.
    pub fn run(self) -> Result<&'r Entry> {
        let entry = self.entry;
        entry
            .command()
            .run(&self.flags, self.flags.args())
            .map_err(|error| DispatchError::Run {
                command: entry.name().to_string(),
                error,
            })?;
        Ok(entry)
    }
}

impl Registry {
    /// Phase one: parse global flags. The leftovers start at the command name.
    pub fn parse_globals<S: AsRef<str>>(&self, args: &[S]) -> Result<ParsedFlags> {
        self.global_flags()
            .parse(args)
            .map_err(|error| DispatchError::FlagParse {
                command: None,
                error,
            })
    }

    /// Phase two: resolve `args[0]`, parse the rest against that command's
    /// flags and check required flags, without running anything.
    pub fn parse<S: AsRef<str>>(&self, args: &[S]) -> Result<Invocation<'_>> {
        if self.is_empty() {
            return Err(DispatchError::Usage);
        }
        let Some((name, rest)) = args.split_first() else {
            return Err(DispatchError::Usage);
        };

        let name = name.as_ref();
        let entry = self
            .lookup(name)
            .ok_or_else(|| DispatchError::NoSuchCommand {
                name: name.to_string(),
            })?;

        let flags = entry
            .flags()
            .parse(rest)
            .map_err(|error| DispatchError::FlagParse {
                command: Some(entry.name().to_string()),
                error,
            })?;

        if flags.help_requested() {
            return Err(DispatchError::HelpRequested {
                command: entry.name().to_string(),
            });
        }

        let missing = missing_required(entry.required_flags(), &flags);
        if !missing.is_empty() {
            return Err(DispatchError::MissingRequiredFlags {
                command: entry.name().to_string(),
                missing,
            });
        }

        tracing::debug!(
            command = entry.name(),
            flags = flags.set_flags().len(),
            args = flags.args().len(),
            "matched command"
        );
        Ok(Invocation { entry, flags })
    }

    /// Parse, validate and run. Returns the entry that ran.
    pub fn dispatch<S: AsRef<str>>(&self, args: &[S]) -> Result<&Entry> {
        self.parse(args)?.run()
    }
}

/// Required flags not explicitly supplied, sorted.
fn missing_required(required: &[String], flags: &ParsedFlags) -> Vec<String> {
    let mut missing: Vec<String> = required
        .iter()
        .filter(|name| !flags.is_set(name))
        .cloned()
        .collect();
    missing.sort();
    missing.dedup();
    missing
}
