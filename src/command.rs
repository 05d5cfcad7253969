//! Command contract
//!
//! A command declares its flags once, at registration time, and is run with
//! the parsed flag values and the leftover positional arguments.

use crate::flags::{FlagSet, ParsedFlags};

/// A unit of work bound to a subcommand name.
pub trait Command: Send + Sync {
    /// Declare the command's flags. The default declares none.
    fn flags(&self, flags: &mut FlagSet) {
        let _ = flags;
    }

    /// Run the command. Errors are returned to the caller unaltered.
    fn run(&self, flags: &ParsedFlags, args: &[String]) -> anyhow::Result<()>;
}

impl<C: Command + ?Sized> Command for Box<C> {
    fn flags(&self, flags: &mut FlagSet) {
        (**self).flags(flags)
    }

    fn run(&self, flags: &ParsedFlags, args: &[String]) -> anyhow::Result<()> {
        (**self).run(flags, args)
    }
}

/// Adapter for flag-less commands: forwards positional arguments verbatim
/// to a plain function.
pub struct CmdFunc<F> {
    func: F,
}

impl<F> CmdFunc<F>
where
    F: Fn(&[String]) -> anyhow::Result<()> + Send + Sync,
{
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> Command for CmdFunc<F>
where
    F: Fn(&[String]) -> anyhow::Result<()> + Send + Sync,
{
    fn run(&self, _flags: &ParsedFlags, args: &[String]) -> anyhow::Result<()> {
        (self.func)(args)
    }
}
