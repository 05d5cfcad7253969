//! Subcommand registry and dispatch for command-line programs.
//!
//! Register named commands (each with its own flags, description and
//! required flags) on a [`Registry`], then hand it the argument vector:
//!
//! ```
//! use subcmd::{CmdFunc, Registry};
//!
//! let mut registry = Registry::new();
//! registry.add("hello", "print a greeting", CmdFunc::new(|args: &[String]| {
//!     println!("hello, {}", args.join(" "));
//!     Ok(())
//! }));
//!
//! let entry = registry.dispatch(&["hello", "world"]).unwrap();
//! assert_eq!(entry.name(), "hello");
//! ```
//!
//! [`cli::run_and_exit`] wraps dispatch with usage output and exit codes.

pub mod cli;
pub mod command;
pub mod constants;
pub mod dispatcher;
pub mod error;
pub mod flags;
pub mod global;
pub mod project_identity;
pub mod registry;
pub mod settings;
pub mod usage;

pub use command::{CmdFunc, Command};
pub use dispatcher::Invocation;
pub use error::{DispatchError, Result};
pub use flags::{FlagError, FlagKind, FlagSet, FlagSpec, ParsedFlags};
pub use registry::{Entry, Registry};
pub use settings::Settings;
pub use usage::{render_command_usage, render_defaults, render_usage};
