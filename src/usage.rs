//! Usage text rendering.
//!
//! All functions return text; writing it somewhere and choosing an exit code
//! is left to the caller.

use crate::flags::{FlagKind, FlagSet};
use crate::registry::{Entry, Registry};

/// Top-level usage: the command list, global flags and the subcommand hint.
pub fn render_usage(registry: &Registry, program: &str) -> String {
    let mut out = String::new();

    if registry.is_empty() {
        out.push_str(&format!("Usage of {}:\n", program));
        out.push_str(&render_defaults(registry.global_flags()));
        return out;
    }

    out.push_str(&format!("Usage: {} <command>\n\n", program));
    out.push_str("where <command> is one of:\n");

    let width = registry
        .list()
        .map(|entry| entry.name().chars().count())
        .max()
        .unwrap_or(0)
        .max(registry.settings().name_width);
    for entry in registry.list() {
        let line = format!("  {:<width$} {}", entry.name(), entry.description());
        out.push_str(line.trim_end());
        out.push('\n');
    }

    if !registry.global_flags().is_empty() {
        out.push_str("\navailable flags:\n");
        out.push_str(&render_defaults(registry.global_flags()));
    }

    if registry.settings().subcommand_hint {
        out.push_str(&format!("\n{} <command> -h for subcommand help\n", program));
    }
    out
}

/// Usage of a single command: its flags and, if any, its required flags.
pub fn render_command_usage(entry: &Entry, program: &str) -> String {
    let mut out = format!("Usage of {} {}:\n", program, entry.name());
    out.push_str(&render_defaults(entry.flags()));

    if !entry.required_flags().is_empty() {
        out.push_str("\nrequired flags:\n");
        out.push_str(&format!("  {}\n\n", entry.required_flags().join(", ")));
    }
    out
}

/// Flag defaults in the classic layout, sorted by name:
///
/// ```text
///   -env string
///     	target environment (default "dev")
///   -v	verbose output
/// ```
///
/// The reserved help flag is never listed.
pub fn render_defaults(flags: &FlagSet) -> String {
    let mut specs: Vec<_> = flags.specs().iter().collect();
    specs.sort_by(|a, b| a.name().cmp(b.name()));

    let mut out = String::new();
    for spec in specs {
        let (type_name, usage) = spec.unquote_usage();

        let mut line = format!("  -{}", spec.name());
        if !type_name.is_empty() {
            line.push(' ');
            line.push_str(&type_name);
        }
        // One-char untyped flags keep their usage on the same line.
        if line.len() <= 4 {
            line.push('\t');
        } else {
            line.push_str("\n    \t");
        }
        line.push_str(&usage.replace('\n', "\n    \t"));

        if !spec.has_zero_default() {
            match spec.kind() {
                FlagKind::String => {
                    line.push_str(&format!(" (default {:?})", spec.default_value()))
                }
                _ => line.push_str(&format!(" (default {})", spec.default_value())),
            }
        }

        out.push_str(&line);
        out.push('\n');
    }
    out
}
