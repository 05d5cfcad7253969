//! Settings Module
//!
//! Presentation settings for usage rendering, with env overrides.

use crate::constants::NAME_COLUMN_WIDTH;
use crate::project_identity;

/// Usage rendering settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Minimum width of the command-name column; longer names widen it.
    pub name_width: usize,
    /// Append the `<program> <command> -h` hint to top-level usage.
    pub subcommand_hint: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            name_width: NAME_COLUMN_WIDTH,
            subcommand_hint: true,
        }
    }
}

impl Settings {
    /// Defaults overridden by `SUBCMD_NAME_WIDTH` and `SUBCMD_SUBCOMMAND_HINT`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Settings::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        let width_key = project_identity::env_key("NAME_WIDTH");
        if let Some(raw) = lookup(&width_key) {
            match raw.trim().parse::<usize>() {
                Ok(width) => settings.name_width = width,
                Err(_) => tracing::warn!(key = %width_key, value = %raw, "ignoring invalid column width"),
            }
        }

        let hint_key = project_identity::env_key("SUBCOMMAND_HINT");
        if let Some(raw) = lookup(&hint_key) {
            match raw.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => settings.subcommand_hint = true,
                "0" | "false" | "no" | "off" => settings.subcommand_hint = false,
                _ => tracing::warn!(key = %hint_key, value = %raw, "ignoring invalid hint toggle"),
            }
        }

        settings
    }
}
