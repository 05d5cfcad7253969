//! Central project identity contract.
//!
//! This module is the single source of truth for runtime identity values.

pub const BINARY_NAME: &str = "subcmd-demo";
pub const ENV_PREFIX: &str = "SUBCMD";

pub fn env_key(suffix: &str) -> String {
    format!("{}_{}", ENV_PREFIX, suffix)
}

/// Env var holding the `tracing` filter for binaries built on this crate.
pub fn log_env_key() -> String {
    env_key("LOG")
}
