// Common constants used throughout the codebase

/// Minimum width of the command-name column in top-level usage
pub const NAME_COLUMN_WIDTH: usize = 15;

/// Id and long name of the reserved help flag
pub const HELP_FLAG_ID: &str = "help";

/// Short alias of the reserved help flag (`-h`)
pub const HELP_FLAG_ALIAS: &str = "h";

/// Exit code after a successful run or an explicit help request
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code when a command's run operation fails
pub const EXIT_FAILURE: i32 = 1;

/// Exit code when usage text is printed because the invocation was invalid
pub const EXIT_USAGE: i32 = 2;

/// Log filter used when the log env var is unset
pub const DEFAULT_LOG_FILTER: &str = "warn";
