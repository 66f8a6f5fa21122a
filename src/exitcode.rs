//! Process exit codes, one per failure category.

/// Successful termination
pub const OK: i32 = 0;

/// No API token from `--token` or `DIRBLE_API_TOKEN`
pub const NO_TOKEN: i32 = 1;

/// Malformed or missing flag/positional argument
pub const BAD_PARAMETERS: i32 = 2;

/// Transport failure, non-2xx response or undecodable body
pub const HTTP: i32 = 3;

/// Result could not be serialized or written to stdout
pub const OUTPUT: i32 = 4;

/// First token matched no registered command
pub const UNKNOWN_COMMAND: i32 = 5;

/// Config file or environment override is malformed
pub const CONFIG: i32 = 6;
