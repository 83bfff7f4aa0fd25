//! Process exit codes
//!
//! Usage errors keep clap's conventional code; the rest identify which stage failed.

/// Success - both outputs written
pub const SUCCESS: u8 = 0;

/// Usage error - missing or invalid arguments (reported by clap)
pub const USAGE_ERROR: u8 = 2;

/// Source error - the connections file does not exist or cannot be read
pub const SOURCE_ERROR: u8 = 3;

/// Parse error - the connections file is not a YAML mapping of connections
pub const PARSE_ERROR: u8 = 4;

/// Template error - template missing or failed to render
pub const TEMPLATE_ERROR: u8 = 5;

/// IO error - output could not be written, executable directory unknown
pub const IO_ERROR: u8 = 6;
