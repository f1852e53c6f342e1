//! Standard exit codes (BSD sysexits.h compatible)

/// Successful termination
pub const OK: i32 = 0;

/// Lookup found nothing
pub const NOT_FOUND: i32 = 1;

/// Command line usage error
pub const USAGE: i32 = 64;

/// Data format error
pub const DATAERR: i32 = 65;

/// Service unavailable
pub const UNAVAILABLE: i32 = 69;

/// Internal software error
pub const SOFTWARE: i32 = 70;

/// Temporary failure, user is invited to retry
pub const TEMPFAIL: i32 = 75;

/// Configuration error
pub const CONFIG: i32 = 78;
