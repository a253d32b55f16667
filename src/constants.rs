/// Connections kept open even when idle
pub const DB_MIN_CONNECTIONS: u32 = 1;

/// How long a handler waits for a pooled connection (seconds)
pub const DB_ACQUIRE_TIMEOUT_SECS: u64 = 10;

/// Idle connections are closed after this many seconds
pub const DB_IDLE_TIMEOUT_SECS: u64 = 600;

/// Connections are recycled after this many seconds
pub const DB_MAX_LIFETIME_SECS: u64 = 1800;

/// Largest height NUMERIC(8, 1) can hold is 9_999_999.9
pub const MAX_SNAPSHOT_HEIGHT: i64 = 10_000_000;

/// Fractional digits kept for snapshot heights
pub const SNAPSHOT_HEIGHT_SCALE: u32 = 1;

// =============================================================================
// Error Messages
// =============================================================================

/// Generic message for every validation failure (never echoes input)
pub const MSG_BAD_REQUEST: &str = "bad request";

pub const MSG_USER_NOT_FOUND: &str = "user not found";

pub const MSG_PLANT_NOT_FOUND: &str = "plant not found";

pub const MSG_ROUTE_NOT_FOUND: &str = "route not found";

pub const MSG_METHOD_NOT_ALLOWED: &str = "method not allowed";

pub const MSG_INTERNAL_ERROR: &str = "internal server error";
