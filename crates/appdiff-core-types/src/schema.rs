//! Canonical schema constants for structured logging and events
//!
//! `tracing` macros take field names as identifiers, so emitters spell the
//! keys out; these constants are for readers of captured events.

// Lifecycle fields
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Correlation
pub const FIELD_REQUEST_ID: &str = "request_id";
pub const FIELD_COMMAND: &str = "command";
pub const FIELD_APP_ID: &str = "app_id";

// Error fields
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
