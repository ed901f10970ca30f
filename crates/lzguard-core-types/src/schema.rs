//! Canonical schema constants for structured logging and events
//!
//! These constants keep guard log output consistent across crates.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";
pub const FIELD_TRACE_ID: &str = "trace_id";

// Guard identifiers
pub const FIELD_RULE_ID: &str = "rule_id";
pub const FIELD_RULE_GROUP: &str = "rule_group";
pub const FIELD_CONFIG_PATH: &str = "config_path";
pub const FIELD_VERDICT: &str = "verdict";

// Collection sizes
pub const FIELD_DIFF_LEN: &str = "diff_len";
pub const FIELD_VIOLATION_COUNT: &str = "violation_count";
pub const FIELD_FIELD_ERROR_COUNT: &str = "field_error_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
