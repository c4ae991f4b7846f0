//! Canonical field keys and event names for structured logging

pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";
pub const FIELD_SESSION_ID: &str = "session_id";

// Document addressing
pub const FIELD_PATH: &str = "path";
pub const FIELD_CATEGORY: &str = "category";
pub const FIELD_KIND: &str = "kind";
pub const FIELD_FIELD: &str = "field";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
