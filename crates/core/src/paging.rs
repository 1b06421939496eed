//! Limit/offset bounds for list endpoints.

/// Page size when the client does not ask for one.
pub const DEFAULT_LIMIT: i64 = 50;

/// Largest page a client may request.
pub const MAX_LIMIT: i64 = 200;

/// Clamp a requested page size to `1..=max`, falling back to `default`.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).clamp(1, max)
}

/// Clamp a requested offset to be non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}
