//! Log sanitization utilities
//!
//! Keeps API tokens and oversized provider payloads out of debug/error logs.

/// Maximum number of bytes of a payload included in log output.
const TRUNCATE_LIMIT: usize = 256;

/// Number of leading token characters kept by [`redact_token`].
const TOKEN_VISIBLE_PREFIX: usize = 4;

/// MSRV-compatible replacement for `str::floor_char_boundary` (stable since 1.91.0).
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

/// Truncate a string for safe logging.
///
/// Returns the original string if it's within the limit, otherwise the first
/// `TRUNCATE_LIMIT` bytes (on a char boundary) with a suffix giving the total length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

/// Mask a bearer token, keeping a short prefix so operators can tell tokens apart.
///
/// Tokens shorter than twice the visible prefix are fully masked.
pub fn redact_token(token: &str) -> String {
    if token.is_empty() {
        return "<empty>".to_string();
    }
    if token.chars().count() < TOKEN_VISIBLE_PREFIX * 2 {
        return "****".to_string();
    }
    let prefix: String = token.chars().take(TOKEN_VISIBLE_PREFIX).collect();
    format!("{prefix}****")
}
