//! Color token handling.

/// Color used when a description or project leaves a color empty.
pub const DEFAULT_COLOR: &str = "#FFFFFF";

/// Canonicalize a color token: trim, ensure a leading `#`, uppercase.
///
/// No hex-digit validation happens here; see [`is_valid_hex_color`].
pub fn normalize_color(color: &str) -> String {
    let trimmed = color.trim();
    let body = trimmed.strip_prefix('#').unwrap_or(trimmed);
    format!("#{}", body.to_uppercase())
}

/// Normalize, substituting [`DEFAULT_COLOR`] for empty input.
pub fn normalize_or_default(color: &str) -> String {
    if color.trim().is_empty() {
        DEFAULT_COLOR.to_string()
    } else {
        normalize_color(color)
    }
}

/// Strict check: `#` followed by exactly 3, 6 or 8 hex digits.
///
/// A missing leading `#` is tolerated, matching the editor this format comes from.
pub fn is_valid_hex_color(color: &str) -> bool {
    let trimmed = color.trim();
    if trimmed.is_empty() {
        return false;
    }
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
    matches!(digits.len(), 3 | 6 | 8) && digits.chars().all(|c| c.is_ascii_hexdigit())
}
