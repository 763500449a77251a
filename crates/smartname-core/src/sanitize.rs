const RESERVED_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];
pub const FALLBACK_NAME: &str = "unnamed";

/// Makes a candidate base name safe to use as a filename.
///
/// Reserved characters become `_`, leading and trailing spaces and dots are
/// trimmed, and an empty result becomes [`FALLBACK_NAME`]. Applying it twice
/// gives the same result as applying it once.
pub fn sanitize_filename(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| if RESERVED_CHARS.contains(&c) { '_' } else { c })
        .collect();

    let trimmed = replaced.trim_matches(|c| c == ' ' || c == '.');
    if trimmed.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}
