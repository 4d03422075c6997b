use once_cell::sync::Lazy;
use regex::Regex;

// Hex codes, named colors, and rgb()/rgba()/hsl() notation all fit this
// class; attribute-breakout characters (`<`, `"`, `;`) do not. Values that
// pass are not verified to be valid CSS colors.
static COLOR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[#\w(),.\s%-]+$").unwrap());

/// Escapes a string for use as an XML text node or attribute value.
///
/// Ampersand is replaced first so entities introduced by the later
/// replacements are not escaped twice.
pub fn escape_text(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Validates a color-like attribute value against a whitelist, returning the
/// trimmed, escaped value on success and `fallback` otherwise.
///
/// An absent value yields the fallback. An explicit empty string is not
/// absent: it fails the whitelist and also yields the fallback. Fallbacks
/// are trusted literals such as `"black"` and are returned unescaped.
pub fn sanitize_color(value: Option<&str>, fallback: &str) -> String {
    let Some(value) = value else {
        return fallback.to_string();
    };
    let trimmed = value.trim();
    if COLOR_RE.is_match(trimmed) {
        escape_text(trimmed)
    } else {
        fallback.to_string()
    }
}
