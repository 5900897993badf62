//! Quote escaping for PO keys, values and comments.
//!
//! Only double quotes are escaped; every other character, backslashes
//! included, is written and read verbatim.

/// Marker left between two quoted fragments of a value that spans several
/// physical lines.
pub const CONTINUATION_MARKER: &str = "\"\n\"";

/// Escapes `"` as `\"`.
///
/// # Example
/// ```rust
/// assert_eq!(pocodec::escape::escape(r#"He said "hi""#), r#"He said \"hi\""#);
/// ```
pub fn escape(text: &str) -> String {
    text.replace('"', "\\\"")
}

/// Reverses [`escape`], turning `\"` back into `"`.
pub fn unescape(text: &str) -> String {
    text.replace("\\\"", "\"")
}

/// Removes every continuation marker, joining the fragments of a
/// multi-line value into one logical string.
pub fn strip_continuations(text: &str) -> String {
    text.replace(CONTINUATION_MARKER, "")
}
