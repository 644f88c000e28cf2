//! HTML entity escaping
//!
//! The host renders run text as HTML, so the engine escapes it, and the
//! selection mapper measures lengths over the escaped form to stay in the
//! same coordinate space as the rendered markup. Ampersand is replaced
//! first so already-produced entities are not double-escaped.

/// Escape the five HTML-significant characters
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Length of the escaped text in UTF-16 units, without allocating
///
/// Every entity replacement is pure ASCII, so an escaped character counts
/// as the entity's byte length; everything else keeps its own unit width.
pub fn escaped_unit_len(text: &str) -> usize {
    text.chars()
        .map(|ch| match ch {
            '&' => 5,
            '"' => 6,
            '<' => 4,
            '>' => 4,
            '\'' => 6,
            _ => ch.len_utf16(),
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_all_entities() {
        assert_eq!(escape("&\"<>'"), "&amp;&quot;&lt;&gt;&#x27;");
    }

    #[test]
    fn test_escape_passthrough() {
        assert_eq!(escape("Hello world"), "Hello world");
    }

    #[test]
    fn test_escaped_unit_len_matches_escape() {
        for text in ["plain", "a & b", "<tag>", "it's \"quoted\"", "x\u{1D11E}&y"] {
            assert_eq!(
                escaped_unit_len(text),
                crate::text::offsets::unit_len(&escape(text)),
                "mismatch for {text:?}"
            );
        }
    }
}
