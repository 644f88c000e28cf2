//! Offset unit conversion
//!
//! Two offset units coexist: the public API counts Unicode code points,
//! while all internal span arithmetic counts UTF-16 code units (the unit the
//! hosting page's DOM selection offsets are expressed in). A code point
//! outside the BMP is one code point but two units. Rust strings add a third
//! unit, bytes, which only matters for slicing and never leaks out of this
//! module.

use crate::models::Span;

/// Length of the text in UTF-16 units
pub fn unit_len(text: &str) -> usize {
    text.chars().map(char::len_utf16).sum()
}

/// Map a unit offset to the equivalent byte offset
///
/// Returns `None` when the offset is past the end of the text or falls
/// between the two units of a surrogate-pair character.
pub fn unit_to_byte(text: &str, unit_offset: usize) -> Option<usize> {
    let mut units = 0;
    if unit_offset == 0 {
        return Some(0);
    }
    for (byte_idx, ch) in text.char_indices() {
        if units == unit_offset {
            return Some(byte_idx);
        }
        if units > unit_offset {
            return None;
        }
        units += ch.len_utf16();
    }
    if units == unit_offset {
        Some(text.len())
    } else {
        None
    }
}

/// Slice the text by unit offsets, `None` if either offset is misaligned
pub fn slice_units(text: &str, start: usize, end: usize) -> Option<&str> {
    if end < start {
        return None;
    }
    let byte_start = unit_to_byte(text, start)?;
    let byte_end = unit_to_byte(text, end)?;
    Some(&text[byte_start..byte_end])
}

/// Longest prefix of the text occupying at most `units` UTF-16 units
///
/// A budget landing inside a surrogate pair stops before it, mirroring how
/// a DOM offset clamps to the nearest representable boundary.
pub fn prefix_units(text: &str, units: usize) -> &str {
    let mut used = 0;
    for (byte_idx, ch) in text.char_indices() {
        if used + ch.len_utf16() > units {
            return &text[..byte_idx];
        }
        used += ch.len_utf16();
    }
    text
}

/// Convert a code-point span to the equivalent unit span
///
/// Scans the text once; a span whose start or end is past the text clamps
/// to the end. Code points before the start each contribute their unit
/// width to the start; code points inside contribute to the length.
pub fn span_to_units(text: &str, span: Span) -> Span {
    let mut cp = 0;
    let mut unit_start = 0;
    let mut unit_len = 0;
    for ch in text.chars() {
        if cp < span.start {
            unit_start += ch.len_utf16();
        } else if cp < span.start + span.length {
            unit_len += ch.len_utf16();
        } else {
            break;
        }
        cp += 1;
    }
    Span::new(unit_start, unit_len)
}

/// Convert a unit span back to code points (inverse of [`span_to_units`])
///
/// Offsets must be aligned to code-point boundaries; a lone half of a
/// surrogate pair cannot be represented and the affected count clamps at
/// the last full code point.
pub fn span_to_code_points(text: &str, span: Span) -> Span {
    let mut units = 0;
    let mut cp_start = 0;
    let mut cp_len = 0;
    for ch in text.chars() {
        if units < span.start {
            cp_start += 1;
        } else if units < span.start + span.length {
            cp_len += 1;
        } else {
            break;
        }
        units += ch.len_utf16();
    }
    Span::new(cp_start, cp_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    // '𝄞' (U+1D11E) is one code point, two UTF-16 units, four bytes
    const CLEF: &str = "\u{1D11E}";

    #[test]
    fn test_unit_len_ascii() {
        assert_eq!(unit_len("Hello world"), 11);
    }

    #[test]
    fn test_unit_len_astral() {
        let text = format!("{CLEF}ab");
        assert_eq!(unit_len(&text), 4);
    }

    #[test]
    fn test_unit_to_byte_alignment() {
        let text = format!("a{CLEF}b");
        assert_eq!(unit_to_byte(&text, 0), Some(0));
        assert_eq!(unit_to_byte(&text, 1), Some(1));
        // offset 2 is inside the surrogate pair
        assert_eq!(unit_to_byte(&text, 2), None);
        assert_eq!(unit_to_byte(&text, 3), Some(5));
        assert_eq!(unit_to_byte(&text, 4), Some(6));
        assert_eq!(unit_to_byte(&text, 5), None);
    }

    #[test]
    fn test_slice_units() {
        let text = format!("ab{CLEF}cd");
        assert_eq!(slice_units(&text, 0, 2), Some("ab"));
        assert_eq!(slice_units(&text, 2, 4), Some(CLEF));
        assert_eq!(slice_units(&text, 4, 6), Some("cd"));
        assert_eq!(slice_units(&text, 2, 3), None);
        assert_eq!(slice_units(&text, 3, 2), None);
    }

    #[test]
    fn test_prefix_units_clamps_inside_pair() {
        let text = format!("a{CLEF}b");
        assert_eq!(prefix_units(&text, 0), "");
        assert_eq!(prefix_units(&text, 1), "a");
        // budget of 2 cannot fit half of the pair
        assert_eq!(prefix_units(&text, 2), "a");
        assert_eq!(prefix_units(&text, 3), format!("a{CLEF}"));
        assert_eq!(prefix_units(&text, 99), text);
    }

    #[test]
    fn test_span_round_trip_ascii() {
        let text = "Hello world";
        let cp = Span::new(6, 5);
        let units = span_to_units(text, cp);
        assert_eq!(units, Span::new(6, 5));
        assert_eq!(span_to_code_points(text, units), cp);
    }

    #[test]
    fn test_span_round_trip_astral() {
        // surrogate-pair char at logical position 0
        let text = format!("{CLEF}Hello");
        let cp = Span::new(0, 1);
        let units = span_to_units(&text, cp);
        assert_eq!(units, Span::new(0, 2));
        assert_eq!(span_to_code_points(&text, units), cp);

        let cp = Span::new(1, 5);
        let units = span_to_units(&text, cp);
        assert_eq!(units, Span::new(2, 5));
        assert_eq!(span_to_code_points(&text, units), cp);
    }

    #[test]
    fn test_span_clamps_past_end() {
        let text = "abc";
        assert_eq!(span_to_units(text, Span::new(1, 10)), Span::new(1, 2));
        assert_eq!(span_to_code_points(text, Span::new(1, 10)), Span::new(1, 2));
    }
}
