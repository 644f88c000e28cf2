//! Selection mapping
//!
//! Maps a host-reported selection (two leaf/offset boundaries in the
//! rendered surface) onto a span over the whole text. The accumulation runs
//! over the escaped representation of each leaf: escaping changes lengths
//! (`&` renders as `&amp;`), and both the per-leaf contributions and the
//! boundary's local offset must be measured in the same space for the sums
//! to line up with the rendered markup.

use crate::layout::Segmentation;
use crate::models::{SelectionBoundary, SelectionSpan, SurfaceNode};
use crate::text::{escape, offsets};

/// Resolve two boundaries to absolute unit offsets over the text
///
/// Returns `None` when either boundary sits outside the managed surface,
/// names a leaf the current view does not have, or the end leaf precedes
/// the start leaf. `None` is a non-event, not an error. Backwards offsets
/// within one leaf are normalized so the result always has `start <= end`.
pub fn map_selection(
    view: &Segmentation,
    start: SelectionBoundary,
    end: SelectionBoundary,
) -> Option<SelectionSpan> {
    let start_leaf = leaf_index(start.node, view)?;
    let end_leaf = leaf_index(end.node, view)?;
    if end_leaf < start_leaf {
        return None;
    }

    let mut counter = 0;
    let mut start_abs = None;
    for (i, segment) in view.segments.iter().enumerate() {
        let text = segment.text();
        if i == start_leaf {
            start_abs = Some(counter + local_offset(text, start.offset));
        }
        if i == end_leaf {
            let end_abs = counter + local_offset(text, end.offset);
            let start_abs = start_abs?;
            return Some(if end_abs < start_abs {
                SelectionSpan::new(end_abs, start_abs)
            } else {
                SelectionSpan::new(start_abs, end_abs)
            });
        }
        counter += escape::escaped_unit_len(text);
    }
    None
}

fn leaf_index(node: SurfaceNode, view: &Segmentation) -> Option<usize> {
    match node {
        SurfaceNode::Leaf(index) if index < view.leaf_count() => Some(index),
        _ => None,
    }
}

/// Escaped length of the first `offset` units of the leaf's raw text
fn local_offset(text: &str, offset: usize) -> usize {
    escape::escaped_unit_len(offsets::prefix_units(text, offset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Segment;

    fn view(texts: &[&str]) -> Segmentation {
        Segmentation {
            ok: true,
            segments: texts
                .iter()
                .map(|t| Segment::Plain {
                    text: t.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_map_within_single_leaf() {
        let view = view(&["Hello", " ", "world"]);
        let span = map_selection(
            &view,
            SelectionBoundary::leaf(0, 1),
            SelectionBoundary::leaf(0, 4),
        )
        .unwrap();
        assert_eq!(span, SelectionSpan::new(1, 4));
    }

    #[test]
    fn test_map_across_leaves() {
        let view = view(&["Hello", " ", "world"]);
        // from inside "Hello" to inside "world"
        let span = map_selection(
            &view,
            SelectionBoundary::leaf(0, 2),
            SelectionBoundary::leaf(2, 3),
        )
        .unwrap();
        assert_eq!(span, SelectionSpan::new(2, 9));
    }

    #[test]
    fn test_escaping_shifts_later_leaves() {
        // "a&b" renders as "a&amp;b" (7 units), so leaf 1 starts at 7
        let view = view(&["a&b", "xyz"]);
        let span = map_selection(
            &view,
            SelectionBoundary::leaf(1, 0),
            SelectionBoundary::leaf(1, 2),
        )
        .unwrap();
        assert_eq!(span, SelectionSpan::new(7, 9));
    }

    #[test]
    fn test_escaping_inside_boundary_prefix() {
        // local offset 2 covers "a&", which escapes to "a&amp;" (6 units)
        let view = view(&["a&b"]);
        let span = map_selection(
            &view,
            SelectionBoundary::leaf(0, 2),
            SelectionBoundary::leaf(0, 3),
        )
        .unwrap();
        assert_eq!(span, SelectionSpan::new(6, 7));
    }

    #[test]
    fn test_foreign_node_returns_none() {
        let view = view(&["Hello"]);
        assert!(map_selection(
            &view,
            SelectionBoundary::foreign(),
            SelectionBoundary::leaf(0, 2),
        )
        .is_none());
        assert!(map_selection(
            &view,
            SelectionBoundary::leaf(0, 0),
            SelectionBoundary::foreign(),
        )
        .is_none());
    }

    #[test]
    fn test_out_of_range_leaf_returns_none() {
        let view = view(&["Hello"]);
        assert!(map_selection(
            &view,
            SelectionBoundary::leaf(0, 0),
            SelectionBoundary::leaf(3, 1),
        )
        .is_none());
    }

    #[test]
    fn test_backwards_offsets_in_one_leaf_normalize() {
        // dragging right-to-left inside a leaf reports the anchor after the
        // focus; the mapped span is the same as the forward drag
        let view = view(&["Hello", " ", "world"]);
        let span = map_selection(
            &view,
            SelectionBoundary::leaf(0, 4),
            SelectionBoundary::leaf(0, 1),
        )
        .unwrap();
        assert_eq!(span, SelectionSpan::new(1, 4));
    }

    #[test]
    fn test_backwards_leaves_return_none() {
        let view = view(&["Hello", "world"]);
        assert!(map_selection(
            &view,
            SelectionBoundary::leaf(1, 0),
            SelectionBoundary::leaf(0, 2),
        )
        .is_none());
    }

    #[test]
    fn test_offset_past_leaf_clamps() {
        let view = view(&["abc"]);
        let span = map_selection(
            &view,
            SelectionBoundary::leaf(0, 0),
            SelectionBoundary::leaf(0, 99),
        )
        .unwrap();
        assert_eq!(span, SelectionSpan::new(0, 3));
    }
}
