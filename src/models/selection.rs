//! Selection state
//!
//! Transient description of the user's current text selection. Never part
//! of persisted state: the engine clears it when a commit resolves either
//! way or when the host reports a collapsed selection.

use serde::{Deserialize, Serialize};

/// An uncommitted selection over the whole text, in UTF-16 units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSpan {
    pub start: usize,
    pub end: usize,
}

impl SelectionSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// A collapsed selection cannot become an annotation
    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    /// Length in units
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Where a selection boundary sits in the rendered surface
///
/// `Leaf` indexes into the segment list last produced by the segmenter.
/// `Foreign` marks a node outside the managed surface; a selection touching
/// one is ignored rather than partially mapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceNode {
    Leaf(usize),
    Foreign,
}

/// One end of a selection as reported by the host
///
/// `offset` is a UTF-16 unit offset into the leaf's raw rendered text
/// (DOM `textContent` semantics).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionBoundary {
    pub node: SurfaceNode,
    pub offset: usize,
}

impl SelectionBoundary {
    pub fn new(node: SurfaceNode, offset: usize) -> Self {
        Self { node, offset }
    }

    /// Boundary in the leaf at `index`
    pub fn leaf(index: usize, offset: usize) -> Self {
        Self::new(SurfaceNode::Leaf(index), offset)
    }

    /// Boundary outside the managed surface
    pub fn foreign() -> Self {
        Self::new(SurfaceNode::Foreign, 0)
    }
}
