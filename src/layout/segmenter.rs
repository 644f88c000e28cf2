//! Segmentation of text into plain and annotated runs
//!
//! Turns the flat annotation set into an ordered, gap-free decomposition of
//! the text. Overlap detection relies on the scan order: annotations are
//! sorted ascending by span start, so a span starting before `last_idx`
//! overlaps its predecessor in start order, and any overlap with an earlier
//! span necessarily shows up against the immediate predecessor first. One
//! comparison per annotation is therefore sufficient; no pairwise check.

use serde::{Deserialize, Serialize};

use crate::models::{Annotation, AnnotationStore};
use crate::text::{offsets, tokenize};

/// A contiguous run of text, derived for display and never stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment {
    Plain { text: String },
    Annotated { text: String, annotation: Annotation },
}

impl Segment {
    /// The raw text this run covers
    pub fn text(&self) -> &str {
        match self {
            Self::Plain { text } => text,
            Self::Annotated { text, .. } => text,
        }
    }

    /// The annotation backing this run, if any
    pub fn annotation(&self) -> Option<&Annotation> {
        match self {
            Self::Plain { .. } => None,
            Self::Annotated { annotation, .. } => Some(annotation),
        }
    }
}

/// Ordered decomposition of the text
///
/// On success the concatenated segment texts reproduce the text exactly
/// once. On failure (`ok == false`) the segments are the whole text as
/// tokenized plain runs, so the host always has something renderable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segmentation {
    pub ok: bool,
    pub segments: Vec<Segment>,
}

impl Segmentation {
    /// Number of rendered leaves
    pub fn leaf_count(&self) -> usize {
        self.segments.len()
    }
}

/// Decompose the text against the store's annotations (unit spans)
pub fn segment(text: &str, store: &AnnotationStore) -> Segmentation {
    let mut items: Vec<&Annotation> = store.iter().collect();
    // stable order: span start, then id, so equal starts render deterministically
    items.sort_by_key(|item| (item.span.start, item.id));

    let total_units = offsets::unit_len(text);
    let mut segments = Vec::new();
    let mut last_idx = 0;
    for item in items {
        if item.span.start < last_idx || item.span.end() > total_units {
            return fallback(text);
        }
        let Some(gap) = offsets::slice_units(text, last_idx, item.span.start) else {
            return fallback(text);
        };
        let Some(body) = offsets::slice_units(text, item.span.start, item.span.end()) else {
            return fallback(text);
        };
        push_plain(&mut segments, gap);
        segments.push(Segment::Annotated {
            text: body.to_string(),
            annotation: item.clone(),
        });
        last_idx = item.span.end();
    }
    if let Some(tail) = offsets::slice_units(text, last_idx, total_units) {
        push_plain(&mut segments, tail);
    }
    Segmentation { ok: true, segments }
}

/// Whole text as tokenized plain runs, used when validation fails
fn fallback(text: &str) -> Segmentation {
    let mut segments = Vec::new();
    push_plain(&mut segments, text);
    Segmentation {
        ok: false,
        segments,
    }
}

fn push_plain(segments: &mut Vec<Segment>, text: &str) {
    for token in tokenize::split_tokens(text) {
        segments.push(Segment::Plain {
            text: token.to_string(),
        });
    }
}
