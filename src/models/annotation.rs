//! Annotation data model
//!
//! Pure data types for labeled spans over an immutable text. Spans are
//! half-open `[start, start + length)` intervals. Whether a span's numbers
//! are code points or UTF-16 units depends on where it lives: the store
//! keeps unit spans, the public API speaks code points (see `text::offsets`).

use serde::{Deserialize, Serialize};

/// A half-open interval over the text: `[start, start + length)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub length: usize,
}

impl Span {
    pub fn new(start: usize, length: usize) -> Self {
        Self { start, length }
    }

    /// Exclusive end offset
    pub fn end(&self) -> usize {
        self.start + self.length
    }

    /// Check if this span is empty (length == 0)
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}

/// Identity of an annotation
///
/// The wire format reserves `0` for the candidate under construction (no
/// label chosen yet); in code that sentinel is an explicit variant so it
/// cannot be confused with a host-assigned id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub enum AnnotationId {
    /// Transient candidate built from a live selection, not yet labeled
    Pending,
    /// Host-assigned identity of a committed annotation
    Assigned(u32),
}

impl From<u32> for AnnotationId {
    fn from(raw: u32) -> Self {
        if raw == 0 {
            Self::Pending
        } else {
            Self::Assigned(raw)
        }
    }
}

impl From<AnnotationId> for u32 {
    fn from(id: AnnotationId) -> Self {
        match id {
            AnnotationId::Pending => 0,
            AnnotationId::Assigned(raw) => raw,
        }
    }
}

impl AnnotationId {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

/// A labeled span over the text
///
/// `label` is `None` while the annotation is a pending candidate. `color` is
/// carried from the commit candidate and only used for rendering the run
/// border; bulk-loaded annotations usually omit it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: AnnotationId,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub span: Span,
}

impl Annotation {
    pub fn new(id: AnnotationId, label: Option<String>, span: Span) -> Self {
        Self {
            id,
            label,
            color: None,
            span,
        }
    }
}

/// A label choice offered on every annotated run
///
/// `value` is the stored label, `label` the display text shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelOption {
    pub value: String,
    pub label: String,
}

impl LabelOption {
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}
