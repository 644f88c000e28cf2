//! Data model for the span-annotation engine
//!
//! Annotations, the id-keyed store, and transient selection state. These are
//! pure data types; all derivation (segmentation, rendering) lives in
//! `layout` and all orchestration in `engine`.

pub mod annotation;
pub mod selection;
pub mod store;

pub use annotation::{Annotation, AnnotationId, LabelOption, Span};
pub use selection::{SelectionBoundary, SelectionSpan, SurfaceNode};
pub use store::{AnnotationSnapshot, AnnotationStore};
