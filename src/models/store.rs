//! Annotation store
//!
//! Id-keyed container for annotations. The map holds spans in UTF-16 units;
//! the public `put`/`get` pair converts from and to code points so callers
//! outside the crate never see unit offsets. The store does no overlap or
//! bounds checking — the segmenter validates the proposed state after every
//! mutation, and the engine rolls back via `snapshot`/`restore` when that
//! validation fails.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::annotation::{Annotation, AnnotationId};
use crate::text::offsets;

/// Id-keyed annotation map (unit spans inside)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotationStore {
    entries: HashMap<AnnotationId, Annotation>,
}

/// Full copy of the store used for commit rollback
#[derive(Debug, Clone)]
pub struct AnnotationSnapshot {
    entries: HashMap<AnnotationId, Annotation>,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Upsert an annotation given with a code-point span
    pub fn put(&mut self, text: &str, mut item: Annotation) {
        item.span = offsets::span_to_units(text, item.span);
        self.entries.insert(item.id, item);
    }

    /// Get an annotation with its span converted back to code points
    pub fn get(&self, text: &str, id: AnnotationId) -> Option<Annotation> {
        self.entries.get(&id).map(|item| {
            let mut item = item.clone();
            item.span = offsets::span_to_code_points(text, item.span);
            item
        })
    }

    /// Upsert an annotation whose span is already in units
    pub(crate) fn put_units(&mut self, item: Annotation) {
        self.entries.insert(item.id, item);
    }

    /// Get an annotation in unit space
    #[cfg(test)]
    pub(crate) fn get_units(&self, id: AnnotationId) -> Option<&Annotation> {
        self.entries.get(&id)
    }

    /// Mutable unit-space access, used for in-place label updates
    pub(crate) fn get_units_mut(&mut self, id: AnnotationId) -> Option<&mut Annotation> {
        self.entries.get_mut(&id)
    }

    /// Remove an entry, returning it in unit space
    pub fn remove(&mut self, id: AnnotationId) -> Option<Annotation> {
        self.entries.remove(&id)
    }

    /// Iterate all entries (unit space, arbitrary order)
    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Save a full copy for later rollback
    pub fn snapshot(&self) -> AnnotationSnapshot {
        AnnotationSnapshot {
            entries: self.entries.clone(),
        }
    }

    /// Restore a previously taken snapshot, discarding current contents
    pub fn restore(&mut self, snapshot: AnnotationSnapshot) {
        self.entries = snapshot.entries;
    }
}
