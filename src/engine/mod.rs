//! Annotation engine
//!
//! The state machine tying store, segmenter, and selection mapper together.
//! All mutation goes through here: commits are transactional (snapshot the
//! store, apply, re-derive the view, roll back if the proposed state fails
//! validation), label updates and deletes re-derive unconditionally since
//! they cannot introduce overlap. The derived [`Segmentation`] is the only
//! thing a rendering layer consumes.
//!
//! Everything is single-threaded and run-to-completion: each host event
//! handler finishes before the next can start, so no locking is needed and
//! rollback is plain snapshot/restore rather than a transaction log.

use std::collections::HashMap;

use thiserror::Error;

use crate::layout::{self, DisplayList, Segmentation};
use crate::models::{
    Annotation, AnnotationId, AnnotationStore, LabelOption, SelectionBoundary, SelectionSpan, Span,
};
use crate::selection;
use crate::text::offsets;

/// Why a mutation was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnnotatorError {
    /// Commit attempted with no selection or a collapsed one; the store is
    /// untouched
    #[error("selection is empty; select a non-empty range to annotate")]
    EmptySelection,
    /// Commit would violate the non-overlap invariant; the store was rolled
    /// back to the pre-commit snapshot
    #[error("annotation overlaps an existing one; only non-overlapping annotations are allowed")]
    Overlap,
    /// Update or delete aimed at an id the store does not hold
    #[error("no annotation with id {0}")]
    UnknownAnnotation(u32),
}

/// Engine lifecycle state, advanced by host events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    Selecting,
    Committing,
    Committed,
    RolledBack,
}

/// Observer channels; one handler per kind, re-registering overwrites
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Create,
    Update,
    Delete,
}

type EventHandler = Box<dyn FnMut(&Annotation)>;

/// What a commit turns the current selection into
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub id: AnnotationId,
    pub label: Option<String>,
    pub color: Option<String>,
}

impl Candidate {
    /// The transient unlabeled candidate created on pointer-up
    pub fn pending() -> Self {
        Self {
            id: AnnotationId::Pending,
            label: None,
            color: Some("gray".to_string()),
        }
    }
}

/// Span-annotation engine over one immutable text
pub struct Engine {
    text: String,
    options: Vec<LabelOption>,
    verbose: bool,
    store: AnnotationStore,
    selection: Option<SelectionSpan>,
    view: Segmentation,
    state: EngineState,
    handlers: HashMap<EventKind, EventHandler>,
}

impl Engine {
    /// Create an engine for the given text and label choices
    pub fn new(text: &str, options: Vec<LabelOption>, verbose: bool) -> Self {
        let store = AnnotationStore::new();
        let view = layout::segment(text, &store);
        Self {
            text: text.to_string(),
            options,
            verbose,
            store,
            selection: None,
            view,
            state: EngineState::Idle,
            handlers: HashMap::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn options(&self) -> &[LabelOption] {
        &self.options
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn selection(&self) -> Option<SelectionSpan> {
        self.selection
    }

    /// The current derived view
    pub fn view(&self) -> &Segmentation {
        &self.view
    }

    /// Pre-computed rendering contract for the host
    pub fn display_list(&self) -> DisplayList {
        layout::display_list::build(&self.view, &self.options)
    }

    /// Register the observer for an event kind, replacing any previous one
    pub fn set_handler<F>(&mut self, kind: EventKind, handler: F)
    where
        F: FnMut(&Annotation) + 'static,
    {
        self.handlers.insert(kind, Box::new(handler));
    }

    /// Wholesale replace the annotation set (spans in code points)
    ///
    /// Bulk load bypasses commit validation; if the set is internally
    /// inconsistent the whole view degrades to the plain-text fallback
    /// rather than applying part of it.
    pub fn set_annotations(&mut self, items: Vec<Annotation>) {
        self.store.clear();
        for item in items {
            self.store.put(&self.text, item);
        }
        self.refresh();
        if self.verbose {
            log::debug!(
                "loaded {} annotations (view ok: {})",
                self.store.len(),
                self.view.ok
            );
        }
    }

    /// Look up one annotation, span in code points
    pub fn annotation(&self, id: AnnotationId) -> Option<Annotation> {
        self.store.get(&self.text, id)
    }

    /// All annotations, spans in code points, ordered by span start
    pub fn annotations(&self) -> Vec<Annotation> {
        let mut items: Vec<Annotation> = self
            .store
            .iter()
            .map(|item| {
                let mut item = item.clone();
                item.span = offsets::span_to_code_points(&self.text, item.span);
                item
            })
            .collect();
        items.sort_by_key(|item| (item.span.start, item.id));
        items
    }

    /// Replace the transient selection (unit offsets)
    pub fn set_selection(&mut self, selection: Option<SelectionSpan>) {
        self.selection = selection;
        self.state = match selection {
            Some(span) if !span.is_empty() => EngineState::Selecting,
            _ => EngineState::Idle,
        };
    }

    /// Turn the current selection into an annotation, transactionally
    ///
    /// The selection is consumed whether the commit lands or rolls back.
    /// A selection that covers no units (collapsed, or backwards so its
    /// length saturates to zero) cannot become an annotation.
    pub fn commit(&mut self, candidate: Candidate) -> Result<Annotation, AnnotatorError> {
        let sel = match self.selection {
            Some(sel) if !sel.is_empty() => sel,
            _ => return Err(AnnotatorError::EmptySelection),
        };
        self.state = EngineState::Committing;
        self.selection = None;

        let span = Span::new(sel.start.min(sel.end), sel.len());
        let annotation = Annotation {
            id: candidate.id,
            label: candidate.label,
            color: candidate.color,
            span,
        };
        let snapshot = self.store.snapshot();
        self.store.put_units(annotation.clone());
        self.refresh();

        if self.view.ok {
            self.state = EngineState::Committed;
            let mut public = annotation;
            public.span = offsets::span_to_code_points(&self.text, public.span);
            self.notify(EventKind::Create, &public);
            Ok(public)
        } else {
            self.store.restore(snapshot);
            self.refresh();
            self.state = EngineState::RolledBack;
            if self.verbose {
                log::error!("invalid annotation at {span:?}: rolled back to snapshot");
            }
            Err(AnnotatorError::Overlap)
        }
    }

    /// Change only the label of an existing annotation
    ///
    /// Never re-checked for overlap: a label change cannot move a span.
    pub fn update_label(
        &mut self,
        id: AnnotationId,
        new_label: &str,
    ) -> Result<Annotation, AnnotatorError> {
        let entry = self
            .store
            .get_units_mut(id)
            .ok_or(AnnotatorError::UnknownAnnotation(id.into()))?;
        entry.label = Some(new_label.to_string());
        self.refresh();
        let public = self
            .store
            .get(&self.text, id)
            .ok_or(AnnotatorError::UnknownAnnotation(id.into()))?;
        self.notify(EventKind::Update, &public);
        Ok(public)
    }

    /// Remove an annotation
    pub fn delete(&mut self, id: AnnotationId) -> Result<Annotation, AnnotatorError> {
        let mut removed = self
            .store
            .remove(id)
            .ok_or(AnnotatorError::UnknownAnnotation(id.into()))?;
        removed.span = offsets::span_to_code_points(&self.text, removed.span);
        self.refresh();
        self.notify(EventKind::Delete, &removed);
        Ok(removed)
    }

    // --- host event boundaries -------------------------------------------
    //
    // Failures inside these never propagate: they are logged (verbose only)
    // and swallowed so a bad event cannot take the hosting page down.

    /// The host's selection changed; `None` means no usable range
    pub fn on_selection_change(
        &mut self,
        raw: Option<(SelectionBoundary, SelectionBoundary)>,
    ) {
        let mapped = raw.and_then(|(start, end)| selection::map_selection(&self.view, start, end));
        if self.verbose {
            log::debug!("selection changed: {mapped:?}");
        }
        self.set_selection(mapped);
    }

    /// Pointer released: try to turn the selection into a pending candidate
    ///
    /// On failure any pending entry is purged before re-rendering so the
    /// fallback view never shows a dangling candidate.
    pub fn on_pointer_up(&mut self) -> Option<Annotation> {
        match self.commit(Candidate::pending()) {
            Ok(annotation) => Some(annotation),
            Err(err) => {
                self.store.remove(AnnotationId::Pending);
                self.refresh();
                if self.verbose {
                    log::error!("{err}");
                }
                None
            }
        }
    }

    /// A run's label selector changed
    pub fn on_label_change(&mut self, id: AnnotationId, value: &str) -> Option<Annotation> {
        if self.verbose {
            log::debug!("label changed: id {} value {value}", u32::from(id));
        }
        match self.update_label(id, value) {
            Ok(annotation) => Some(annotation),
            Err(err) => {
                if self.verbose {
                    log::error!("{err}");
                }
                None
            }
        }
    }

    /// A run's delete control was clicked
    pub fn on_delete_click(&mut self, id: AnnotationId) -> Option<Annotation> {
        match self.delete(id) {
            Ok(annotation) => Some(annotation),
            Err(err) => {
                if self.verbose {
                    log::error!("{err}");
                }
                None
            }
        }
    }

    fn refresh(&mut self) {
        self.view = layout::segment(&self.text, &self.store);
    }

    fn notify(&mut self, kind: EventKind, annotation: &Annotation) {
        if let Some(handler) = self.handlers.get_mut(&kind) {
            handler(annotation);
        }
    }
}
