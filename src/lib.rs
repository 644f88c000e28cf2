//! Span-Annotation Engine WASM Module
//!
//! Lets a user select ranges of a fixed text and attach mutually-exclusive
//! labeled annotations to them, then re-derives the text as a sequence of
//! plain and annotated runs for the host to render. The hosting page owns
//! the DOM; this module owns the data model, the segmentation, the
//! selection-to-offset mapping, and the commit/rollback state machine.

pub mod api;
pub mod engine;
pub mod layout;
pub mod models;
pub mod selection;
pub mod text;

// Re-export commonly used types
pub use engine::{AnnotatorError, Candidate, Engine, EngineState, EventKind};
pub use layout::{DisplayList, Segment, Segmentation};
pub use models::{
    Annotation, AnnotationId, LabelOption, SelectionBoundary, SelectionSpan, Span, SurfaceNode,
};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Debug).expect("failed to initialize logger");

    log::info!("Annotator WASM module initialized");
}
