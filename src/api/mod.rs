//! WASM API surface
//!
//! Thin `wasm_bindgen` wrapper around [`Engine`]. Each `Annotator` instance
//! owns its engine, so hosting several annotators on one page is just
//! constructing several instances; nothing is page-global. The host wires
//! its DOM events (selection change, pointer-up, control clicks) to the
//! `notify*` methods and re-renders from the returned display list. Update
//! and delete notifications return the affected annotation so the host can
//! forward them to its backend.

use wasm_bindgen::prelude::*;

use crate::engine::Engine;
use crate::models::{Annotation, AnnotationId, LabelOption, SelectionBoundary, SurfaceNode};

/// One annotator bound to one text
#[wasm_bindgen]
pub struct Annotator {
    engine: Engine,
}

#[wasm_bindgen]
impl Annotator {
    /// Create an annotator for `text` with the given `{value, label}`
    /// choices
    #[wasm_bindgen(constructor)]
    pub fn new(text: &str, options: JsValue, verbose: bool) -> Result<Annotator, JsValue> {
        let options: Vec<LabelOption> =
            serde_wasm_bindgen::from_value(options).map_err(js_error)?;
        Ok(Self {
            engine: Engine::new(text, options, verbose),
        })
    }

    /// Wholesale replace the annotation set; returns the new display list
    #[wasm_bindgen(js_name = setAnnotations)]
    pub fn set_annotations(&mut self, items: JsValue) -> Result<JsValue, JsValue> {
        let items: Vec<Annotation> = serde_wasm_bindgen::from_value(items).map_err(js_error)?;
        self.engine.set_annotations(items);
        self.display_list()
    }

    /// Look up one annotation (span in code points), or `null`
    #[wasm_bindgen(js_name = getAnnotation)]
    pub fn get_annotation(&self, id: u32) -> Result<JsValue, JsValue> {
        to_js(&self.engine.annotation(AnnotationId::from(id)))
    }

    /// All annotations ordered by span start (spans in code points)
    #[wasm_bindgen(js_name = getAnnotations)]
    pub fn get_annotations(&self) -> Result<JsValue, JsValue> {
        to_js(&self.engine.annotations())
    }

    /// Report a selection; leaf indices below zero mean the boundary sits
    /// outside the rendered surface
    #[wasm_bindgen(js_name = notifySelectionChange)]
    pub fn notify_selection_change(
        &mut self,
        start_leaf: i32,
        start_offset: u32,
        end_leaf: i32,
        end_offset: u32,
    ) {
        let start = boundary(start_leaf, start_offset);
        let end = boundary(end_leaf, end_offset);
        self.engine.on_selection_change(Some((start, end)));
    }

    /// Report that the selection collapsed or went away
    #[wasm_bindgen(js_name = clearSelection)]
    pub fn clear_selection(&mut self) {
        self.engine.on_selection_change(None);
    }

    /// Pointer released: attempt the pending candidate; returns the new
    /// display list either way
    #[wasm_bindgen(js_name = notifyPointerUp)]
    pub fn notify_pointer_up(&mut self) -> Result<JsValue, JsValue> {
        self.engine.on_pointer_up();
        self.display_list()
    }

    /// A run's label selector changed; returns the updated annotation or
    /// `null` when the id is unknown
    #[wasm_bindgen(js_name = notifyLabelChange)]
    pub fn notify_label_change(&mut self, id: u32, value: &str) -> Result<JsValue, JsValue> {
        to_js(&self.engine.on_label_change(AnnotationId::from(id), value))
    }

    /// A run's delete control was clicked; returns the removed annotation
    /// or `null`
    #[wasm_bindgen(js_name = notifyDeleteClick)]
    pub fn notify_delete_click(&mut self, id: u32) -> Result<JsValue, JsValue> {
        to_js(&self.engine.on_delete_click(AnnotationId::from(id)))
    }

    /// Current display list as a structured value
    #[wasm_bindgen(js_name = displayList)]
    pub fn display_list(&self) -> Result<JsValue, JsValue> {
        to_js(&self.engine.display_list())
    }

    /// Current display list as a JSON string
    #[wasm_bindgen(js_name = displayListJson)]
    pub fn display_list_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.engine.display_list()).map_err(js_error)
    }
}

fn boundary(leaf: i32, offset: u32) -> SelectionBoundary {
    if leaf < 0 {
        SelectionBoundary::foreign()
    } else {
        SelectionBoundary::new(SurfaceNode::Leaf(leaf as usize), offset as usize)
    }
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(js_error)
}

fn js_error<E: std::fmt::Display>(err: E) -> JsValue {
    JsValue::from_str(&err.to_string())
}
