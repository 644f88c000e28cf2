//! Layout derivation
//!
//! Turns the stored annotation set into the ordered segment view and the
//! display list the host renders from. Nothing in here mutates state.

pub mod display_list;
pub mod segmenter;

pub use display_list::{DisplayList, RenderChoice, RenderRun};
pub use segmenter::{segment, Segment, Segmentation};
