//! Display list for host-side rendering
//!
//! The engine never touches the DOM. Instead it hands the host a display
//! list with everything pre-computed: escaped run text, the label choices
//! for each annotated run with their `selected` flags, and the annotation
//! id to tag the per-run select/delete controls with. The host renders DOM
//! elements from this without any further engine calls.

use serde::{Deserialize, Serialize};

use super::segmenter::{Segment, Segmentation};
use crate::models::LabelOption;
use crate::text::escape;

/// Placeholder shown when an annotated run has no matching label choice
const UNLABELED_CHOICE: &str = "Select Option";

/// Top-level rendering contract returned to the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayList {
    /// False when the annotation set failed validation and the runs are the
    /// plain-text fallback
    pub ok: bool,
    /// All runs to render, in document order
    pub runs: Vec<RenderRun>,
}

/// A single run with all rendering information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderRun {
    /// HTML-escaped text of this run
    pub text: String,
    /// Wire id of the owning annotation; absent for plain runs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation_id: Option<u32>,
    /// Current label of the owning annotation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Border color for the run, when the annotation carries one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Label choices for the run's selector; empty for plain runs
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<RenderChoice>,
}

/// One entry of an annotated run's label selector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderChoice {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Build the display list for a segmentation
pub fn build(segmentation: &Segmentation, options: &[LabelOption]) -> DisplayList {
    let runs = segmentation
        .segments
        .iter()
        .map(|segment| match segment {
            Segment::Plain { text } => RenderRun {
                text: escape::escape(text),
                annotation_id: None,
                label: None,
                color: None,
                choices: Vec::new(),
            },
            Segment::Annotated { text, annotation } => RenderRun {
                text: escape::escape(text),
                annotation_id: Some(annotation.id.into()),
                label: annotation.label.clone(),
                color: annotation.color.clone(),
                choices: choices_for(annotation.label.as_deref(), options),
            },
        })
        .collect();
    DisplayList {
        ok: segmentation.ok,
        runs,
    }
}

/// Label choices with the current label marked selected
///
/// When no option matches (a pending candidate, or a label no longer
/// offered) a selected placeholder is prepended so the selector never
/// silently shows the first real option.
fn choices_for(current: Option<&str>, options: &[LabelOption]) -> Vec<RenderChoice> {
    let mut choices: Vec<RenderChoice> = options
        .iter()
        .map(|opt| RenderChoice {
            value: opt.value.clone(),
            label: opt.label.clone(),
            selected: current == Some(opt.value.as_str()),
        })
        .collect();
    if !choices.iter().any(|c| c.selected) {
        choices.insert(
            0,
            RenderChoice {
                value: String::new(),
                label: UNLABELED_CHOICE.to_string(),
                selected: true,
            },
        );
    }
    choices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Annotation, AnnotationId, Span};

    fn options() -> Vec<LabelOption> {
        vec![
            LabelOption::new("PER", "Person"),
            LabelOption::new("ORG", "Organization"),
        ]
    }

    fn annotated(text: &str, label: Option<&str>) -> Segment {
        Segment::Annotated {
            text: text.to_string(),
            annotation: Annotation::new(
                AnnotationId::Assigned(1),
                label.map(str::to_string),
                Span::new(0, 1),
            ),
        }
    }

    #[test]
    fn test_plain_run_is_escaped() {
        let segmentation = Segmentation {
            ok: true,
            segments: vec![Segment::Plain {
                text: "a & b".to_string(),
            }],
        };
        let list = build(&segmentation, &options());
        assert!(list.ok);
        assert_eq!(list.runs[0].text, "a &amp; b");
        assert!(list.runs[0].choices.is_empty());
        assert!(list.runs[0].annotation_id.is_none());
    }

    #[test]
    fn test_matching_label_is_selected() {
        let segmentation = Segmentation {
            ok: true,
            segments: vec![annotated("Acme", Some("ORG"))],
        };
        let list = build(&segmentation, &options());
        let run = &list.runs[0];
        assert_eq!(run.annotation_id, Some(1));
        assert_eq!(run.choices.len(), 2);
        assert!(!run.choices[0].selected);
        assert!(run.choices[1].selected);
    }

    #[test]
    fn test_unlabeled_run_gets_placeholder() {
        let segmentation = Segmentation {
            ok: true,
            segments: vec![annotated("Acme", None)],
        };
        let list = build(&segmentation, &options());
        let run = &list.runs[0];
        assert_eq!(run.choices.len(), 3);
        assert_eq!(run.choices[0].label, "Select Option");
        assert!(run.choices[0].selected);
    }

    #[test]
    fn test_unknown_label_gets_placeholder() {
        let segmentation = Segmentation {
            ok: true,
            segments: vec![annotated("Acme", Some("GONE"))],
        };
        let list = build(&segmentation, &options());
        assert_eq!(list.runs[0].choices.len(), 3);
        assert!(list.runs[0].choices[0].selected);
    }
}
