//! Hover and press micro-animations on page text.

use crate::effects::Document;
use serde::{Deserialize, Serialize};

/// Pointer activity on a text element.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum PointerPhase {
    Enter,
    Leave,
    Down,
    Up,
}

impl PointerPhase {
    /// Inline `transform` applied for this phase.
    pub fn transform(&self) -> &'static str {
        match self {
            Self::Enter => "scale(1.05) rotate(-1deg)",
            Self::Leave => "scale(1) rotate(0deg)",
            Self::Down => "scale(0.95)",
            Self::Up => "scale(1.05)",
        }
    }

    /// Map a DOM event type (`mouseenter`, `mouseleave`, `mousedown`,
    /// `mouseup`) to its phase.
    pub fn from_event_type(event_type: &str) -> Option<Self> {
        match event_type {
            "mouseenter" => Some(Self::Enter),
            "mouseleave" => Some(Self::Leave),
            "mousedown" => Some(Self::Down),
            "mouseup" => Some(Self::Up),
            _ => None,
        }
    }
}

pub fn apply_pointer<D: Document>(doc: &mut D, element: &D::Element, phase: PointerPhase) {
    doc.set_style(element, "transform", phase.transform());
}
