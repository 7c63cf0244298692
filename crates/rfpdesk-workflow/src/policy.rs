//! Which commands the presentation layer should offer.
//!
//! Drafting is gated on a successful assessment here, not in the controller:
//! the service accepts a draft request for any document.

use crate::state::{OperationStatus, WorkflowState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    /// A document is selected and no assessment is in flight.
    pub assess_enabled: bool,
    /// An assessment result is on screen.
    pub draft_visible: bool,
    /// Drafting is visible and not already in flight.
    pub draft_enabled: bool,
}

impl Controls {
    pub fn from_state(state: &WorkflowState) -> Self {
        let assess_enabled =
            state.document().is_some() && state.assessment_status() != OperationStatus::InFlight;
        let draft_visible = state.assessment().is_some();
        let draft_enabled = draft_visible && state.draft_status() != OperationStatus::InFlight;
        Self {
            assess_enabled,
            draft_visible,
            draft_enabled,
        }
    }
}
