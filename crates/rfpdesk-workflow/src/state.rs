//! Workflow state as seen by the presentation layer.

use std::fmt;

use chrono::{DateTime, Utc};
use rfpdesk_core::{AssessmentResult, Document, DocumentId, DraftOutcome, ReferenceUrl};

/// The two remote operations the workflow sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Assessment,
    Drafting,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Assessment => f.write_str("assessment"),
            Self::Drafting => f.write_str("drafting"),
        }
    }
}

/// Lifecycle of one operation: `Idle -> InFlight -> {Succeeded, Failed}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OperationStatus {
    #[default]
    Idle,
    InFlight,
    Succeeded,
    Failed,
}

/// A user-visible failure report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub operation: Operation,
    pub document: DocumentId,
    pub message: String,
    pub raised_at: DateTime<Utc>,
}

/// Composite workflow state.
///
/// Only [`WorkflowController`](crate::WorkflowController) mutates it; readers
/// get the accessors below.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkflowState {
    pub(crate) document: Option<(DocumentId, Document)>,
    pub(crate) reference_url: ReferenceUrl,
    pub(crate) assessment_status: OperationStatus,
    pub(crate) assessment: Option<AssessmentResult>,
    pub(crate) draft_status: OperationStatus,
    pub(crate) draft: Option<DraftOutcome>,
    pub(crate) notifications: Vec<Notification>,
}

impl WorkflowState {
    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref().map(|(_, doc)| doc)
    }

    /// Identity of the current selection, if any.
    pub fn document_id(&self) -> Option<DocumentId> {
        self.document.as_ref().map(|(id, _)| *id)
    }

    pub fn reference_url(&self) -> &ReferenceUrl {
        &self.reference_url
    }

    pub fn assessment_status(&self) -> OperationStatus {
        self.assessment_status
    }

    /// `Some` iff the last assessment of the current document succeeded.
    pub fn assessment(&self) -> Option<&AssessmentResult> {
        self.assessment.as_ref()
    }

    pub fn draft_status(&self) -> OperationStatus {
        self.draft_status
    }

    pub fn draft(&self) -> Option<&DraftOutcome> {
        self.draft.as_ref()
    }

    /// Failures raised so far, oldest first.
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn is_busy(&self) -> bool {
        self.assessment_status == OperationStatus::InFlight
            || self.draft_status == OperationStatus::InFlight
    }
}
