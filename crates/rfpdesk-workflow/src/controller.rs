//! The workflow state machine.
//!
//! Starting an operation hands back a request tagged with a [`Ticket`]. The
//! request runs elsewhere and comes back as a [`Completion`]; the controller
//! applies it only if the ticket is still the current one for that
//! operation. Selecting a new document, or starting a new assessment while a
//! draft is pending, retires the outstanding tickets so late results are
//! discarded rather than shown against the wrong document.
//!
//! There is no cancellation and no timeout. A call that never returns leaves
//! its operation `InFlight` until the user selects another document.

use chrono::Utc;
use rfpdesk_client::{RfpService, ServiceError};
use rfpdesk_core::{AssessmentResult, Document, DocumentId, DraftOutcome, ReferenceUrl};
use tracing::{debug, info, warn};

use crate::state::{Notification, Operation, OperationStatus, WorkflowState};

/// Shown for any assessment failure, whatever the cause.
pub const ASSESSMENT_FAILED: &str = "Error assessing RFP. Please check backend connection.";

/// Used when a drafting failure carries no detail of its own.
pub const DRAFTING_FAILED: &str = "Drafting failed";

/// Identifies one invocation of an operation against one document selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    document: DocumentId,
    sequence: u64,
}

impl Ticket {
    pub fn document(&self) -> DocumentId {
        self.document
    }
}

/// An assessment call ready to be sent.
#[derive(Debug, Clone)]
pub struct AssessmentRequest {
    pub ticket: Ticket,
    pub document: Document,
}

impl AssessmentRequest {
    pub async fn execute<S: RfpService + ?Sized>(self, service: &S) -> Completion {
        let result = service.assess(&self.document).await;
        Completion::Assessment {
            ticket: self.ticket,
            result,
        }
    }
}

/// A drafting call ready to be sent.
#[derive(Debug, Clone)]
pub struct DraftRequest {
    pub ticket: Ticket,
    pub document: Document,
    pub reference_url: ReferenceUrl,
}

impl DraftRequest {
    pub async fn execute<S: RfpService + ?Sized>(self, service: &S) -> Completion {
        let result = service.draft(&self.document, &self.reference_url).await;
        Completion::Drafting {
            ticket: self.ticket,
            result,
        }
    }
}

/// The result of a finished call, still carrying the ticket it was issued with.
#[derive(Debug)]
pub enum Completion {
    Assessment {
        ticket: Ticket,
        result: Result<AssessmentResult, ServiceError>,
    },
    Drafting {
        ticket: Ticket,
        result: Result<DraftOutcome, ServiceError>,
    },
}

impl Completion {
    /// A failed completion for `operation`, used when the call itself could
    /// not produce one.
    pub fn failed(operation: Operation, ticket: Ticket, error: ServiceError) -> Self {
        match operation {
            Operation::Assessment => Self::Assessment {
                ticket,
                result: Err(error),
            },
            Operation::Drafting => Self::Drafting {
                ticket,
                result: Err(error),
            },
        }
    }

    pub fn operation(&self) -> Operation {
        match self {
            Self::Assessment { .. } => Operation::Assessment,
            Self::Drafting { .. } => Operation::Drafting,
        }
    }

    pub fn ticket(&self) -> Ticket {
        match self {
            Self::Assessment { ticket, .. } | Self::Drafting { ticket, .. } => *ticket,
        }
    }
}

/// What [`WorkflowController::apply`] did with a completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Succeeded,
    Failed,
    /// The ticket was no longer current; state is unchanged.
    Stale,
}

/// Single owner of [`WorkflowState`].
#[derive(Debug, Default)]
pub struct WorkflowController {
    state: WorkflowState,
    last_document: Option<DocumentId>,
    sequence: u64,
    assessment_ticket: Option<Ticket>,
    draft_ticket: Option<Ticket>,
}

impl WorkflowController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reference_url(reference_url: ReferenceUrl) -> Self {
        let mut controller = Self::default();
        controller.state.reference_url = reference_url;
        controller
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    /// Replace the current document, clearing both results and resetting
    /// both operations to `Idle`. Pending calls are not cancelled; their
    /// results will be discarded.
    pub fn select_document(&mut self, document: Document) -> DocumentId {
        let id = self
            .last_document
            .map_or(DocumentId::new(1), DocumentId::next);
        self.last_document = Some(id);

        if self.state.is_busy() {
            info!(document = %id, "new document selected while a call is pending");
        }
        debug!(document = %id, name = document.name(), size = document.size(), "document selected");

        self.state.document = Some((id, document));
        self.state.assessment = None;
        self.state.draft = None;
        self.state.assessment_status = OperationStatus::Idle;
        self.state.draft_status = OperationStatus::Idle;
        self.assessment_ticket = None;
        self.draft_ticket = None;
        id
    }

    /// Edit the reference URL. Takes effect for the next drafting call only.
    pub fn set_reference_url(&mut self, reference_url: ReferenceUrl) {
        debug!(url = %reference_url, "reference url updated");
        self.state.reference_url = reference_url;
    }

    /// Begin an assessment of the current document.
    ///
    /// Returns `None` without touching state when no document is selected or
    /// an assessment of this document is already in flight. Otherwise clears
    /// the previous assessment and any draft, since a new assessment
    /// invalidates them.
    pub fn start_assessment(&mut self) -> Option<AssessmentRequest> {
        let (id, document) = self.state.document.clone()?;
        if self.state.assessment_status == OperationStatus::InFlight {
            debug!(document = %id, "assessment already in flight");
            return None;
        }

        if self.draft_ticket.take().is_some() {
            info!(document = %id, "pending draft superseded by new assessment");
        }
        let ticket = self.issue(id);
        self.assessment_ticket = Some(ticket);
        self.state.assessment_status = OperationStatus::InFlight;
        self.state.assessment = None;
        self.state.draft_status = OperationStatus::Idle;
        self.state.draft = None;
        debug!(document = %id, "assessment started");
        Some(AssessmentRequest { ticket, document })
    }

    /// Begin drafting a response for the current document.
    ///
    /// Requires a document only; whether drafting is offered before an
    /// assessment is a presentation concern (see [`Controls`](crate::Controls)).
    pub fn start_drafting(&mut self) -> Option<DraftRequest> {
        let (id, document) = self.state.document.clone()?;
        if self.state.draft_status == OperationStatus::InFlight {
            debug!(document = %id, "drafting already in flight");
            return None;
        }

        let ticket = self.issue(id);
        self.draft_ticket = Some(ticket);
        self.state.draft_status = OperationStatus::InFlight;
        self.state.draft = None;
        debug!(document = %id, url = %self.state.reference_url, "drafting started");
        Some(DraftRequest {
            ticket,
            document,
            reference_url: self.state.reference_url.clone(),
        })
    }

    /// Apply a finished call.
    pub fn apply(&mut self, completion: Completion) -> Applied {
        match completion {
            Completion::Assessment { ticket, result } => {
                if self.assessment_ticket != Some(ticket) {
                    info!(document = %ticket.document, "discarding stale assessment result");
                    return Applied::Stale;
                }
                self.assessment_ticket = None;
                match result {
                    Ok(assessment) => {
                        info!(
                            document = %ticket.document,
                            recommendation = %assessment.recommendation,
                            score = assessment.total_score,
                            "assessment succeeded"
                        );
                        self.state.assessment_status = OperationStatus::Succeeded;
                        self.state.assessment = Some(assessment);
                        Applied::Succeeded
                    }
                    Err(err) => {
                        warn!(document = %ticket.document, error = %err, "assessment failed");
                        self.state.assessment_status = OperationStatus::Failed;
                        self.notify(Operation::Assessment, ticket, ASSESSMENT_FAILED.to_string());
                        Applied::Failed
                    }
                }
            }
            Completion::Drafting { ticket, result } => {
                if self.draft_ticket != Some(ticket) {
                    info!(document = %ticket.document, "discarding stale draft result");
                    return Applied::Stale;
                }
                self.draft_ticket = None;
                match result {
                    Ok(outcome) => {
                        info!(
                            document = %ticket.document,
                            uploaded = outcome.is_uploaded(),
                            "drafting succeeded"
                        );
                        self.state.draft_status = OperationStatus::Succeeded;
                        self.state.draft = Some(outcome);
                        Applied::Succeeded
                    }
                    Err(err) => {
                        warn!(document = %ticket.document, error = %err, "drafting failed");
                        self.state.draft_status = OperationStatus::Failed;
                        let detail = err
                            .detail()
                            .filter(|d| !d.is_empty())
                            .unwrap_or_else(|| DRAFTING_FAILED.to_string());
                        self.notify(Operation::Drafting, ticket, format!("Error: {detail}"));
                        Applied::Failed
                    }
                }
            }
        }
    }

    /// Drain notifications once the user has seen them.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.state.notifications)
    }

    fn issue(&mut self, document: DocumentId) -> Ticket {
        self.sequence += 1;
        Ticket {
            document,
            sequence: self.sequence,
        }
    }

    fn notify(&mut self, operation: Operation, ticket: Ticket, message: String) {
        self.state.notifications.push(Notification {
            operation,
            document: ticket.document,
            message,
            raised_at: Utc::now(),
        });
    }
}
