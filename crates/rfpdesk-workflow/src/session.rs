//! Async driver: runs requests on tokio tasks and applies their completions.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use rfpdesk_client::{RfpService, ServiceError};
use rfpdesk_core::{Document, DocumentId, ReferenceUrl};
use tokio::sync::mpsc;
use tracing::{error, info};

use crate::controller::{Applied, Completion, Ticket, WorkflowController};
use crate::state::{Notification, Operation, WorkflowState};

/// A completion that has been through [`WorkflowController::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settled {
    pub operation: Operation,
    pub ticket: Ticket,
    pub applied: Applied,
}

/// Workflow session bound to one service.
///
/// Dispatching a call returns immediately, so further commands (a new
/// document, an edited reference URL) are accepted while it is pending.
/// Completions are applied in arrival order by [`Session::next_completion`].
pub struct Session<S> {
    controller: WorkflowController,
    service: Arc<S>,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
    pending: usize,
}

impl<S: RfpService + 'static> Session<S> {
    pub fn new(service: S) -> Self {
        Self::with_controller(Arc::new(service), WorkflowController::new())
    }

    pub fn with_controller(service: Arc<S>, controller: WorkflowController) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            controller,
            service,
            tx,
            rx,
            pending: 0,
        }
    }

    pub fn state(&self) -> &WorkflowState {
        self.controller.state()
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Calls dispatched whose completions have not been applied yet.
    pub fn pending(&self) -> usize {
        self.pending
    }

    pub fn select_document(&mut self, document: Document) -> DocumentId {
        self.controller.select_document(document)
    }

    pub fn set_reference_url(&mut self, reference_url: ReferenceUrl) {
        self.controller.set_reference_url(reference_url);
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.controller.take_notifications()
    }

    /// Start an assessment in the background. `None` if the controller
    /// refused to start one.
    pub fn dispatch_assessment(&mut self) -> Option<Ticket> {
        let request = self.controller.start_assessment()?;
        let ticket = request.ticket;
        let service = Arc::clone(&self.service);
        self.spawn(Operation::Assessment, ticket, async move {
            request.execute(service.as_ref()).await
        });
        Some(ticket)
    }

    /// Start drafting in the background. `None` if the controller refused.
    pub fn dispatch_drafting(&mut self) -> Option<Ticket> {
        let request = self.controller.start_drafting()?;
        let ticket = request.ticket;
        let service = Arc::clone(&self.service);
        self.spawn(Operation::Drafting, ticket, async move {
            request.execute(service.as_ref()).await
        });
        Some(ticket)
    }

    /// Wait for the next pending call to finish and apply it.
    ///
    /// Returns `None` when nothing is pending.
    pub async fn next_completion(&mut self) -> Option<Settled> {
        if self.pending == 0 {
            return None;
        }
        // The session holds a sender, so the channel never closes while waiting.
        let completion = self.rx.recv().await?;
        self.pending -= 1;
        let operation = completion.operation();
        let ticket = completion.ticket();
        let applied = self.controller.apply(completion);
        Some(Settled {
            operation,
            ticket,
            applied,
        })
    }

    /// Run an assessment to completion.
    ///
    /// Other completions that arrive first are applied along the way.
    pub async fn assess(&mut self) -> Option<Applied> {
        let ticket = self.dispatch_assessment()?;
        self.settle(ticket).await
    }

    /// Run drafting to completion.
    pub async fn draft(&mut self) -> Option<Applied> {
        let ticket = self.dispatch_drafting()?;
        self.settle(ticket).await
    }

    async fn settle(&mut self, ticket: Ticket) -> Option<Applied> {
        while let Some(settled) = self.next_completion().await {
            if settled.ticket == ticket {
                return Some(settled.applied);
            }
        }
        None
    }

    fn spawn<F>(&mut self, operation: Operation, ticket: Ticket, call: F)
    where
        F: std::future::Future<Output = Completion> + Send + 'static,
    {
        let tx = self.tx.clone();
        self.pending += 1;
        info!(%operation, document = %ticket.document(), "dispatching call");
        tokio::spawn(async move {
            // A panicking service still resolves the operation.
            let completion = match AssertUnwindSafe(call).catch_unwind().await {
                Ok(completion) => completion,
                Err(_) => {
                    error!(%operation, "service call panicked");
                    Completion::failed(
                        operation,
                        ticket,
                        ServiceError::Other(format!("{operation} call panicked")),
                    )
                }
            };
            let _ = tx.send(completion);
        });
    }
}
