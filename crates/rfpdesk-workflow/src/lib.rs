//! Workflow layer: the assess-then-draft state machine and the session that
//! drives it against a service.
//!
//! [`WorkflowController`] owns all workflow state and exposes pure
//! transitions. [`Session`] runs requests on background tasks and feeds
//! their completions back through the controller, so commands such as
//! selecting a new document are accepted while calls are pending.

pub mod controller;
pub mod policy;
pub mod session;
pub mod state;

pub use controller::{
    Applied, AssessmentRequest, Completion, DraftRequest, Ticket, WorkflowController,
};
pub use policy::Controls;
pub use session::{Session, Settled};
pub use state::{Notification, Operation, OperationStatus, WorkflowState};
