//! Core types shared by the rfpdesk client, workflow controller, and CLI.

pub mod config;
pub mod document;
pub mod error;
pub mod model;

pub use config::{API_URL_ENV, ClientConfig, DEFAULT_API_URL, DEFAULT_COMPANY_URL, ReferenceUrl};
pub use document::{Document, DocumentId};
pub use error::CoreError;
pub use model::{AssessmentResult, DraftOutcome, Priority, Question};
