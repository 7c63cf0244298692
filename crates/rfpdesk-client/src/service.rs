use async_trait::async_trait;
use rfpdesk_core::{AssessmentResult, Document, DraftOutcome, Question, ReferenceUrl};

use crate::ServiceError;

/// The remote assessment/drafting service.
///
/// Each call is independent: drafting does not require a prior assessment,
/// and nothing is retried.
#[async_trait]
pub trait RfpService: Send + Sync {
    /// Score a document.
    async fn assess(&self, document: &Document) -> Result<AssessmentResult, ServiceError>;

    /// Generate a response draft using the company knowledge base at `company_url`.
    ///
    /// A draft that was generated but not uploaded is returned as `Ok` with no
    /// storage location.
    async fn draft(
        &self,
        document: &Document,
        company_url: &ReferenceUrl,
    ) -> Result<DraftOutcome, ServiceError>;

    /// Generate clarifying questions to put to the document's issuer.
    async fn questions(
        &self,
        document: &Document,
        company_url: &ReferenceUrl,
    ) -> Result<Vec<Question>, ServiceError>;

    /// Liveness probe; returns the service's banner message.
    async fn health(&self) -> Result<String, ServiceError>;
}
