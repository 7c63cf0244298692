//! HTTP client for the hosted assessment/drafting service.

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use rfpdesk_core::{
    AssessmentResult, ClientConfig, Document, DraftOutcome, Question, ReferenceUrl,
};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::{RfpService, ServiceError};

/// HTTP client for the service's `/assess`, `/draft`, and `/questions` endpoints.
pub struct HttpRfpService {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct DraftResponse {
    message: Option<String>,
    drive_url: Option<String>,
}

#[derive(Deserialize)]
struct QuestionsResponse {
    questions: Vec<Question>,
}

#[derive(Deserialize)]
struct HealthResponse {
    message: String,
}

impl HttpRfpService {
    /// Create a client for the given service base URL.
    ///
    /// `base_url` should be like `http://localhost:8000` (no trailing slash).
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_form<T: DeserializeOwned>(&self, path: &str, form: Form) -> Result<T, ServiceError> {
        let url = format!("{}{path}", self.base_url);
        info!(url = %url, "posting document");
        let resp = self.client.post(&url).multipart(form).send().await?;
        decode(resp).await
    }
}

/// Turn a response into `T`, or into a `ServiceError::Server` for non-2xx.
async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ServiceError> {
    let status = resp.status();
    let body = resp.text().await?;
    if !status.is_success() {
        let detail = error_detail(status, &body);
        warn!(status = status.as_u16(), detail = ?detail, "service call failed");
        return Err(ServiceError::Server {
            status: status.as_u16(),
            detail,
        });
    }
    Ok(serde_json::from_str(&body)?)
}

/// Extract the failure detail from an error body.
///
/// A JSON body contributes its `detail` field; an absent, null, empty, `false`,
/// or zero detail counts as none. A non-JSON body falls back to the status text.
fn error_detail(status: StatusCode, body: &str) -> Option<String> {
    use serde_json::Value;

    match serde_json::from_str::<Value>(body) {
        Ok(json) => json.get("detail").and_then(|d| match d {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) if s.is_empty() => None,
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }),
        Err(_) => status.canonical_reason().map(str::to_string),
    }
}

fn file_part(document: &Document) -> Result<Part, ServiceError> {
    Ok(Part::bytes(document.content().to_vec())
        .file_name(document.name().to_string())
        .mime_str(document.content_type())?)
}

#[async_trait]
impl RfpService for HttpRfpService {
    async fn assess(&self, document: &Document) -> Result<AssessmentResult, ServiceError> {
        let form = Form::new().part("file", file_part(document)?);
        let result: AssessmentResult = self.post_form("/assess", form).await?;
        info!(
            recommendation = %result.recommendation,
            score = result.total_score,
            criteria = result.criteria_scores.len(),
            "assessment received"
        );
        Ok(result)
    }

    async fn draft(
        &self,
        document: &Document,
        company_url: &ReferenceUrl,
    ) -> Result<DraftOutcome, ServiceError> {
        let form = Form::new()
            .part("file", file_part(document)?)
            .text("company_url", company_url.as_str().to_string());
        let resp: DraftResponse = self.post_form("/draft", form).await?;
        let outcome = DraftOutcome::from_parts(resp.message, resp.drive_url);
        info!(uploaded = outcome.is_uploaded(), "draft received");
        Ok(outcome)
    }

    async fn questions(
        &self,
        document: &Document,
        company_url: &ReferenceUrl,
    ) -> Result<Vec<Question>, ServiceError> {
        let form = Form::new()
            .part("file", file_part(document)?)
            .text("company_url", company_url.as_str().to_string());
        let resp: QuestionsResponse = self.post_form("/questions", form).await?;
        info!(count = resp.questions.len(), "questions received");
        Ok(resp.questions)
    }

    async fn health(&self) -> Result<String, ServiceError> {
        let url = format!("{}/", self.base_url);
        info!(url = %url, "checking service health");
        let resp = self.client.get(&url).send().await?;
        let health: HealthResponse = decode(resp).await?;
        Ok(health.message)
    }
}
