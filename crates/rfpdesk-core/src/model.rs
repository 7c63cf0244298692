//! Result payloads returned by the assessment, drafting, and question services.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Recommendation label the assessment service uses for a bid worth pursuing.
pub const PURSUE: &str = "Pursue";

/// Scored assessment of a submitted document.
///
/// Mirrors the `/assess` response body; the total score is sent as `score`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    /// Open set of labels, e.g. `"Pursue"`.
    pub recommendation: String,
    /// Overall score in `[0, 100]`.
    #[serde(rename = "score")]
    pub total_score: f64,
    /// Per-criterion scores in `[0, 100]`, keyed by criterion name.
    pub criteria_scores: BTreeMap<String, f64>,
    pub reasoning: String,
}

impl AssessmentResult {
    pub fn recommends_pursuit(&self) -> bool {
        self.recommendation == PURSUE
    }
}

/// Outcome of a successful drafting call.
///
/// A missing storage location means the draft was generated but the upload
/// to external storage failed. That is still a success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftOutcome {
    pub message: String,
    pub storage_location: Option<String>,
}

impl DraftOutcome {
    pub const SAVED: &'static str = "Draft saved to Google Drive successfully.";
    pub const NOT_UPLOADED: &'static str = "Draft generated but could not be uploaded to Drive.";

    /// Build an outcome from the wire fields, filling in the default message
    /// when the service omitted one.
    pub fn from_parts(message: Option<String>, storage_location: Option<String>) -> Self {
        let storage_location = storage_location.filter(|s| !s.is_empty());
        let message = message.filter(|m| !m.is_empty()).unwrap_or_else(|| {
            if storage_location.is_some() {
                Self::SAVED.to_string()
            } else {
                Self::NOT_UPLOADED.to_string()
            }
        });
        Self {
            message,
            storage_location,
        }
    }

    pub fn is_uploaded(&self) -> bool {
        self.storage_location.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// A clarifying question to put to the issuer of the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    pub priority: Priority,
    pub category: String,
}
