//! Terminal rendering for workflow results.
//!
//! Everything here reads state; nothing mutates it.

use std::fmt::Write;

use rfpdesk_core::{AssessmentResult, Document, DraftOutcome, Question};
use rfpdesk_workflow::Notification;

const BAR_WIDTH: usize = 20;

// ── Public API ──

/// Header line for the selected document: name and size in MB.
pub fn render_document(document: &Document) -> String {
    format!("=== {} ({}) ===\n", document.name(), document.display_size())
}

/// Vertical card for an assessment: recommendation, total score, one bar per
/// criterion, then the reasoning.
pub fn render_assessment(result: &AssessmentResult) -> String {
    let mut out = String::new();
    let verdict = if result.recommends_pursuit() {
        "go"
    } else {
        "no-go"
    };

    let _ = writeln!(out, "Recommendation");
    let _ = writeln!(out, "  {:<26} {verdict}", result.recommendation);
    let _ = writeln!(out, "Total Score");
    let _ = writeln!(out, "  {}/100", format_score(result.total_score));

    if !result.criteria_scores.is_empty() {
        let _ = writeln!(out, "Criteria");
        for (name, score) in &result.criteria_scores {
            let _ = writeln!(
                out,
                "  {:<20} {:>4}%  {}",
                name,
                format_score(*score),
                bar(*score)
            );
        }
    }

    if !result.reasoning.is_empty() {
        let _ = writeln!(out, "Analysis");
        let _ = writeln!(out, "  {}", result.reasoning);
    }
    out
}

pub fn render_draft(outcome: &DraftOutcome) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Draft");
    let _ = writeln!(out, "  {}", outcome.message);
    if let Some(location) = &outcome.storage_location {
        let _ = writeln!(out, "  Open in Google Drive: {location}");
    }
    out
}

pub fn render_questions(questions: &[Question]) -> String {
    if questions.is_empty() {
        return "No clarifying questions.\n".to_string();
    }
    let mut out = String::new();
    let _ = writeln!(out, "Clarifying Questions");
    for q in questions {
        let priority = format!("[{:?}]", q.priority);
        let _ = writeln!(out, "  {priority:<8} {:<12} {}", q.category, q.question);
    }
    out
}

pub fn render_notification(notification: &Notification) -> String {
    format!(
        "{} [{}] {}",
        notification.raised_at.format("%H:%M:%S"),
        notification.operation,
        notification.message
    )
}

// ── Helpers ──

/// Whole scores print without a decimal point.
fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{score:.0}")
    } else {
        format!("{score:.1}")
    }
}

fn bar(score: f64) -> String {
    let filled = ((score.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rfpdesk_core::Priority;
    use std::collections::BTreeMap;

    fn result() -> AssessmentResult {
        AssessmentResult {
            recommendation: "Pursue".into(),
            total_score: 82.0,
            criteria_scores: BTreeMap::from([("technical".into(), 90.0), ("budget".into(), 70.0)]),
            reasoning: "Strong fit".into(),
        }
    }

    #[test]
    fn document_header_shows_size() {
        let doc = Document::new("rfp.pdf", vec![0u8; 1_258_291]);
        assert_eq!(render_document(&doc), "=== rfp.pdf (1.20 MB) ===\n");
    }

    #[test]
    fn assessment_card_sections() {
        let card = render_assessment(&result());
        assert!(card.contains("  Pursue"));
        assert!(!card.contains("no-go"));
        assert!(card.contains("82/100"));
        assert!(card.contains("Strong fit"));
        let budget = card.find("budget").unwrap();
        let technical = card.find("technical").unwrap();
        assert!(budget < technical, "criteria listed in name order");
    }

    #[test]
    fn declined_assessment_marked_no_go() {
        let mut declined = result();
        declined.recommendation = "Do Not Pursue".into();
        assert!(render_assessment(&declined).contains("no-go"));
    }

    #[test]
    fn bar_scales_and_clamps() {
        assert_eq!(bar(50.0).chars().filter(|&c| c == '█').count(), 10);
        assert_eq!(bar(150.0).chars().filter(|&c| c == '█').count(), BAR_WIDTH);
        assert_eq!(bar(-5.0).chars().filter(|&c| c == '█').count(), 0);
    }

    #[test]
    fn fractional_scores_keep_one_decimal() {
        assert_eq!(format_score(88.0), "88");
        assert_eq!(format_score(72.5), "72.5");
    }

    #[test]
    fn draft_link_only_when_uploaded() {
        let saved = DraftOutcome::from_parts(
            Some("Draft saved".into()),
            Some("https://drive.google.com/x".into()),
        );
        assert!(render_draft(&saved).contains("https://drive.google.com/x"));

        let local = DraftOutcome::from_parts(Some("Generated but upload failed".into()), None);
        let rendered = render_draft(&local);
        assert!(rendered.contains("Generated but upload failed"));
        assert!(!rendered.contains("Google Drive:"));
    }

    #[test]
    fn questions_listed_with_priority() {
        let questions = vec![Question {
            question: "What is the timeline for Phase 2?".into(),
            priority: Priority::High,
            category: "Timeline".into(),
        }];
        let rendered = render_questions(&questions);
        assert!(rendered.contains("[High]"));
        assert!(rendered.contains("Timeline"));
        assert_eq!(render_questions(&[]), "No clarifying questions.\n");
    }
}
