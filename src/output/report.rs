//! Report structures assembled from a match result

use crate::output::presentation::{
    explanation_with_limit, format_percentage, MatchFeedback, DEFAULT_LISTED_TERMS,
};
use crate::processing::document::MatchResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A match result together with its rendered text and run metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    pub result: MatchResult,

    /// `format_percentage` of the similarity score
    pub score_percentage: String,

    pub feedback: MatchFeedback,

    /// Feedback sentence for the score band
    pub feedback_message: String,

    /// Bulleted matching/missing sections, empty when both sets are empty
    pub explanation: String,

    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub matcher_version: String,
    pub resume_file: String,
    /// File path, or a label when the job description was given inline
    pub job_source: String,
    pub embedding_model: String,
    pub processing_time_ms: u64,
}

impl ReportMetadata {
    pub fn new(resume_file: &str, job_source: &str, embedding_model: &str) -> Self {
        Self {
            generated_at: Utc::now(),
            matcher_version: env!("CARGO_PKG_VERSION").to_string(),
            resume_file: resume_file.to_string(),
            job_source: job_source.to_string(),
            embedding_model: embedding_model.to_string(),
            processing_time_ms: 0,
        }
    }

    pub fn with_processing_time(mut self, processing_time_ms: u64) -> Self {
        self.processing_time_ms = processing_time_ms;
        self
    }
}

impl MatchReport {
    pub fn new(result: MatchResult, metadata: ReportMetadata) -> Self {
        Self::with_term_limit(result, metadata, DEFAULT_LISTED_TERMS)
    }

    /// Build a report listing at most `limit` terms per explanation section.
    pub fn with_term_limit(result: MatchResult, metadata: ReportMetadata, limit: usize) -> Self {
        let feedback = MatchFeedback::from_score(result.similarity_score);
        Self {
            score_percentage: format_percentage(result.similarity_score),
            feedback,
            feedback_message: feedback.message().to_string(),
            explanation: explanation_with_limit(
                &result.matching_terms,
                &result.missing_terms,
                limit,
            ),
            result,
            metadata,
        }
    }

    pub fn score(&self) -> f32 {
        self.result.similarity_score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::document::KeywordSet;

    fn result(score: f32) -> MatchResult {
        MatchResult {
            similarity_score: score,
            matching_terms: ["aws", "python"].iter().map(|s| s.to_string()).collect(),
            missing_terms: KeywordSet::from(["developer".to_string()]),
        }
    }

    #[test]
    fn test_report_renders_presentation_fields() {
        let report = MatchReport::new(
            result(0.6543),
            ReportMetadata::new("resume.pdf", "job.txt", "potion-base-8M"),
        );

        assert_eq!(report.score_percentage, "65.4%");
        assert_eq!(report.feedback, MatchFeedback::Good);
        assert!(report.feedback_message.starts_with("Good Match!"));
        assert!(report.explanation.contains("- python"));
        assert!(report.explanation.contains("- developer"));
        assert_eq!(report.metadata.matcher_version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_term_limit_applies_to_explanation() {
        let report = MatchReport::with_term_limit(
            result(0.9),
            ReportMetadata::new("resume.pdf", "job.txt", "test"),
            1,
        );
        assert!(report.explanation.contains("- aws"));
        assert!(!report.explanation.contains("- python"));
    }

    #[test]
    fn test_report_serializes_to_json() {
        let report = MatchReport::new(
            result(0.3),
            ReportMetadata::new("resume.pdf", "inline text", "test").with_processing_time(12),
        );
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["feedback"], "Low");
        assert_eq!(json["metadata"]["processing_time_ms"], 12);
        assert_eq!(json["result"]["matching_terms"][0], "aws");
    }
}
