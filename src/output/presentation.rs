//! Human readable rendering of match scores and term sets

use crate::processing::document::KeywordSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of terms listed per explanation section by default.
pub const DEFAULT_LISTED_TERMS: usize = 10;

/// Percentage with one decimal place, e.g. `0.8234` -> `"82.3%"`.
///
/// Scores are not clamped, so a negative similarity renders as a negative
/// percentage.
pub fn format_percentage(score: f32) -> String {
    format!("{:.1}%", score * 100.0)
}

/// Qualitative band of a similarity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchFeedback {
    Excellent,
    Good,
    Fair,
    Low,
}

impl MatchFeedback {
    /// Bands are half-open: `[0.8, inf)`, `[0.6, 0.8)`, `[0.4, 0.6)`, below.
    pub fn from_score(score: f32) -> Self {
        if score >= 0.8 {
            MatchFeedback::Excellent
        } else if score >= 0.6 {
            MatchFeedback::Good
        } else if score >= 0.4 {
            MatchFeedback::Fair
        } else {
            MatchFeedback::Low
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            MatchFeedback::Excellent => {
                "Excellent Match! Your profile strongly aligns with the job requirements."
            }
            MatchFeedback::Good => "Good Match! Your profile matches many of the job requirements.",
            MatchFeedback::Fair => {
                "Fair Match. Consider highlighting more relevant skills and experience."
            }
            MatchFeedback::Low => {
                "Low Match. This position might not be the best fit for your current profile."
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MatchFeedback::Excellent => "Excellent",
            MatchFeedback::Good => "Good",
            MatchFeedback::Fair => "Fair",
            MatchFeedback::Low => "Low",
        }
    }
}

impl fmt::Display for MatchFeedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Feedback sentence for a similarity score.
pub fn feedback_for(score: f32) -> String {
    MatchFeedback::from_score(score).message().to_string()
}

/// Bulleted explanation of matching and missing terms.
///
/// Lists up to [`DEFAULT_LISTED_TERMS`] terms per section in lexicographic
/// order.
pub fn explanation_for(matching: &KeywordSet, missing: &KeywordSet) -> String {
    explanation_with_limit(matching, missing, DEFAULT_LISTED_TERMS)
}

/// Like [`explanation_for`] with a caller chosen per-section limit.
///
/// An empty set drops its section; both empty yields an empty string.
pub fn explanation_with_limit(matching: &KeywordSet, missing: &KeywordSet, limit: usize) -> String {
    let mut sections = Vec::new();

    if !matching.is_empty() {
        sections.push(bulleted("Matching skills and keywords:", matching, limit));
    }
    if !missing.is_empty() {
        sections.push(bulleted(
            "Consider adding these skills to your resume:",
            missing,
            limit,
        ));
    }

    sections.join("\n\n")
}

fn bulleted(title: &str, terms: &KeywordSet, limit: usize) -> String {
    let mut section = title.to_string();
    for term in terms.iter().take(limit) {
        section.push_str("\n- ");
        section.push_str(term);
    }
    section
}
