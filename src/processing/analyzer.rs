//! Match analysis combining document similarity with keyword diffing

use crate::error::{Result, ResumeMatcherError};
use crate::processing::document::{AnnotatedDocument, MatchResult};
use crate::processing::embeddings::Embeddings;
use crate::processing::keywords::extract_keywords;
use crate::processing::normalizer::Normalizer;
use crate::processing::similarity::cosine_similarity;
use crate::processing::vectorizer::document_vector;
use log::{debug, info};
use std::sync::Arc;

/// Compares one resume with one job description.
///
/// Holds a shared, read-only embedding table, so a single analyzer can serve
/// concurrent analyses without locking.
pub struct MatchAnalyzer {
    embeddings: Arc<dyn Embeddings>,
    normalizer: Normalizer,
}

impl MatchAnalyzer {
    pub fn new(embeddings: Arc<dyn Embeddings>) -> Self {
        Self::with_normalizer(embeddings, Normalizer::new())
    }

    pub fn with_normalizer(embeddings: Arc<dyn Embeddings>, normalizer: Normalizer) -> Self {
        Self {
            embeddings,
            normalizer,
        }
    }

    pub fn embeddings_name(&self) -> &str {
        self.embeddings.name()
    }

    /// Analyze raw resume and job text.
    ///
    /// Blank input on either side is rejected before any processing.
    pub fn analyze(&self, resume_text: &str, job_text: &str) -> Result<MatchResult> {
        if resume_text.trim().is_empty() || job_text.trim().is_empty() {
            return Err(ResumeMatcherError::MissingInput(
                "both a resume and a job description are required".to_string(),
            ));
        }

        let resume = self.normalizer.normalize(resume_text);
        let job = self.normalizer.normalize(job_text);
        self.analyze_documents(&resume, &job)
    }

    /// Analyze two already normalized documents.
    ///
    /// A document with no usable vector fails with `DegenerateVector`; the
    /// resume is the first operand and the job description the second.
    pub fn analyze_documents(
        &self,
        resume: &AnnotatedDocument,
        job: &AnnotatedDocument,
    ) -> Result<MatchResult> {
        // Embed both documents and compare them
        let resume_vector = document_vector(resume, self.embeddings.as_ref())?;
        let job_vector = document_vector(job, self.embeddings.as_ref())?;
        let similarity_score = cosine_similarity(&resume_vector, &job_vector)?;

        // Diff the content-word keywords
        let resume_keywords = extract_keywords(resume);
        let job_keywords = extract_keywords(job);
        debug!(
            "Keywords: {} in resume, {} in job description",
            resume_keywords.len(),
            job_keywords.len()
        );

        let matching_terms = resume_keywords.intersection(&job_keywords).cloned().collect();
        let missing_terms = job_keywords.difference(&resume_keywords).cloned().collect();

        info!("Similarity score: {:.4}", similarity_score);

        Ok(MatchResult {
            similarity_score,
            matching_terms,
            missing_terms,
        })
    }
}
