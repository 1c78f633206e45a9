//! Error handling for the resume matcher

use thiserror::Error;

/// Failure to turn an input document into plain text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractionError {
    #[error("document is not a readable PDF: {0}")]
    Unparseable(String),

    #[error("document is encrypted")]
    Encrypted,

    #[error("document contains no extractable pages")]
    NoPages,
}

/// Which operand of a comparison had no usable vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorOperand {
    First,
    Second,
}

impl std::fmt::Display for VectorOperand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VectorOperand::First => write!(f, "first"),
            VectorOperand::Second => write!(f, "second"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ResumeMatcherError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Insufficient text to compare: the {0} document has no usable vector")]
    DegenerateVector(VectorOperand),

    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error("Embedding dimensions don't match: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

impl ResumeMatcherError {
    /// Message suitable for showing to the person running an analysis.
    pub fn user_message(&self) -> String {
        match self {
            ResumeMatcherError::MissingInput(_) => {
                "Please provide both resume and job description.".to_string()
            }
            ResumeMatcherError::DegenerateVector(_) => {
                "Insufficient text to compare. Make sure both documents contain readable words."
                    .to_string()
            }
            ResumeMatcherError::Extraction(e) => format!("Error processing PDF: {}", e),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ResumeMatcherError>;

/// Convert anyhow errors raised while loading embedding tables
impl From<anyhow::Error> for ResumeMatcherError {
    fn from(err: anyhow::Error) -> Self {
        ResumeMatcherError::Embedding(format!("{:#}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_error_carries_cause() {
        let err: ResumeMatcherError = ExtractionError::Unparseable("bad xref".to_string()).into();
        assert!(err.to_string().contains("bad xref"));
        assert!(err.user_message().starts_with("Error processing PDF"));
    }

    #[test]
    fn test_degenerate_vector_message() {
        let err = ResumeMatcherError::DegenerateVector(VectorOperand::Second);
        assert!(err.to_string().contains("second"));
        assert!(err.user_message().contains("Insufficient text"));
    }
}
