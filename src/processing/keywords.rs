//! Content-word keyword extraction

use crate::processing::document::{AnnotatedDocument, KeywordSet};

/// Distinct surface forms of the content words in a document.
///
/// A token qualifies when it is neither a stopword nor punctuation and is
/// tagged noun, proper noun or verb.
pub fn extract_keywords(document: &AnnotatedDocument) -> KeywordSet {
    document
        .iter()
        .filter(|t| !t.is_stopword && !t.is_punctuation && t.pos.is_content())
        .map(|t| t.text.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::document::{PartOfSpeech, Token};
    use crate::processing::normalizer::Normalizer;

    fn token(text: &str, pos: PartOfSpeech, is_stopword: bool, is_punctuation: bool) -> Token {
        Token {
            text: text.to_string(),
            pos,
            is_stopword,
            is_punctuation,
        }
    }

    #[test]
    fn test_filters_by_flags_and_pos() {
        let doc = AnnotatedDocument::new(vec![
            token("rust", PartOfSpeech::Noun, false, false),
            token("deploy", PartOfSpeech::Verb, false, false),
            token("k8s", PartOfSpeech::ProperNoun, false, false),
            token("quickly", PartOfSpeech::Other, false, false),
            token("the", PartOfSpeech::Other, true, false),
            token("whole", PartOfSpeech::Noun, true, false),
            token("-", PartOfSpeech::Noun, false, true),
        ]);

        let keywords: Vec<String> = extract_keywords(&doc).into_iter().collect();
        assert_eq!(keywords, vec!["deploy", "k8s", "rust"]);
    }

    #[test]
    fn test_duplicates_collapse() {
        let doc = Normalizer::new().normalize("Rust rust RUST");
        assert_eq!(extract_keywords(&doc).len(), 1);
    }

    #[test]
    fn test_job_description_keywords() {
        let doc = Normalizer::new().normalize("Looking for a Python developer familiar with AWS");
        let keywords: Vec<String> = extract_keywords(&doc).into_iter().collect();
        assert_eq!(keywords, vec!["aws", "developer", "looking", "python"]);
    }

    #[test]
    fn test_empty_document() {
        assert!(extract_keywords(&AnnotatedDocument::default()).is_empty());
    }
}
