//! Annotated document model shared by the pipeline stages

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Coarse part-of-speech category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartOfSpeech {
    Noun,
    ProperNoun,
    Verb,
    Other,
}

impl PartOfSpeech {
    /// Categories whose tokens can become keywords.
    pub fn is_content(self) -> bool {
        matches!(
            self,
            PartOfSpeech::Noun | PartOfSpeech::ProperNoun | PartOfSpeech::Verb
        )
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            PartOfSpeech::Noun => "NOUN",
            PartOfSpeech::ProperNoun => "PROPN",
            PartOfSpeech::Verb => "VERB",
            PartOfSpeech::Other => "OTHER",
        };
        write!(f, "{}", tag)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub pos: PartOfSpeech,
    pub is_stopword: bool,
    pub is_punctuation: bool,
}

/// Ordered token sequence produced by the normalizer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedDocument {
    tokens: Vec<Token>,
}

impl AnnotatedDocument {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }
}

impl<'a> IntoIterator for &'a AnnotatedDocument {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

/// Distinct lowercase keywords, iterated in lexicographic order.
pub type KeywordSet = BTreeSet<String>;

/// Outcome of comparing one resume with one job description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub similarity_score: f32,
    pub matching_terms: KeywordSet,
    pub missing_terms: KeywordSet,
}
