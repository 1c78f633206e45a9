//! Text normalization into annotated token sequences

use crate::processing::document::{AnnotatedDocument, Token};
use crate::processing::pos_tagger::{LexiconTagger, PosTagger};
use log::debug;
use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

/// Lowercases, tokenizes and tags text.
///
/// Every token of the input is kept, including stopwords and punctuation; the
/// flags on each [`Token`] let later stages decide what to ignore.
pub struct Normalizer {
    stop_words: HashSet<String>,
    tagger: Box<dyn PosTagger>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self::with_tagger(Box::new(LexiconTagger::new()))
    }

    pub fn with_tagger(tagger: Box<dyn PosTagger>) -> Self {
        Self {
            stop_words: Self::create_stop_words(),
            tagger,
        }
    }

    pub fn normalize(&self, text: &str) -> AnnotatedDocument {
        let lowered = self.normalize_unicode(&text.to_lowercase());
        let words = self.tokenize(&lowered);
        let tags = self.tagger.tag(&words);

        let tokens: Vec<Token> = words
            .iter()
            .zip(tags)
            .map(|(word, pos)| Token {
                text: (*word).to_string(),
                pos,
                is_stopword: self.is_stop_word(word),
                is_punctuation: !word.chars().any(char::is_alphanumeric),
            })
            .collect();

        debug!("Normalized {} characters into {} tokens", text.len(), tokens.len());
        AnnotatedDocument::new(tokens)
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Split on Unicode word boundaries, dropping whitespace runs.
    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.split_word_bounds()
            .filter(|piece| !piece.trim().is_empty())
            .collect()
    }

    fn normalize_unicode(&self, text: &str) -> String {
        text.chars()
            .map(|c| match c {
                '\u{2018}' | '\u{2019}' => '\'',
                '\u{201C}' | '\u{201D}' => '"',
                '\u{2013}' | '\u{2014}' => '-',
                '\u{2026}' => '.',
                '\u{00A0}' => ' ',
                _ => c,
            })
            .collect()
    }

    /// Common English function words
    fn create_stop_words() -> HashSet<String> {
        let stop_words = [
            "a", "about", "above", "across", "after", "afterwards", "again", "against",
            "all", "almost", "alone", "along", "already", "also", "although", "always",
            "am", "among", "amongst", "an", "and", "another", "any", "anyhow", "anyone",
            "anything", "anyway", "anywhere", "are", "around", "as", "at", "back", "be",
            "became", "because", "become", "becomes", "becoming", "been", "before",
            "beforehand", "behind", "being", "below", "beside", "besides", "between",
            "beyond", "both", "but", "by", "can", "cannot", "could", "did", "do", "does",
            "doing", "done", "down", "due", "during", "each", "either", "else",
            "elsewhere", "enough", "even", "ever", "every", "everyone", "everything",
            "everywhere", "except", "few", "first", "for", "former", "formerly", "from",
            "further", "had", "has", "have", "he", "hence", "her", "here", "hereafter",
            "hereby", "herein", "hers", "herself", "him", "himself", "his", "how",
            "however", "i", "if", "in", "indeed", "into", "is", "it", "its", "itself",
            "just", "last", "latter", "least", "less", "many", "may", "me", "meanwhile",
            "might", "mine", "more", "moreover", "most", "mostly", "much", "must", "my",
            "myself", "namely", "neither", "never", "nevertheless", "next", "no",
            "nobody", "none", "nor", "not", "nothing", "now", "nowhere", "of", "off",
            "often", "on", "once", "one", "only", "onto", "or", "other", "others",
            "otherwise", "our", "ours", "ourselves", "out", "over", "own", "per",
            "perhaps", "please", "quite", "rather", "really", "same", "several", "she",
            "should", "since", "so", "some", "somehow", "someone", "something",
            "sometime", "sometimes", "somewhere", "still", "such", "than", "that", "the",
            "their", "them", "themselves", "then", "thence", "there", "thereafter",
            "thereby", "therefore", "therein", "these", "they", "this", "those",
            "though", "through", "throughout", "thru", "thus", "to", "together", "too",
            "toward", "towards", "under", "unless", "until", "up", "upon", "us", "very",
            "via", "was", "we", "well", "were", "what", "whatever", "when", "whence",
            "whenever", "where", "whereas", "whereby", "wherein", "whether", "which",
            "while", "whither", "who", "whoever", "whole", "whom", "whose", "why",
            "will", "with", "within", "without", "would", "yet", "you", "your", "yours",
            "yourself", "yourselves", "'s", "'re", "'ve", "'ll", "'d", "'m", "n't",
        ];

        stop_words.iter().map(|&s| s.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::document::PartOfSpeech;

    fn texts(doc: &AnnotatedDocument) -> Vec<&str> {
        doc.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_empty_input_yields_empty_document() {
        let normalizer = Normalizer::new();
        assert!(normalizer.normalize("").is_empty());
        assert!(normalizer.normalize("   \n\t ").is_empty());
    }

    #[test]
    fn test_lowercases_and_keeps_punctuation_tokens() {
        let doc = Normalizer::new().normalize("Rust, Go and AWS.");
        assert_eq!(texts(&doc), vec!["rust", ",", "go", "and", "aws", "."]);

        let comma = &doc.tokens()[1];
        assert!(comma.is_punctuation);
        assert_eq!(comma.pos, PartOfSpeech::Other);

        let and = &doc.tokens()[3];
        assert!(and.is_stopword);
        assert!(!and.is_punctuation);
    }

    #[test]
    fn test_normalization_is_deterministic() {
        let normalizer = Normalizer::new();
        let text = "Senior engineer building distributed systems in Rust.";
        assert_eq!(normalizer.normalize(text), normalizer.normalize(text));
    }

    #[test]
    fn test_smart_punctuation_is_folded() {
        let doc = Normalizer::new().normalize("team\u{2019}s \u{201C}cloud\u{201D}");
        assert!(texts(&doc).contains(&"cloud"));
        assert!(doc.iter().all(|t| !t.text.contains('\u{201C}')));
    }

    #[test]
    fn test_resume_sentence_tags() {
        let doc = Normalizer::new()
            .normalize("Experienced Python engineer with AWS and Docker skills");
        let tagged: Vec<(&str, PartOfSpeech)> =
            doc.iter().map(|t| (t.text.as_str(), t.pos)).collect();
        assert_eq!(
            tagged,
            vec![
                ("experienced", PartOfSpeech::Other),
                ("python", PartOfSpeech::Noun),
                ("engineer", PartOfSpeech::Noun),
                ("with", PartOfSpeech::Other),
                ("aws", PartOfSpeech::Noun),
                ("and", PartOfSpeech::Other),
                ("docker", PartOfSpeech::Noun),
                ("skills", PartOfSpeech::Noun),
            ]
        );
    }

    struct AllVerbs;

    impl PosTagger for AllVerbs {
        fn tag(&self, tokens: &[&str]) -> Vec<PartOfSpeech> {
            vec![PartOfSpeech::Verb; tokens.len()]
        }
    }

    #[test]
    fn test_custom_tagger_is_used() {
        let doc = Normalizer::with_tagger(Box::new(AllVerbs)).normalize("resume text");
        assert!(doc.iter().all(|t| t.pos == PartOfSpeech::Verb));
    }
}
