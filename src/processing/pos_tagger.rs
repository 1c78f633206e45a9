//! Rule-based part-of-speech tagging for lowercased English tokens

use crate::processing::document::PartOfSpeech;
use std::collections::HashSet;

/// Assigns a coarse part of speech to each token of a sequence.
///
/// Implementations must be deterministic: the same token sequence always
/// yields the same tags.
pub trait PosTagger: Send + Sync {
    fn tag(&self, tokens: &[&str]) -> Vec<PartOfSpeech>;
}

/// Lexicon and suffix driven tagger.
///
/// Closed-class words, adverbs and adjectives map to `Other`; known verbs and
/// verb-shaped suffixes map to `Verb`; technology identifiers mixing letters
/// with digits or `.`/`+`/`#` map to `ProperNoun`; remaining words are nouns.
pub struct LexiconTagger {
    closed_class: HashSet<&'static str>,
    adverbs: HashSet<&'static str>,
    adjectives: HashSet<&'static str>,
    verbs: HashSet<&'static str>,
    verb_triggers: HashSet<&'static str>,
    suffix_exceptions: HashSet<&'static str>,
}

impl Default for LexiconTagger {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconTagger {
    pub fn new() -> Self {
        Self {
            closed_class: CLOSED_CLASS.iter().copied().collect(),
            adverbs: ADVERBS.iter().copied().collect(),
            adjectives: ADJECTIVES.iter().copied().collect(),
            verbs: VERBS.iter().copied().collect(),
            verb_triggers: VERB_TRIGGERS.iter().copied().collect(),
            suffix_exceptions: SUFFIX_EXCEPTIONS.iter().copied().collect(),
        }
    }

    fn tag_word(&self, word: &str, previous: Option<&str>) -> PartOfSpeech {
        if !word.chars().any(char::is_alphanumeric) {
            return PartOfSpeech::Other;
        }
        if is_number(word) || self.closed_class.contains(word) {
            return PartOfSpeech::Other;
        }
        if is_identifier(word) {
            return PartOfSpeech::ProperNoun;
        }
        if self.verbs.contains(word) {
            return PartOfSpeech::Verb;
        }
        if self.adverbs.contains(word) || self.adjectives.contains(word) {
            return PartOfSpeech::Other;
        }
        if previous.is_some_and(|p| self.verb_triggers.contains(p)) {
            return PartOfSpeech::Verb;
        }
        if self.suffix_exceptions.contains(word) {
            return PartOfSpeech::Noun;
        }
        if has_suffix(word, "ly", 5)
            || ADJECTIVE_SUFFIXES
                .iter()
                .any(|s| has_suffix(word, s, s.len() + 3))
        {
            return PartOfSpeech::Other;
        }
        if VERB_SUFFIXES.iter().any(|s| has_suffix(word, s, s.len() + 3)) {
            return PartOfSpeech::Verb;
        }
        PartOfSpeech::Noun
    }
}

impl PosTagger for LexiconTagger {
    fn tag(&self, tokens: &[&str]) -> Vec<PartOfSpeech> {
        tokens
            .iter()
            .enumerate()
            .map(|(i, word)| {
                let previous = i.checked_sub(1).map(|p| tokens[p]);
                self.tag_word(word, previous)
            })
            .collect()
    }
}

fn has_suffix(word: &str, suffix: &str, min_len: usize) -> bool {
    word.len() >= min_len && word.ends_with(suffix)
}

fn is_number(word: &str) -> bool {
    word.chars().any(|c| c.is_ascii_digit())
        && word.chars().all(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '%'))
}

/// `ec2`, `k8s`, `node.js`, `asp.net`
fn is_identifier(word: &str) -> bool {
    let has_alpha = word.chars().any(char::is_alphabetic);
    let has_digit = word.chars().any(|c| c.is_ascii_digit());
    let has_joiner = word
        .trim_matches(|c: char| !c.is_alphanumeric())
        .contains(|c: char| matches!(c, '.' | '+' | '#'));
    has_alpha && (has_digit || has_joiner)
}

const ADJECTIVE_SUFFIXES: &[&str] = &["ful", "ous", "able", "ible", "less", "ical"];

const VERB_SUFFIXES: &[&str] = &["ing", "ed", "ize", "ise", "ify"];

const SUFFIX_EXCEPTIONS: &[&str] = &[
    "thing", "string", "spring", "morning", "evening", "ceiling", "king", "ring",
    "need", "speed", "feed", "seed", "bed", "red", "shed", "hundred",
    "enterprise", "expertise", "exercise", "franchise", "premise", "size", "prize",
    "table", "cable", "variable", "deliverable", "label",
];

const VERB_TRIGGERS: &[&str] = &[
    "to", "will", "can", "could", "should", "must", "would", "shall", "might",
];

const CLOSED_CLASS: &[&str] = &[
    // determiners
    "a", "an", "the", "this", "that", "these", "those", "each", "every", "either",
    "neither", "some", "any", "no", "all", "both", "few", "many", "much", "more",
    "most", "several", "such", "another", "other", "own",
    // pronouns
    "i", "me", "my", "mine", "myself", "we", "us", "our", "ours", "ourselves",
    "you", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "her", "hers", "herself", "it", "its", "itself", "they", "them", "their",
    "theirs", "themselves", "who", "whom", "whose", "which", "what", "whatever",
    "whoever", "someone", "anyone", "everyone", "nobody", "something", "anything",
    "everything", "nothing",
    // prepositions
    "about", "above", "across", "after", "against", "along", "among", "around", "as",
    "at", "before", "behind", "below", "beneath", "beside", "between", "beyond", "by",
    "despite", "down", "during", "except", "for", "from", "in", "inside", "into",
    "like", "near", "of", "off", "on", "onto", "out", "outside", "over", "past",
    "per", "since", "through", "throughout", "till", "to", "toward", "towards",
    "under", "underneath", "until", "unto", "up", "upon", "via", "with", "within",
    "without",
    // conjunctions
    "and", "or", "but", "nor", "so", "yet", "if", "because", "although", "though",
    "while", "whereas", "unless", "whether", "than", "once",
    // auxiliaries and modals
    "am", "is", "are", "was", "were", "be", "been", "being", "do", "does", "did",
    "have", "has", "had", "having", "will", "would", "shall", "should", "can",
    "could", "may", "might", "must", "'s", "'re", "'ve", "'ll", "'d", "'m", "n't",
    // particles and wh-adverbs
    "not", "when", "where", "why", "how", "there", "here",
    // number words
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "first", "second", "third",
];

const ADVERBS: &[&str] = &[
    "also", "very", "well", "just", "often", "always", "never", "now", "then",
    "still", "already", "again", "ever", "even", "only", "too", "quite", "rather",
    "almost", "soon", "together", "however", "otherwise", "therefore", "thus",
    "instead", "perhaps", "away", "back", "ago", "else",
];

const ADJECTIVES: &[&str] = &[
    "familiar", "strong", "good", "great", "excellent", "senior", "junior", "new",
    "old", "large", "small", "big", "able", "solid", "proficient", "responsible",
    "remote", "full", "key", "high", "low", "best", "better", "various", "relevant",
    "related", "preferred", "required", "experienced", "skilled", "detailed",
    "advanced", "same", "different", "similar", "modern", "complex", "simple",
    "agile", "technical", "professional", "effective", "efficient", "reliable",
    "scalable", "robust", "fast", "hands", "main", "major", "minor", "top", "early",
    "late", "current", "previous", "recent", "deep", "broad", "open",
    "real", "clear", "proven", "passionate", "motivated", "eager", "plus",
];

const VERBS: &[&str] = &[
    "build", "built", "design", "develop", "lead", "led", "manage", "deploy",
    "implement", "create", "maintain", "write", "wrote", "written", "collaborate",
    "drive", "drove", "ship", "mentor", "improve", "optimize", "scale",
    "automate", "seek", "join", "require", "analyze", "analyse", "debug", "migrate",
    "deliver", "launch", "grow", "grew", "run", "ran", "apply", "work", "use",
    "know", "knew", "learn", "learnt", "understand", "understood", "communicate",
    "coordinate", "define", "establish", "execute", "integrate", "monitor",
    "partner", "plan", "reduce", "increase", "review", "solve", "support", "train",
    "troubleshoot", "looking", "seeking", "hire", "hiring",
];
