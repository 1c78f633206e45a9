//! Text processing and match analysis

pub mod analyzer;
pub mod document;
pub mod embedding_manager;
pub mod embeddings;
pub mod keywords;
pub mod normalizer;
pub mod pos_tagger;
pub mod similarity;
pub mod vectorizer;

pub use analyzer::MatchAnalyzer;
pub use document::{AnnotatedDocument, KeywordSet, MatchResult, PartOfSpeech, Token};
pub use embeddings::{shared_embeddings, Embeddings, StaticEmbeddings, WordVectors};
pub use normalizer::Normalizer;
