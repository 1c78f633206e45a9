//! Configuration management for the resume matcher

use crate::error::{Result, ResumeMatcherError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub embeddings: EmbeddingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    pub source: EmbeddingSource,
    /// Model id from the catalogue, Hugging Face repo id, or local directory
    pub model: String,
    pub models_dir: PathBuf,
    /// Plain-text word vector file, used when `source = "word_vectors"`
    pub word_vectors_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddingSource {
    Model2Vec,
    WordVectors,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
    pub max_listed_terms: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
}

impl Default for Config {
    fn default() -> Self {
        let models_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".resume-matcher")
            .join("models");

        Self {
            embeddings: EmbeddingConfig {
                source: EmbeddingSource::Model2Vec,
                model: "potion-base-8M".to_string(),
                models_dir,
                word_vectors_path: None,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
                max_listed_terms: 10,
            },
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults there on first use.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    /// Load from an explicit file. A missing file is an error here.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            ResumeMatcherError::Configuration(format!(
                "Failed to parse config '{}': {}",
                path.display(),
                e
            ))
        })
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            ResumeMatcherError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-matcher")
            .join("config.toml")
    }

    pub fn models_dir(&self) -> &PathBuf {
        &self.embeddings.models_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.embeddings.source, EmbeddingSource::Model2Vec);
        assert_eq!(config.output.max_listed_terms, 10);
        assert!(config.embeddings.word_vectors_path.is_none());
    }

    #[test]
    fn test_save_and_load_roundtrip_through_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.embeddings.source = EmbeddingSource::WordVectors;
        config.embeddings.word_vectors_path = Some(PathBuf::from("/tmp/vectors.txt"));
        config.output.format = OutputFormat::Json;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.embeddings.source, EmbeddingSource::WordVectors);
        assert_eq!(loaded.output.format, OutputFormat::Json);
        assert_eq!(
            loaded.embeddings.word_vectors_path,
            Some(PathBuf::from("/tmp/vectors.txt"))
        );
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "embeddings = 42").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ResumeMatcherError::Configuration(_)));
    }
}
