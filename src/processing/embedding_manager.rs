//! Embedding model management for downloading and locating Model2Vec models

use crate::error::{Result, ResumeMatcherError};
use hf_hub::api::tokio::Api;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Information about a known embedding model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingModelInfo {
    pub id: String,
    pub name: String,
    pub repo_id: String,
    pub size_mb: u64,
    pub description: String,
    pub dimensions: u32,
}

/// Models the tool knows how to fetch by short id.
pub fn catalogue() -> Vec<EmbeddingModelInfo> {
    vec![
        EmbeddingModelInfo {
            id: "potion-base-8M".to_string(),
            name: "Potion Base 8M".to_string(),
            repo_id: "minishlab/potion-base-8M".to_string(),
            size_mb: 33,
            description: "Distilled static embeddings, good quality for its size".to_string(),
            dimensions: 256,
        },
        EmbeddingModelInfo {
            id: "m2v-base".to_string(),
            name: "Model2Vec Base".to_string(),
            repo_id: "minishlab/M2V_base_output".to_string(),
            size_mb: 90,
            description: "Original Model2Vec base output".to_string(),
            dimensions: 256,
        },
        EmbeddingModelInfo {
            id: "m2v-large".to_string(),
            name: "Model2Vec Large".to_string(),
            repo_id: "minishlab/M2V_large_output".to_string(),
            size_mb: 250,
            description: "Larger vocabulary, higher accuracy".to_string(),
            dimensions: 512,
        },
    ]
}

/// Hub repo id for a catalogue id, repo id or display name.
pub fn repo_id_for(input: &str) -> Option<String> {
    let input_lower = input.to_lowercase();
    catalogue()
        .into_iter()
        .find(|m| m.id == input || m.repo_id == input || m.name.to_lowercase() == input_lower)
        .map(|m| m.repo_id)
}

/// Handles download, caching and lookup of embedding models
pub struct EmbeddingModelManager {
    models_dir: PathBuf,
    available_models: BTreeMap<String, EmbeddingModelInfo>,
    downloaded_models: BTreeSet<String>,
}

impl EmbeddingModelManager {
    pub async fn new(models_dir: PathBuf) -> Result<Self> {
        if !models_dir.exists() {
            fs::create_dir_all(&models_dir).await.map_err(|e| {
                ResumeMatcherError::Configuration(format!(
                    "Failed to create models directory {}: {}",
                    models_dir.display(),
                    e
                ))
            })?;
        }

        let mut manager = Self {
            models_dir,
            available_models: catalogue().into_iter().map(|m| (m.id.clone(), m)).collect(),
            downloaded_models: BTreeSet::new(),
        };
        manager.scan_downloaded_models().await?;

        Ok(manager)
    }

    async fn scan_downloaded_models(&mut self) -> Result<()> {
        let mut entries = fs::read_dir(&self.models_dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_dir() && is_model_directory(&entry.path()).await {
                self.downloaded_models
                    .insert(entry.file_name().to_string_lossy().to_string());
            }
        }

        Ok(())
    }

    /// Fetch a catalogue model into the models directory.
    ///
    /// An existing download is reused unless `force` is set.
    pub async fn download_model(&mut self, model_id: &str, force: bool) -> Result<PathBuf> {
        let id = self
            .resolve_model_id(model_id)
            .ok_or_else(|| ResumeMatcherError::ModelNotFound(model_id.to_string()))?;
        let model_info = self
            .available_models
            .get(&id)
            .cloned()
            .ok_or_else(|| ResumeMatcherError::ModelNotFound(model_id.to_string()))?;

        let model_dir = self.models_dir.join(&id);
        if self.downloaded_models.contains(&id) && !force {
            info!("Model {} already present at {}", id, model_dir.display());
            return Ok(model_dir);
        }

        info!(
            "Downloading embedding model {} ({} MB) from {}",
            model_info.name, model_info.size_mb, model_info.repo_id
        );

        fs::create_dir_all(&model_dir).await?;

        let api = Api::new().map_err(|e| {
            ResumeMatcherError::Embedding(format!("Failed to initialize HF API: {}", e))
        })?;
        let repo = api.model(model_info.repo_id.clone());

        let files = ["model.safetensors", "tokenizer.json", "config.json", "README.md"];
        for file in files {
            match repo.get(file).await {
                Ok(cached_path) => {
                    fs::copy(&cached_path, model_dir.join(file)).await?;
                    info!("Downloaded {}", file);
                }
                Err(e) if matches!(file, "config.json" | "README.md") => {
                    warn!("Optional file {} not available: {}", file, e);
                }
                Err(e) => {
                    return Err(ResumeMatcherError::Embedding(format!(
                        "Failed to download required file {}: {}",
                        file, e
                    )));
                }
            }
        }

        self.downloaded_models.insert(id.clone());
        info!("Embedding model {} ready", model_info.name);
        Ok(model_dir)
    }

    pub fn get_model_path(&self, model_id: &str) -> Option<PathBuf> {
        self.downloaded_models
            .contains(model_id)
            .then(|| self.models_dir.join(model_id))
    }

    pub fn list_available_models(&self) -> Vec<&EmbeddingModelInfo> {
        self.available_models.values().collect()
    }

    pub fn list_downloaded_models(&self) -> Vec<String> {
        self.downloaded_models.iter().cloned().collect()
    }

    pub fn get_model_info(&self, model_id: &str) -> Option<&EmbeddingModelInfo> {
        let id = self.resolve_model_id(model_id)?;
        self.available_models.get(&id)
    }

    pub fn is_model_downloaded(&self, model_id: &str) -> bool {
        self.downloaded_models.contains(model_id)
    }

    /// Resolve model ID from various formats (id, repo_id, display name)
    pub fn resolve_model_id(&self, input: &str) -> Option<String> {
        if self.available_models.contains_key(input) {
            return Some(input.to_string());
        }

        let input_lower = input.to_lowercase();
        self.available_models
            .values()
            .find(|info| info.repo_id == input || info.name.to_lowercase() == input_lower)
            .map(|info| info.id.clone())
    }
}

async fn is_model_directory(path: &Path) -> bool {
    fs::metadata(path.join("tokenizer.json")).await.is_ok()
        && fs::metadata(path.join("model.safetensors")).await.is_ok()
}
