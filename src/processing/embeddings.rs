//! Token embedding tables

use crate::config::{Config, EmbeddingSource};
use crate::error::{Result, ResumeMatcherError};
use crate::processing::embedding_manager::repo_id_for;
use anyhow::{anyhow, Context};
use half::f16;
use hf_hub::api::sync::Api;
use log::{debug, info};
use ndarray::Array2;
use once_cell::sync::OnceCell;
use safetensors::{tensor::Dtype, SafeTensors};
use serde_json::Value;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fs;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokenizers::Tokenizer;

/// Lookup from a single lowercased token to its vector.
///
/// Tables are read-only once loaded and are shared across threads.
pub trait Embeddings: Send + Sync {
    /// Length of every vector in the table.
    fn dimension(&self) -> usize;

    /// Vector for `token`, or `None` when the table has nothing for it.
    fn vector_for(&self, token: &str) -> Option<Cow<'_, [f32]>>;

    /// Human readable table name, used in reports.
    fn name(&self) -> &str;
}

/// Model2Vec static embedding table.
///
/// A token's vector is the mean of the rows of its sub-word pieces, ignoring
/// the tokenizer's unknown piece.
pub struct StaticEmbeddings {
    name: String,
    tokenizer: Tokenizer,
    embeddings: Array2<f32>,
    unk_token_id: Option<u32>,
}

impl StaticEmbeddings {
    /// Load from a local model folder or a Hugging Face repo id.
    pub fn from_pretrained(repo_or_path: &str) -> anyhow::Result<Self> {
        let start_time = Instant::now();
        let base = Path::new(repo_or_path);

        let (tok_path, mdl_path) = if base.exists() {
            let t = base.join("tokenizer.json");
            let m = base.join("model.safetensors");
            if !t.exists() || !m.exists() {
                return Err(anyhow!(
                    "local path {} missing tokenizer.json or model.safetensors",
                    base.display()
                ));
            }
            (t, m)
        } else {
            info!("Fetching embedding model {} from the Hugging Face Hub", repo_or_path);
            let api = Api::new().context("hf-hub API init failed")?;
            let repo = api.model(repo_or_path.to_string());
            let t = repo.get("tokenizer.json").context("failed to fetch tokenizer.json")?;
            let m = repo
                .get("model.safetensors")
                .context("failed to fetch model.safetensors")?;
            (t, m)
        };

        let tokenizer = Tokenizer::from_file(&tok_path)
            .map_err(|e| anyhow!("failed to load tokenizer: {e}"))?;
        let unk_token_id = Self::unknown_token_id(&tokenizer)?;

        let model_bytes = fs::read(&mdl_path).context("failed to read model.safetensors")?;
        let embeddings = Self::decode_embeddings(&model_bytes)?;

        info!(
            "Loaded {} ({} x {}) in {:.2?}",
            repo_or_path,
            embeddings.nrows(),
            embeddings.ncols(),
            start_time.elapsed()
        );

        Ok(Self {
            name: repo_or_path.to_string(),
            tokenizer,
            embeddings,
            unk_token_id,
        })
    }

    fn unknown_token_id(tokenizer: &Tokenizer) -> anyhow::Result<Option<u32>> {
        let spec_json = tokenizer
            .to_string(false)
            .map_err(|e| anyhow!("tokenizer -> JSON failed: {e}"))?;
        let spec: Value = serde_json::from_str(&spec_json)?;
        let unk_token = spec
            .get("model")
            .and_then(|m| m.get("unk_token"))
            .and_then(Value::as_str)
            .unwrap_or("[UNK]");
        Ok(tokenizer.token_to_id(unk_token))
    }

    /// Decode the `embeddings` (or `0`) tensor into an f32 matrix.
    fn decode_embeddings(model_bytes: &[u8]) -> anyhow::Result<Array2<f32>> {
        let safet = SafeTensors::deserialize(model_bytes).context("failed to parse safetensors")?;
        let tensor = safet
            .tensor("embeddings")
            .or_else(|_| safet.tensor("0"))
            .context("embeddings tensor not found")?;

        let [rows, cols]: [usize; 2] = tensor
            .shape()
            .try_into()
            .map_err(|_| anyhow!("embedding tensor is not 2-D"))?;
        let raw = tensor.data();

        let floats: Vec<f32> = match tensor.dtype() {
            Dtype::F32 => raw
                .chunks_exact(4)
                .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
                .collect(),
            Dtype::F16 => raw
                .chunks_exact(2)
                .map(|b| f16::from_le_bytes([b[0], b[1]]).to_f32())
                .collect(),
            Dtype::I8 => raw.iter().map(|&b| f32::from(b as i8)).collect(),
            other => return Err(anyhow!("unsupported tensor dtype: {other:?}")),
        };

        Array2::from_shape_vec((rows, cols), floats).context("failed to build embeddings array")
    }
}

impl Embeddings for StaticEmbeddings {
    fn dimension(&self) -> usize {
        self.embeddings.ncols()
    }

    fn vector_for(&self, token: &str) -> Option<Cow<'_, [f32]>> {
        let encoding = self.tokenizer.encode(token, false).ok()?;
        let ids: Vec<u32> = encoding
            .get_ids()
            .iter()
            .copied()
            .filter(|&id| Some(id) != self.unk_token_id && (id as usize) < self.embeddings.nrows())
            .collect();
        if ids.is_empty() {
            return None;
        }

        let mut sum = vec![0.0f32; self.dimension()];
        for &id in &ids {
            for (acc, &v) in sum.iter_mut().zip(self.embeddings.row(id as usize).iter()) {
                *acc += v;
            }
        }
        let count = ids.len() as f32;
        sum.iter_mut().for_each(|x| *x /= count);
        Some(Cow::Owned(sum))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Plain-text word vector table (`word v1 v2 ...` per line).
///
/// An optional first line holding exactly two integers (`count dim`) is
/// treated as a word2vec header and skipped.
#[derive(Debug)]
pub struct WordVectors {
    name: String,
    dimension: usize,
    vectors: HashMap<String, Vec<f32>>,
}

impl WordVectors {
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = fs::File::open(path).map_err(|e| {
            ResumeMatcherError::Embedding(format!(
                "Failed to open word vectors '{}': {}",
                path.display(),
                e
            ))
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Self::from_reader(file, &name)
    }

    pub fn from_reader<R: Read>(reader: R, name: &str) -> Result<Self> {
        let mut vectors = HashMap::new();
        let mut dimension: Option<usize> = None;

        for (index, line) in BufReader::new(reader).lines().enumerate() {
            let line = line?;
            let mut fields = line.split_whitespace();
            let Some(word) = fields.next() else {
                continue;
            };
            let values: Vec<&str> = fields.collect();

            if index == 0 && values.len() == 1 && is_header(word, values[0]) {
                debug!("Skipping word vector header: {}", line);
                continue;
            }

            let vector = values
                .iter()
                .map(|v| v.parse::<f32>())
                .collect::<std::result::Result<Vec<f32>, _>>()
                .map_err(|e| {
                    ResumeMatcherError::Embedding(format!(
                        "Invalid value on line {} of {}: {}",
                        index + 1,
                        name,
                        e
                    ))
                })?;

            match dimension {
                None => dimension = Some(vector.len()),
                Some(dim) if dim != vector.len() => {
                    return Err(ResumeMatcherError::DimensionMismatch {
                        left: dim,
                        right: vector.len(),
                    });
                }
                Some(_) => {}
            }

            vectors.insert(word.to_lowercase(), vector);
        }

        let dimension = match dimension {
            Some(dim) if dim > 0 => dim,
            _ => {
                return Err(ResumeMatcherError::Embedding(format!(
                    "Word vector table {} is empty",
                    name
                )))
            }
        };

        info!("Loaded {} word vectors of dimension {} from {}", vectors.len(), dimension, name);

        Ok(Self {
            name: name.to_string(),
            dimension,
            vectors,
        })
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

fn is_header(first: &str, second: &str) -> bool {
    first.parse::<usize>().is_ok() && second.parse::<usize>().is_ok()
}

impl Embeddings for WordVectors {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn vector_for(&self, token: &str) -> Option<Cow<'_, [f32]>> {
        self.vectors.get(token).map(|v| Cow::Borrowed(v.as_slice()))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Load the table described by `config`, without caching.
pub fn load_embeddings(config: &Config) -> Result<Arc<dyn Embeddings>> {
    match config.embeddings.source {
        EmbeddingSource::WordVectors => {
            let path = config.embeddings.word_vectors_path.as_ref().ok_or_else(|| {
                ResumeMatcherError::Configuration(
                    "embeddings.word_vectors_path must be set when source = \"word_vectors\""
                        .to_string(),
                )
            })?;
            Ok(Arc::new(WordVectors::from_path(path)?))
        }
        EmbeddingSource::Model2Vec => {
            let location = model_location(config);
            let model = StaticEmbeddings::from_pretrained(&location)?;
            Ok(Arc::new(model))
        }
    }
}

/// Local directory if one exists, else the Hub repo id for the configured model.
fn model_location(config: &Config) -> String {
    let model = &config.embeddings.model;

    let direct = PathBuf::from(model);
    if direct.is_dir() {
        return direct.to_string_lossy().to_string();
    }

    let downloaded = config.models_dir().join(model);
    if downloaded.is_dir() {
        return downloaded.to_string_lossy().to_string();
    }

    repo_id_for(model).unwrap_or_else(|| model.clone())
}

static SHARED: OnceCell<Arc<dyn Embeddings>> = OnceCell::new();

/// Process-wide table, loaded on first call and reused afterwards.
///
/// Later calls return the first table regardless of `config`.
pub fn shared_embeddings(config: &Config) -> Result<Arc<dyn Embeddings>> {
    SHARED.get_or_try_init(|| load_embeddings(config)).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    const TABLE: &str = "rust 1.0 0.0 0.0\npython 0.0 1.0 0.0\nAWS 0.5 0.5 0.0\n";

    #[test]
    fn test_word_vectors_from_reader() {
        let table = WordVectors::from_reader(TABLE.as_bytes(), "inline").unwrap();
        assert_eq!(table.dimension(), 3);
        assert_eq!(table.len(), 3);
        assert_eq!(table.vector_for("python").unwrap().as_ref(), &[0.0, 1.0, 0.0]);
        assert_eq!(table.vector_for("aws").unwrap().as_ref(), &[0.5, 0.5, 0.0]);
        assert!(table.vector_for("cobol").is_none());
        assert_eq!(table.name(), "inline");
    }

    #[test]
    fn test_word2vec_header_is_skipped() {
        let table = WordVectors::from_reader("2 2\ngo 1 0\njava 0 1\n".as_bytes(), "w2v").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.dimension(), 2);
    }

    #[test]
    fn test_ragged_table_is_rejected() {
        let err = WordVectors::from_reader("go 1 0\njava 0 1 1\n".as_bytes(), "bad").unwrap_err();
        assert!(matches!(
            err,
            ResumeMatcherError::DimensionMismatch { left: 2, right: 3 }
        ));
    }

    #[test]
    fn test_non_numeric_value_is_rejected() {
        let err = WordVectors::from_reader("go 1 zero\n".as_bytes(), "bad").unwrap_err();
        assert!(matches!(err, ResumeMatcherError::Embedding(_)));
    }

    #[test]
    fn test_empty_table_is_rejected() {
        assert!(WordVectors::from_reader("".as_bytes(), "empty").is_err());
    }

    #[test]
    fn test_word_vectors_from_path() {
        let mut file = NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, TABLE.as_bytes()).unwrap();
        let table = WordVectors::from_path(file.path()).unwrap();
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_missing_word_vectors_path_is_configuration_error() {
        let mut config = Config::default();
        config.embeddings.source = EmbeddingSource::WordVectors;
        config.embeddings.word_vectors_path = None;
        let err = load_embeddings(&config).err().unwrap();
        assert!(matches!(err, ResumeMatcherError::Configuration(_)));
    }

    #[test]
    fn test_model_location_prefers_downloaded_directory() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let mut config = Config::default();
        config.embeddings.models_dir = temp_dir.path().to_path_buf();
        assert_eq!(model_location(&config), "minishlab/potion-base-8M");

        std::fs::create_dir_all(temp_dir.path().join("potion-base-8M")).unwrap();
        assert_eq!(
            model_location(&config),
            temp_dir.path().join("potion-base-8M").to_string_lossy()
        );
    }
}
