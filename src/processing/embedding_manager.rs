//! Download and bookkeeping for Model2Vec embedding models

use crate::error::{Result, ResumeAtsError};
use hf_hub::api::tokio::Api;
use log::{debug, info, warn};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tokio::fs;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct EmbeddingModelInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub repo_id: &'static str,
    pub size_mb: u64,
    pub dimensions: u32,
    pub description: &'static str,
}

/// Models known to work with the semantic similarity metric, preferred first
pub const KNOWN_MODELS: [EmbeddingModelInfo; 3] = [
    EmbeddingModelInfo {
        id: "potion-base-8M",
        name: "Potion Base 8M",
        repo_id: "minishlab/potion-base-8M",
        size_mb: 33,
        dimensions: 256,
        description: "Compact Model2Vec embeddings, recommended default",
    },
    EmbeddingModelInfo {
        id: "m2v-base",
        name: "Model2Vec Base",
        repo_id: "minishlab/M2V_base_output",
        size_mb: 90,
        dimensions: 256,
        description: "Original Model2Vec base embeddings",
    },
    EmbeddingModelInfo {
        id: "m2v-large",
        name: "Model2Vec Large",
        repo_id: "minishlab/M2V_large_output",
        size_mb: 250,
        dimensions: 512,
        description: "Larger Model2Vec embeddings for higher accuracy",
    },
];

const REQUIRED_FILES: [&str; 2] = ["model.safetensors", "tokenizer.json"];
const OPTIONAL_FILES: [&str; 2] = ["config.json", "README.md"];

pub struct EmbeddingModelManager {
    models_dir: PathBuf,
    downloaded: BTreeSet<String>,
}

impl EmbeddingModelManager {
    pub async fn new(models_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&models_dir).await.map_err(|e| {
            ResumeAtsError::ModelError(format!("Failed to create models directory: {}", e))
        })?;

        let mut manager = Self {
            models_dir,
            downloaded: BTreeSet::new(),
        };
        manager.scan_downloaded_models().await?;

        Ok(manager)
    }

    async fn scan_downloaded_models(&mut self) -> Result<()> {
        let mut entries = fs::read_dir(&self.models_dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_dir() {
                continue;
            }
            if Self::is_model_directory(&entry.path()).await {
                let model_id = entry.file_name().to_string_lossy().to_string();
                debug!("Found downloaded embedding model {}", model_id);
                self.downloaded.insert(model_id);
            }
        }

        Ok(())
    }

    async fn is_model_directory(path: &Path) -> bool {
        for file in REQUIRED_FILES {
            if fs::metadata(path.join(file)).await.is_err() {
                return false;
            }
        }
        true
    }

    pub fn models_dir(&self) -> &Path {
        &self.models_dir
    }

    pub fn list_available_models(&self) -> &'static [EmbeddingModelInfo] {
        &KNOWN_MODELS
    }

    pub fn list_downloaded_models(&self) -> Vec<String> {
        self.downloaded.iter().cloned().collect()
    }

    pub fn is_model_downloaded(&self, model_id: &str) -> bool {
        self.downloaded.contains(model_id)
    }

    pub fn get_model_info(&self, model_id: &str) -> Option<&'static EmbeddingModelInfo> {
        KNOWN_MODELS.iter().find(|info| info.id == model_id)
    }

    pub fn get_model_path(&self, model_id: &str) -> Option<PathBuf> {
        self.is_model_downloaded(model_id)
            .then(|| self.models_dir.join(model_id))
    }

    /// Accepts a model id, a Hugging Face repo id or a display name
    pub fn resolve_model_id(&self, input: &str) -> Option<&'static str> {
        KNOWN_MODELS
            .iter()
            .find(|info| {
                info.id == input || info.repo_id == input || info.name.eq_ignore_ascii_case(input)
            })
            .map(|info| info.id)
    }

    /// Download a known model from the Hugging Face Hub into the models directory
    pub async fn download_model(&mut self, model_id: &str) -> Result<PathBuf> {
        let info = self
            .get_model_info(model_id)
            .ok_or_else(|| ResumeAtsError::ModelError(format!("Unknown embedding model: {}", model_id)))?;

        let model_dir = self.models_dir.join(info.id);
        if self.is_model_downloaded(info.id) {
            return Ok(model_dir);
        }

        info!("Downloading {} ({} MB) from {}", info.name, info.size_mb, info.repo_id);
        fs::create_dir_all(&model_dir).await?;

        let api = Api::new()
            .map_err(|e| ResumeAtsError::ModelError(format!("Failed to initialize HF API: {}", e)))?;
        let repo = api.model(info.repo_id.to_string());

        for file in REQUIRED_FILES {
            let cached = repo.get(file).await.map_err(|e| {
                ResumeAtsError::ModelError(format!("Failed to download required file {}: {}", file, e))
            })?;
            fs::copy(&cached, model_dir.join(file)).await?;
            debug!("Downloaded {}", file);
        }

        for file in OPTIONAL_FILES {
            match repo.get(file).await {
                Ok(cached) => {
                    fs::copy(&cached, model_dir.join(file)).await?;
                }
                Err(e) => warn!("Optional file {} not available: {}", file, e),
            }
        }

        self.downloaded.insert(info.id.to_string());
        Ok(model_dir)
    }

    pub async fn remove_model(&mut self, model_id: &str) -> Result<()> {
        if !self.downloaded.remove(model_id) {
            return Err(ResumeAtsError::ModelError(format!(
                "Embedding model {} is not downloaded",
                model_id
            )));
        }

        fs::remove_dir_all(self.models_dir.join(model_id)).await?;
        info!("Removed embedding model {}", model_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_manager_creation() {
        let temp_dir = TempDir::new().unwrap();
        let manager = EmbeddingModelManager::new(temp_dir.path().join("models")).await.unwrap();

        assert_eq!(manager.list_available_models().len(), 3);
        assert!(manager.list_downloaded_models().is_empty());
        assert!(manager.models_dir().exists());
    }

    #[tokio::test]
    async fn test_scan_finds_complete_models_only() {
        let temp_dir = TempDir::new().unwrap();
        let complete = temp_dir.path().join("potion-base-8M");
        std::fs::create_dir_all(&complete).unwrap();
        std::fs::write(complete.join("model.safetensors"), b"").unwrap();
        std::fs::write(complete.join("tokenizer.json"), b"{}").unwrap();

        let partial = temp_dir.path().join("m2v-base");
        std::fs::create_dir_all(&partial).unwrap();
        std::fs::write(partial.join("tokenizer.json"), b"{}").unwrap();

        let mut manager = EmbeddingModelManager::new(temp_dir.path().to_path_buf()).await.unwrap();
        assert_eq!(manager.list_downloaded_models(), vec!["potion-base-8M".to_string()]);
        assert_eq!(manager.get_model_path("potion-base-8M"), Some(complete.clone()));
        assert_eq!(manager.get_model_path("m2v-base"), None);

        manager.remove_model("potion-base-8M").await.unwrap();
        assert!(!complete.exists());
        assert!(manager.remove_model("potion-base-8M").await.is_err());
    }

    #[tokio::test]
    async fn test_resolve_model_id() {
        let temp_dir = TempDir::new().unwrap();
        let manager = EmbeddingModelManager::new(temp_dir.path().to_path_buf()).await.unwrap();

        assert_eq!(manager.resolve_model_id("potion-base-8M"), Some("potion-base-8M"));
        assert_eq!(manager.resolve_model_id("minishlab/M2V_large_output"), Some("m2v-large"));
        assert_eq!(manager.resolve_model_id("model2vec base"), Some("m2v-base"));
        assert_eq!(manager.resolve_model_id("gpt-5"), None);
    }
}
