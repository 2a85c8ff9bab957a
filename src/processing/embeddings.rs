//! Embeddings generation using Model2Vec

use crate::config::ModelConfig;
use crate::error::{Result, ResumeAtsError};
use log::{info, warn};
use model2vec_rs::model::StaticModel;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Dense text embedding capability
pub trait TextEmbedder: Send + Sync {
    fn embed(&self, text: &str) -> Result<Vec<f32>>;

    fn name(&self) -> &str;
}

pub struct Model2VecEmbedder {
    model: StaticModel,
    model_name: String,
}

impl Model2VecEmbedder {
    pub fn load(model_path: &Path, model_name: &str) -> Result<Self> {
        if !model_path.exists() {
            return Err(ResumeAtsError::ModelError(format!(
                "Embedding model {} not found at {} (run `resume-ats models download {}`)",
                model_name,
                model_path.display(),
                model_name
            )));
        }

        let start_time = Instant::now();
        let model = StaticModel::from_pretrained(model_path, None, None, None)?;
        info!("Loaded embedding model {} in {:.2?}", model_name, start_time.elapsed());

        Ok(Self {
            model,
            model_name: model_name.to_string(),
        })
    }
}

impl TextEmbedder for Model2VecEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let embedding = self.model.encode_single(text);
        if embedding.is_empty() {
            return Err(ResumeAtsError::Embedding("model returned an empty embedding".to_string()));
        }
        Ok(embedding)
    }

    fn name(&self) -> &str {
        &self.model_name
    }
}

/// Load the configured embedder off the async runtime. Failures are logged
/// and yield `None`; the semantic metric is then omitted.
pub async fn load_embedder(config: &ModelConfig) -> Option<Arc<dyn TextEmbedder>> {
    let model_path = config.models_dir.join(&config.embedding_model);
    let model_name = config.embedding_model.clone();

    let loaded = tokio::task::spawn_blocking(move || Model2VecEmbedder::load(&model_path, &model_name)).await;

    match loaded {
        Ok(Ok(embedder)) => Some(Arc::new(embedder)),
        Ok(Err(e)) => {
            warn!("Semantic similarity unavailable: {}", e);
            None
        }
        Err(e) => {
            warn!("Embedding model loader panicked: {}", e);
            None
        }
    }
}

/// Cosine similarity between two embeddings
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(ResumeAtsError::Embedding(format!(
            "Embedding dimensions don't match: {} vs {}",
            a.len(),
            b.len()
        )));
    }

    if a.is_empty() {
        return Ok(0.0);
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    Ok(dot_product / (norm_a * norm_b))
}

/// Embedding similarity of two texts as a percentage in [0, 100].
///
/// Runs on the blocking pool under `timeout`; any failure is logged and
/// reported as `None`.
pub async fn semantic_similarity_pct(
    embedder: Arc<dyn TextEmbedder>,
    resume: Arc<str>,
    job: Arc<str>,
    timeout: Duration,
) -> Option<f64> {
    let task = tokio::task::spawn_blocking(move || -> Result<f32> {
        let resume_embedding = embedder.embed(&resume)?;
        let job_embedding = embedder.embed(&job)?;
        cosine_similarity(&resume_embedding, &job_embedding)
    });

    match tokio::time::timeout(timeout, task).await {
        Ok(Ok(Ok(similarity))) if similarity.is_finite() => {
            Some((f64::from(similarity) * 100.0).clamp(0.0, 100.0))
        }
        Ok(Ok(Ok(similarity))) => {
            warn!("Discarding non-finite semantic similarity {}", similarity);
            None
        }
        Ok(Ok(Err(e))) => {
            warn!("Semantic similarity failed: {}", e);
            None
        }
        Ok(Err(e)) => {
            warn!("Semantic similarity task panicked: {}", e);
            None
        }
        Err(_) => {
            warn!("Semantic similarity timed out after {:?}", timeout);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Bag-of-letters embedder for exercising the similarity path without a model
    struct LetterEmbedder;

    impl TextEmbedder for LetterEmbedder {
        fn embed(&self, text: &str) -> Result<Vec<f32>> {
            let mut counts = vec![0.0; 26];
            for c in text.chars().filter(char::is_ascii_lowercase) {
                counts[(c as u8 - b'a') as usize] += 1.0;
            }
            Ok(counts)
        }

        fn name(&self) -> &str {
            "letters"
        }
    }

    struct SlowEmbedder;

    impl TextEmbedder for SlowEmbedder {
        fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            std::thread::sleep(Duration::from_millis(300));
            Ok(vec![1.0])
        }

        fn name(&self) -> &str {
            "slow"
        }
    }

    #[test]
    fn test_cosine_similarity() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]).unwrap() - 1.0).abs() < 1e-6);
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).unwrap(), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]).unwrap(), 0.0);
        assert!(cosine_similarity(&[1.0], &[1.0, 2.0]).is_err());
    }

    #[tokio::test]
    async fn test_semantic_similarity_pct() {
        let embedder: Arc<dyn TextEmbedder> = Arc::new(LetterEmbedder);
        let pct = semantic_similarity_pct(embedder, Arc::from("abc"), Arc::from("abc"), Duration::from_secs(5))
            .await
            .unwrap();
        assert!((pct - 100.0).abs() < 1e-3);
    }

    #[tokio::test]
    async fn test_semantic_similarity_times_out() {
        let embedder: Arc<dyn TextEmbedder> = Arc::new(SlowEmbedder);
        let pct = semantic_similarity_pct(embedder, Arc::from("a"), Arc::from("b"), Duration::from_millis(10)).await;
        assert_eq!(pct, None);
    }

    #[tokio::test]
    async fn test_missing_model_is_none() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = ModelConfig {
            models_dir: dir.path().to_path_buf(),
            embedding_model: "potion-base-8M".to_string(),
            semantic_similarity: true,
            embedding_timeout_ms: 1000,
        };
        assert!(load_embedder(&config).await.is_none());
    }
}
