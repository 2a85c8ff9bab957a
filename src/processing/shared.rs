//! Process-wide, load-once resources shared by analyses

use crate::processing::catalog::{SkillCatalog, SkillsRepository};
use crate::processing::embeddings::TextEmbedder;
use std::future::Future;
use std::path::Path;
use std::sync::{Arc, OnceLock};
use tokio::sync::OnceCell;

/// The skill catalog and the embedding model are expensive to load and
/// never change during a run. Each is initialized at most once, even when
/// several callers race for first access.
#[derive(Default)]
pub struct SharedResources {
    catalog: OnceLock<Arc<SkillCatalog>>,
    embedder: OnceCell<Option<Arc<dyn TextEmbedder>>>,
}

static GLOBAL: OnceLock<SharedResources> = OnceLock::new();

impl SharedResources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn global() -> &'static SharedResources {
        GLOBAL.get_or_init(SharedResources::new)
    }

    /// Catalog from the first call's repository and source; later calls
    /// return the same instance.
    pub fn catalog(&self, repository: &dyn SkillsRepository, source: Option<&Path>) -> Arc<SkillCatalog> {
        self.catalog
            .get_or_init(|| Arc::new(repository.load(source)))
            .clone()
    }

    /// Embedder produced by the first caller's `init`. A failed load is
    /// remembered as `None` and not retried.
    pub async fn embedder<F, Fut>(&self, init: F) -> Option<Arc<dyn TextEmbedder>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Option<Arc<dyn TextEmbedder>>>,
    {
        self.embedder.get_or_init(init).await.clone()
    }
}
