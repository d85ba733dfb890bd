pub mod embeddings;
pub mod index;
pub mod store;

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;

use crate::error::RetrievalError;
use self::embeddings::TextEmbedder;
use self::index::FlatIndex;
use self::store::DocumentStore;

/// Retrieval core: embedder + document store + flat L2 index.
///
/// The store/index pair lives behind one RwLock so a rebuild in progress is
/// never observable from a concurrent search. The index is either absent
/// (empty store, or the last rebuild failed) or fully consistent with the
/// store; there is no stale state.
pub struct RagEngine {
    embedder: Arc<dyn TextEmbedder>,
    inner: RwLock<RagState>,
}

#[derive(Default)]
struct RagState {
    store: DocumentStore,
    index: Option<FlatIndex>,
}

impl RagEngine {
    pub fn new(embedder: Arc<dyn TextEmbedder>) -> Self {
        Self {
            embedder,
            inner: RwLock::new(RagState::default()),
        }
    }

    /// Encodes and appends one document, then eagerly rebuilds the index.
    ///
    /// An encoding failure leaves the store untouched, so a missing embedding
    /// can never corrupt it. A rebuild failure keeps the document but drops
    /// the index entirely; retrieval degrades to empty until a rebuild
    /// succeeds.
    pub async fn add_document(&self, text: &str, metadata: Value) -> Result<(), RetrievalError> {
        let embedding = self.embedder.embed_one(text)?;

        let mut inner = self.inner.write().await;
        inner.store.add(text.to_string(), embedding, metadata);
        match FlatIndex::build(inner.store.embeddings()) {
            Ok(index) => {
                inner.index = Some(index);
                Ok(())
            }
            Err(e) => {
                inner.index = None;
                Err(e)
            }
        }
    }

    /// Typed retrieval path: nearest-first document texts with
    /// `len == min(top_k, document_count)`.
    ///
    /// An empty store short-circuits before any embedding call.
    pub async fn try_retrieve(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<String>, RetrievalError> {
        {
            let inner = self.inner.read().await;
            if inner.store.is_empty() {
                return Ok(Vec::new());
            }
        }

        // Encode outside the lock; a concurrent add only makes more documents
        // visible to the search below.
        let query_embedding = self.embedder.embed_one(query)?;

        let inner = self.inner.read().await;
        let Some(index) = inner.index.as_ref() else {
            return Ok(Vec::new());
        };

        let hits = index.search(&query_embedding, top_k)?;
        let mut texts = Vec::with_capacity(hits.len());
        for hit in hits {
            if hit.is_sentinel() {
                continue;
            }
            let document = inner.store.resolve(hit.position as usize)?;
            texts.push(document.text.clone());
        }
        Ok(texts)
    }

    /// Graceful wrapper used by the message path: any failure degrades to an
    /// empty result so the caller falls through to its generative answer.
    pub async fn retrieve_documents(&self, query: &str, top_k: usize) -> Vec<String> {
        match self.try_retrieve(query, top_k).await {
            Ok(texts) => texts,
            Err(e) => {
                tracing::warn!("Retrieval unavailable, returning no documents: {e}");
                Vec::new()
            }
        }
    }

    /// Empties the store and discards the index. Idempotent.
    pub async fn clear_database(&self) {
        let mut inner = self.inner.write().await;
        inner.store.clear();
        inner.index = None;
    }

    pub async fn document_count(&self) -> usize {
        self.inner.read().await.store.len()
    }
}
