use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};

use crate::error::RetrievalError;

/// Text-to-vector capability consumed by the retrieval engine.
///
/// Documents and queries must be encoded by the same implementation: distance
/// comparisons are only meaningful inside one embedding space, so a store
/// never mixes providers.
pub trait TextEmbedder: Send + Sync {
    fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, RetrievalError>;

    fn embed_one(&self, text: &str) -> Result<Vec<f32>, RetrievalError> {
        let mut vectors = self.embed(vec![text.to_string()])?;
        vectors.pop().ok_or_else(|| {
            RetrievalError::ModelUnavailable("model returned no embedding".to_string())
        })
    }

    /// Output dimension, fixed for the lifetime of a loaded model.
    fn dimension(&self) -> usize;
}

/// Production embedder over a fastembed ONNX sentence-embedding model,
/// selected by name from configuration.
pub struct FastEmbedder {
    model: TextEmbedding,
    dimension: usize,
}

impl FastEmbedder {
    pub fn new(model_name: &str) -> Result<Self, RetrievalError> {
        let (model_id, dimension) = lookup_model(model_name)?;
        tracing::info!("Loading embedding model {model_name} ({dimension} dimensions)");

        let model = TextEmbedding::try_new(InitOptions {
            model_name: model_id,
            show_download_progress: false,
            ..Default::default()
        })
        .map_err(|e| RetrievalError::ModelUnavailable(e.to_string()))?;

        tracing::info!("Embedding model ready");
        Ok(Self { model, dimension })
    }
}

impl TextEmbedder for FastEmbedder {
    fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, RetrievalError> {
        self.model
            .embed(texts, None)
            .map_err(|e| RetrievalError::ModelUnavailable(e.to_string()))
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

fn lookup_model(name: &str) -> Result<(EmbeddingModel, usize), RetrievalError> {
    match name.trim().to_lowercase().as_str() {
        "all-minilm-l6-v2" => Ok((EmbeddingModel::AllMiniLML6V2, 384)),
        "bge-small-en-v1.5" => Ok((EmbeddingModel::BGESmallENV15, 384)),
        "bge-base-en-v1.5" => Ok((EmbeddingModel::BGEBaseENV15, 768)),
        "bge-large-en-v1.5" => Ok((EmbeddingModel::BGELargeENV15, 1024)),
        other => Err(RetrievalError::ModelUnavailable(format!(
            "unknown embedding model: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_model_names_resolve() {
        let (_, dim) = lookup_model("all-minilm-l6-v2").unwrap();
        assert_eq!(dim, 384);
        let (_, dim) = lookup_model(" BGE-Large-EN-v1.5 ").unwrap();
        assert_eq!(dim, 1024);
    }

    #[test]
    fn unknown_model_name_is_model_unavailable() {
        assert!(matches!(
            lookup_model("word2vec"),
            Err(RetrievalError::ModelUnavailable(_))
        ));
    }
}
