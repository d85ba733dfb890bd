use thiserror::Error;

/// Failure taxonomy of the retrieval core.
///
/// Callers on the message path never see these: `RagEngine::retrieve_documents`
/// degrades to an empty result and logs. The typed variants exist so that
/// operators and tests can distinguish "nothing relevant" from "embedding
/// subsystem down".
#[derive(Error, Debug)]
pub enum RetrievalError {
    #[error("embedding model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("failed to build vector index: {0}")]
    IndexBuild(String),

    #[error("position {position} out of range for store of {len} documents")]
    OutOfRange { position: usize, len: usize },

    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}
