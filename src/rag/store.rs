use serde_json::Value;

use crate::error::RetrievalError;

/// One stored manual text with its embedding and opaque metadata.
/// Never mutated after insertion; removed only by a full store clear.
#[derive(Debug, Clone)]
pub struct Document {
    pub text: String,
    pub embedding: Vec<f32>,
    pub metadata: Value,
}

/// Insertion-ordered document collection. The order is load-bearing: the
/// index returns positions that are resolved against this same order.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: Vec<Document>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a document. Duplicate texts are accepted; the caller is
    /// responsible for rebuilding the index afterwards.
    pub fn add(&mut self, text: String, embedding: Vec<f32>, metadata: Value) {
        self.documents.push(Document {
            text,
            embedding,
            metadata,
        });
    }

    /// Empties the store. Idempotent.
    pub fn clear(&mut self) {
        self.documents.clear();
    }

    /// Looks up a document by its insertion-order position.
    pub fn resolve(&self, position: usize) -> Result<&Document, RetrievalError> {
        self.documents
            .get(position)
            .ok_or(RetrievalError::OutOfRange {
                position,
                len: self.documents.len(),
            })
    }

    pub fn embeddings(&self) -> impl Iterator<Item = &[f32]> {
        self.documents.iter().map(|d| d.embedding.as_slice())
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resolve_follows_insertion_order() {
        let mut store = DocumentStore::new();
        for i in 0..5 {
            store.add(format!("manual {i}"), vec![i as f32], json!({ "n": i }));
        }
        for i in 0..5 {
            assert_eq!(store.resolve(i).unwrap().text, format!("manual {i}"));
        }
    }

    #[test]
    fn resolve_out_of_range_fails() {
        let mut store = DocumentStore::new();
        store.add("only".to_string(), vec![1.0], json!({}));
        let err = store.resolve(1).unwrap_err();
        match err {
            RetrievalError::OutOfRange { position, len } => {
                assert_eq!(position, 1);
                assert_eq!(len, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn duplicate_texts_are_accepted() {
        let mut store = DocumentStore::new();
        store.add("same".to_string(), vec![1.0], json!({}));
        store.add("same".to_string(), vec![1.0], json!({}));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn clear_is_idempotent() {
        let mut store = DocumentStore::new();
        store.add("doc".to_string(), vec![1.0], json!({}));
        store.clear();
        assert!(store.is_empty());
        store.clear();
        assert!(store.is_empty());
    }
}
