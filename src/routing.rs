//! Decides what an inbound message gets: a fixed manual, the retrieval path,
//! or the generative fallback.

use crate::corpus;

/// Route taken for one message; recorded in the conversation log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Manual,
    Retrieval,
    Generative,
}

impl Route {
    pub fn as_str(&self) -> &'static str {
        match self {
            Route::Manual => "manual",
            Route::Retrieval => "retrieval",
            Route::Generative => "generative",
        }
    }
}

fn normalize(message: &str) -> String {
    message.trim().to_lowercase()
}

/// Exact-match lookup from known phrases to a fixed manual text, checked
/// before any retrieval or generation happens.
pub fn manual_response(message: &str) -> Option<&'static str> {
    match normalize(message).as_str() {
        "emergency" | "user guide" => Some(corpus::EMERGENCY_GUIDE),
        "what should i do in an emergency" | "danger nearby" => Some(corpus::ELEPHANT_ENCOUNTER),
        "check elephants before travel" => Some(corpus::ELEPHANT_CHECK),
        "contact officer" | "contact ranger" => Some(corpus::RANGER_CONTACTS),
        _ => None,
    }
}

/// Policy deciding whether a free-text query is eligible for retrieval.
/// Kept separate from the engine so hosts can swap it without touching
/// the retrieval core.
pub trait RetrievalGate: Send + Sync {
    fn should_retrieve(&self, message: &str) -> bool;
}

/// Matches the whole trimmed, lowercased message against a fixed
/// trigger-word set.
pub struct KeywordGate {
    triggers: Vec<String>,
}

impl KeywordGate {
    pub fn new<I, S>(triggers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            triggers: triggers
                .into_iter()
                .map(|t| normalize(t.as_ref()))
                .collect(),
        }
    }
}

impl Default for KeywordGate {
    fn default() -> Self {
        Self::new(["emergency", "elephant", "ranger"])
    }
}

impl RetrievalGate for KeywordGate {
    fn should_retrieve(&self, message: &str) -> bool {
        let normalized = normalize(message);
        self.triggers.iter().any(|t| *t == normalized)
    }
}
