//! The fixed seed corpus: safety manuals loaded into the retrieval engine at
//! startup and cleared on shutdown.

pub mod chunker;
pub mod walker;

use serde_json::json;

use crate::rag::RagEngine;

pub const EMERGENCY_GUIDE: &str = "\
WildSafe \"Emergency\" feature guide 🆘
Main functions:
Emergency advice: press the \"Emergency\" button to get step-by-step guidance for urgent situations.
Ask the bot: type a question about an emergency, for example \"an elephant stepped on my car, what should I do\", to get an immediate answer.
";

pub const ELEPHANT_ENCOUNTER: &str = "\
When an elephant approaches in an emergency, follow these steps:
1. Stay calm: keep your composure and do not show panic or fear.
2. Avoid eye contact: do not stare directly at the elephant; look down or away.
3. Back away slowly: retreat step by step without any sudden movements.
4. Find cover: put an obstacle between you and the elephant, such as a large tree or a wall.
5. Alert the rangers: call the visitor service center at 086-092-6529 for immediate help.
";

pub const ELEPHANT_CHECK: &str = "\
🐘 Check for elephants before you travel! See today's elephant sightings along the park roads here 👉 https://wildsafe.example.com/elephant-check
";

pub const RANGER_CONTACTS: &str = "\
📞 Contact the officers
Any emergency: call 1669 (24-hour service)
Visitor service center: call 086-092-6529
Khao Yai National Park headquarters: call 086-092-6527
";

/// Seed manuals in load order, paired with the title recorded in metadata.
pub fn seed_manuals() -> [(&'static str, &'static str); 4] {
    [
        ("Emergency feature guide", EMERGENCY_GUIDE),
        ("Elephant encounter procedure", ELEPHANT_ENCOUNTER),
        ("Pre-travel elephant check", ELEPHANT_CHECK),
        ("Ranger contacts", RANGER_CONTACTS),
    ]
}

/// Loads the fixed manual set into the engine. A manual that fails to embed
/// is skipped with a warning; the rest still load. Returns the loaded count.
pub async fn seed(engine: &RagEngine) -> usize {
    let mut loaded = 0usize;
    for (title, text) in seed_manuals() {
        let metadata = json!({ "title": title, "category": "safety-manual" });
        match engine.add_document(text, metadata).await {
            Ok(()) => loaded += 1,
            Err(e) => tracing::warn!("Skipping seed manual '{title}': {e}"),
        }
    }
    loaded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_set_is_four_distinct_manuals() {
        let manuals = seed_manuals();
        assert_eq!(manuals.len(), 4);
        for (title, text) in &manuals {
            assert!(!title.is_empty());
            assert!(!text.trim().is_empty());
        }
        for i in 0..manuals.len() {
            for j in (i + 1)..manuals.len() {
                assert_ne!(manuals[i].1, manuals[j].1);
            }
        }
    }

    #[test]
    fn elephant_check_carries_a_link() {
        // The carousel rendering substitutes a pointer line for link-bearing
        // manuals; this one must keep tripping that path.
        assert!(ELEPHANT_CHECK.contains("https://"));
    }
}
