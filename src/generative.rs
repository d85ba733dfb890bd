use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

/// Client for the Gemini generateContent endpoint; the assistant's fallback
/// answer path when neither the catalog nor retrieval produced anything.
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

impl GeminiClient {
    pub fn new(base_url: String, api_key: String, model: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            api_key,
            model,
        }
    }

    /// Returns the first candidate's text.
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );
        let body = json!({ "contents": [ { "parts": [ { "text": prompt } ] } ] });

        let response = self.client.post(&url).json(&body).send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            anyhow::bail!("Gemini request failed: {} - {}", status, error_text);
        }

        let payload: GenerateContentResponse = response.json().await?;
        let text = payload
            .candidates
            .into_iter()
            .next()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            anyhow::bail!("Gemini returned no text candidates");
        }
        Ok(text)
    }
}

/// Keeps only the first `max_lines` non-empty lines of a model answer.
pub fn summarize_lines(text: &str, max_lines: usize) -> String {
    text.trim()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(max_lines)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summarize_keeps_first_nonempty_lines() {
        let text = "first line\n\n  second line  \nthird line\nfourth line";
        assert_eq!(
            summarize_lines(text, 3),
            "first line\nsecond line\nthird line"
        );
    }

    #[test]
    fn summarize_of_short_text_is_unchanged() {
        assert_eq!(summarize_lines("only line", 3), "only line");
        assert_eq!(summarize_lines("", 3), "");
    }

    #[test]
    fn response_payload_deserializes() {
        let raw = r#"{
            "candidates": [
                { "content": { "parts": [ { "text": "stay " }, { "text": "calm" } ] } }
            ]
        }"#;
        let payload: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        let joined: String = payload.candidates[0]
            .content
            .parts
            .iter()
            .map(|p| p.text.as_str())
            .collect();
        assert_eq!(joined, "stay calm");
    }
}
