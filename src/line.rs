use anyhow::Result;
use reqwest::Client;
use serde_json::{json, Value};

use crate::filters::message_filter;

const REPLY_ENDPOINT: &str = "/v2/bot/message/reply";

/// Thin client for the LINE Messaging API reply endpoint.
pub struct LineClient {
    client: Client,
    base_url: String,
    channel_access_token: String,
}

impl LineClient {
    pub fn new(base_url: String, channel_access_token: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            channel_access_token,
        }
    }

    fn bubble(text: &str) -> Value {
        json!({
            "type": "bubble",
            "body": {
                "type": "box",
                "layout": "vertical",
                "contents": [
                    { "type": "text", "text": text, "wrap": true, "size": "md" }
                ]
            }
        })
    }

    /// Single-bubble flex message.
    pub fn flex_message(text: &str) -> Value {
        json!({
            "type": "flex",
            "altText": "WildSafe Message",
            "contents": Self::bubble(&message_filter::sanitize_outbound(text))
        })
    }

    /// One bubble per retrieved document; link-bearing documents are replaced
    /// by a short pointer line.
    pub fn carousel_message(documents: &[String]) -> Value {
        let bubbles: Vec<Value> = documents
            .iter()
            .map(|text| Self::bubble(&message_filter::carousel_text(text)))
            .collect();
        json!({
            "type": "flex",
            "altText": "WildSafe Carousel",
            "contents": { "type": "carousel", "contents": bubbles }
        })
    }

    fn text_message(text: &str) -> Value {
        json!({ "type": "text", "text": message_filter::sanitize_outbound(text) })
    }

    async fn reply(&self, reply_token: &str, messages: Vec<Value>) -> Result<()> {
        let url = format!("{}{}", self.base_url, REPLY_ENDPOINT);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.channel_access_token)
            .json(&json!({ "replyToken": reply_token, "messages": messages }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            anyhow::bail!("LINE reply failed: {} - {}", status, error_text);
        }
        Ok(())
    }

    /// Replies with the given message, downgrading to a plain-text apology
    /// when the flex reply is refused. Returns false when even that fails.
    pub async fn safe_reply(&self, reply_token: &str, message: Value) -> bool {
        if !message_filter::valid_reply_token(reply_token) {
            tracing::warn!("Dropping reply with malformed token");
            return false;
        }

        if let Err(e) = self.reply(reply_token, vec![message]).await {
            tracing::warn!("Flex reply failed, sending text fallback: {e}");
            let fallback = Self::text_message(
                "Sorry, something went wrong sending the reply. Please try again.",
            );
            if let Err(e) = self.reply(reply_token, vec![fallback]).await {
                tracing::error!("Fallback reply failed: {e}");
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flex_message_wraps_text_in_one_bubble() {
        let message = LineClient::flex_message("stay calm");
        assert_eq!(message["type"], "flex");
        assert_eq!(message["contents"]["type"], "bubble");
        assert_eq!(
            message["contents"]["body"]["contents"][0]["text"],
            "stay calm"
        );
    }

    #[test]
    fn carousel_has_one_bubble_per_document() {
        let documents = vec![
            "first manual".to_string(),
            "second manual".to_string(),
            "third manual".to_string(),
        ];
        let message = LineClient::carousel_message(&documents);
        assert_eq!(message["contents"]["type"], "carousel");
        assert_eq!(
            message["contents"]["contents"].as_array().unwrap().len(),
            3
        );
    }

    #[test]
    fn carousel_replaces_link_documents_with_a_pointer() {
        let documents = vec!["details at https://wildsafe.example.com".to_string()];
        let message = LineClient::carousel_message(&documents);
        let text = message["contents"]["contents"][0]["body"]["contents"][0]["text"]
            .as_str()
            .unwrap();
        assert!(!text.contains("https://"));
    }
}
