use once_cell::sync::Lazy;
use regex::Regex;

static URL_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+").unwrap());

/// LINE caps text message payloads; longer replies are clipped rather than
/// rejected wholesale.
pub const MAX_MESSAGE_CHARS: usize = 2000;

/// Reply tokens are fixed-length opaque strings.
pub const REPLY_TOKEN_LEN: usize = 32;

const EMPTY_MESSAGE_FALLBACK: &str = "Sorry, no message content was found.";
const LINK_POINTER: &str = "See the link for more details 👉";

/// Clamps outbound text to the message limit and substitutes a fallback for
/// blank content.
pub fn sanitize_outbound(message: &str) -> String {
    let trimmed = message.trim();
    if trimmed.is_empty() {
        return EMPTY_MESSAGE_FALLBACK.to_string();
    }
    if trimmed.chars().count() <= MAX_MESSAGE_CHARS {
        return trimmed.to_string();
    }
    trimmed.chars().take(MAX_MESSAGE_CHARS).collect()
}

pub fn contains_link(text: &str) -> bool {
    URL_PATTERN.is_match(text)
}

/// Carousel bubbles show a short pointer instead of raw link-bearing manual
/// text, which tends to render badly in a bubble.
pub fn carousel_text(document: &str) -> String {
    if contains_link(document) {
        LINK_POINTER.to_string()
    } else {
        sanitize_outbound(document)
    }
}

pub fn valid_reply_token(token: &str) -> bool {
    token.len() == REPLY_TOKEN_LEN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_messages_get_a_fallback() {
        assert_eq!(sanitize_outbound(""), EMPTY_MESSAGE_FALLBACK);
        assert_eq!(sanitize_outbound("   \n "), EMPTY_MESSAGE_FALLBACK);
    }

    #[test]
    fn overlong_messages_are_clamped_on_char_boundaries() {
        let long = "ช้าง🐘".repeat(1500);
        let clamped = sanitize_outbound(&long);
        assert_eq!(clamped.chars().count(), MAX_MESSAGE_CHARS);
    }

    #[test]
    fn short_messages_pass_through_trimmed() {
        assert_eq!(sanitize_outbound("  stay calm  "), "stay calm");
    }

    #[test]
    fn link_detection() {
        assert!(contains_link("see https://wildsafe.example.com/elephant-check now"));
        assert!(contains_link("http://example.com"));
        assert!(!contains_link("call 1669 for help"));
    }

    #[test]
    fn carousel_substitutes_pointer_for_link_documents() {
        assert_eq!(
            carousel_text("check here https://wildsafe.example.com"),
            LINK_POINTER
        );
        assert_eq!(carousel_text("call 1669"), "call 1669");
    }

    #[test]
    fn reply_token_length_is_enforced() {
        assert!(valid_reply_token(&"a".repeat(32)));
        assert!(!valid_reply_token(""));
        assert!(!valid_reply_token(&"a".repeat(31)));
        assert!(!valid_reply_token(&"a".repeat(33)));
    }
}
