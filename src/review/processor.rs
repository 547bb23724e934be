use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;

use crate::error::Result;
use crate::pipeline::runner::ItemProcessor;
use crate::pipeline::types::{Outcome, WorkItem};
use crate::review::client::{ClaudeClient, ContentBlock, MessagesResponse};
use crate::review::prompt;

/// Reviews one interface file via the Claude API.
///
/// Every failure (read, request, decode) is folded into a failed
/// outcome; nothing escapes `process`.
pub struct ReviewProcessor {
    client: ClaudeClient,
}

impl ReviewProcessor {
    pub fn new(client: ClaudeClient) -> Self {
        Self { client }
    }

    async fn review(&self, item: &WorkItem) -> Result<(String, String)> {
        let content = tokio::fs::read_to_string(&item.path).await?;
        let label = extract_label(&content).unwrap_or_else(|| "unknown".to_string());

        let user_prompt = prompt::review_prompt(&item.display, &content);
        let response = self
            .client
            .send_message(prompt::REVIEW_SYSTEM_PROMPT, &user_prompt)
            .await?;

        tracing::debug!(
            path = %item.display,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            stop_reason = ?response.stop_reason,
            "Claude response"
        );

        let review = extract_review_text(&response)?;
        Ok((label, review))
    }
}

#[async_trait]
impl ItemProcessor for ReviewProcessor {
    async fn process(&self, item: WorkItem) -> Outcome {
        tracing::debug!(path = %item.display, "Reviewing");

        match self.review(&item).await {
            Ok((label, review)) => Outcome::success(item, label, review),
            Err(e) => Outcome::failure(item, e.to_string()),
        }
    }
}

/// Best-effort declared package name: first `package "…"` match, or
/// nothing. No uniqueness or well-formedness check.
pub fn extract_label(content: &str) -> Option<String> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern =
        PATTERN.get_or_init(|| Regex::new(r#"package "(.+?)""#).expect("valid package pattern"));
    pattern
        .captures(content)
        .map(|captures| captures[1].to_string())
}

/// The joined text blocks of the response, or a pretty-printed dump of
/// the whole response when no text block is present, so a review report
/// is never empty.
fn extract_review_text(response: &MessagesResponse) -> Result<String> {
    let text: Vec<&str> = response
        .content
        .iter()
        .filter_map(|block| match block {
            ContentBlock::Text { text } => Some(text.as_str()),
            ContentBlock::Other(_) => None,
        })
        .collect();

    if text.is_empty() {
        Ok(serde_json::to_string_pretty(response)?)
    } else {
        Ok(text.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClaudeConfig;
    use crate::review::client::Usage;
    use std::path::{Path, PathBuf};

    fn test_client() -> ClaudeClient {
        ClaudeClient::new(&ClaudeConfig {
            api_key: "test-key".to_string(),
            model: "claude-sonnet-4-20250514".to_string(),
            max_tokens: 1024,
            api_url: None,
        })
    }

    #[test]
    fn test_extract_label_finds_package_name() {
        let content = "package \"moonbitlang/core/bytes\"\n\nfn length() -> Int\n";
        assert_eq!(
            extract_label(content),
            Some("moonbitlang/core/bytes".to_string())
        );
    }

    #[test]
    fn test_extract_label_takes_first_match() {
        let content = "package \"first\"\npackage \"second\"\n";
        assert_eq!(extract_label(content), Some("first".to_string()));
    }

    #[test]
    fn test_extract_label_missing_declaration() {
        assert_eq!(extract_label("fn length() -> Int\n"), None);
    }

    #[test]
    fn test_extract_review_text_joins_text_blocks() {
        let response = MessagesResponse {
            id: "msg".to_string(),
            content: vec![
                ContentBlock::Text {
                    text: "Part one.".to_string(),
                },
                ContentBlock::Text {
                    text: "Part two.".to_string(),
                },
            ],
            stop_reason: Some("end_turn".to_string()),
            usage: Usage {
                input_tokens: 1,
                output_tokens: 1,
            },
        };
        assert_eq!(
            extract_review_text(&response).unwrap(),
            "Part one.\nPart two."
        );
    }

    #[test]
    fn test_extract_review_text_falls_back_to_dump() {
        let response = MessagesResponse {
            id: "msg_fallback".to_string(),
            content: vec![],
            stop_reason: Some("end_turn".to_string()),
            usage: Usage {
                input_tokens: 1,
                output_tokens: 0,
            },
        };
        let dump = extract_review_text(&response).unwrap();
        assert!(dump.contains("msg_fallback"));
        assert!(dump.contains("end_turn"));
    }

    #[tokio::test]
    async fn test_unreadable_item_becomes_failed_outcome() {
        let processor = ReviewProcessor::new(test_client());
        let item = WorkItem::new(
            Path::new("/nonexistent"),
            PathBuf::from("/nonexistent/pkg.generated.mbti"),
        );

        let outcome = processor.process(item).await;
        assert!(!outcome.succeeded());
        assert_eq!(outcome.label, "unknown");
        assert!(outcome.failure_reason().is_some());
    }
}
