//! Forwards user feedback to Ramp's public feedback endpoint.

use std::time::Duration;

use crate::error::FeedbackError;
use crate::knowledge::ToolReply;

pub const DEFAULT_FEEDBACK_BASE_URL: &str = "https://api.ramp.com";
pub const FEEDBACK_PATH: &str = "/v1/public/api-feedback/llm";
/// The endpoint only accepts `RAMP_MCP` or `API_DOCS`.
pub const FEEDBACK_SOURCE: &str = "RAMP_MCP";
pub const FEEDBACK_TIMEOUT: Duration = Duration::from_secs(30);

pub const MIN_FEEDBACK_CHARS: usize = 10;
pub const MAX_FEEDBACK_CHARS: usize = 1000;

#[derive(Debug, Clone)]
pub struct FeedbackClient {
    http: reqwest::Client,
    base_url: String,
}

impl FeedbackClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, FeedbackError> {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        let http = reqwest::Client::builder()
            .timeout(FEEDBACK_TIMEOUT)
            .build()
            .map_err(|e| FeedbackError::ClientInit(e.to_string()))?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Trimmed feedback if its length is within bounds.
    pub fn validate(feedback: &str) -> Result<&str, FeedbackError> {
        let feedback = feedback.trim();
        let len = feedback.chars().count();
        if !(MIN_FEEDBACK_CHARS..=MAX_FEEDBACK_CHARS).contains(&len) {
            return Err(FeedbackError::InvalidLength {
                min: MIN_FEEDBACK_CHARS,
                max: MAX_FEEDBACK_CHARS,
            });
        }
        Ok(feedback)
    }

    /// Send already-validated feedback. Any non-2xx status is an error.
    pub async fn send(&self, feedback: &str) -> Result<(), FeedbackError> {
        let url = format!("{}{FEEDBACK_PATH}", self.base_url);
        self.http
            .get(&url)
            .query(&[("feedback", feedback), ("source", FEEDBACK_SOURCE)])
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Validate, send, and describe the outcome. `tool_name` only changes the success text.
    pub async fn submit(&self, feedback: &str, tool_name: Option<&str>) -> ToolReply {
        let feedback = match Self::validate(feedback) {
            Ok(feedback) => feedback,
            Err(error) => return ToolReply::InvalidInput(describe(&error)),
        };

        match self.send(feedback).await {
            Ok(()) => {
                tracing::info!(chars = feedback.chars().count(), "feedback submitted");
                let regarding = tool_name
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(|t| format!(" (regarding {t} tool)"))
                    .unwrap_or_default();
                ToolReply::Answer(format!("Feedback submitted successfully{regarding}!"))
            }
            Err(error) => {
                tracing::warn!(%error, "feedback submission failed");
                ToolReply::Failed(describe(&error))
            }
        }
    }
}

/// User-facing text for a feedback failure.
pub fn describe(error: &FeedbackError) -> String {
    match error {
        FeedbackError::InvalidLength { .. } => format!(
            "Feedback must be at least {MIN_FEEDBACK_CHARS} characters long and less than {MAX_FEEDBACK_CHARS} characters."
        ),
        FeedbackError::Status(400) => {
            "Invalid feedback format. Please check your message and try again.".to_string()
        }
        FeedbackError::Status(status) if *status >= 500 => {
            "Ramp's feedback service is temporarily unavailable. Please try again later."
                .to_string()
        }
        FeedbackError::Status(status) => format!("HTTP error {status}. Please try again later."),
        FeedbackError::Timeout => {
            "Request timed out. Please check your internet connection and try again.".to_string()
        }
        FeedbackError::Transport(_) => {
            "Network error. Please check your internet connection and try again.".to_string()
        }
        FeedbackError::ClientInit(_) => format!("Unexpected error submitting feedback: {error}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_bounds_are_inclusive() {
        assert!(FeedbackClient::validate("too short").is_err());
        assert_eq!(FeedbackClient::validate("  ten chars!  ").unwrap(), "ten chars!");
        assert!(FeedbackClient::validate(&"x".repeat(MAX_FEEDBACK_CHARS)).is_ok());
        assert!(FeedbackClient::validate(&"x".repeat(MAX_FEEDBACK_CHARS + 1)).is_err());
    }

    #[test]
    fn status_messages_are_distinct() {
        assert!(describe(&FeedbackError::Status(400)).starts_with("Invalid feedback format"));
        assert!(describe(&FeedbackError::Status(503)).contains("temporarily unavailable"));
        assert_eq!(
            describe(&FeedbackError::Status(404)),
            "HTTP error 404. Please try again later."
        );
        assert!(describe(&FeedbackError::Timeout).starts_with("Request timed out"));
    }

    #[tokio::test]
    async fn short_feedback_is_rejected_without_a_request() {
        let client = FeedbackClient::new("http://127.0.0.1:1/").unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:1");

        let reply = client.submit("meh", None).await;
        assert_eq!(
            reply,
            ToolReply::InvalidInput(
                "Feedback must be at least 10 characters long and less than 1000 characters."
                    .to_string()
            )
        );
    }
}
