//! Error types for the advisory integration.
//!
//! Errors are classified by recoverability:
//! - Retryable: network issues, timeouts, rate limits
//! - NonRetryable: endpoint rejections, unusable responses
//! - RequiresUserAction: missing API key

use thiserror::Error;

/// Errors from a single advisory endpoint call.
///
/// The chat session treats every variant uniformly (the failure transition
/// appends the fixed apology turn); the classification exists for logging
/// and for the shell's status line.
#[derive(Debug, Error)]
pub enum AdvisorError {
    // Retryable errors
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    #[error("Advisory endpoint rate limit exceeded")]
    RateLimit,

    // Non-retryable errors
    #[error("Advisory endpoint returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse advisory response: {0}")]
    Parse(String),

    // Requires user action
    #[error("No advisory API key configured")]
    MissingApiKey,
}

impl AdvisorError {
    /// Returns true if resubmitting the same turn could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AdvisorError::Network(_) | AdvisorError::Timeout(_) | AdvisorError::RateLimit
        )
    }

    /// Returns true if this error requires user action to resolve.
    pub fn requires_user_action(&self) -> bool {
        matches!(self, AdvisorError::MissingApiKey)
    }

    /// Get a user-friendly recovery suggestion.
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AdvisorError::Network(_) => "Check your internet connection and try again.",
            AdvisorError::Timeout(_) => "The advisor took too long to answer. Try again.",
            AdvisorError::RateLimit => "Wait a few minutes and try again.",
            AdvisorError::Api { .. } => "The advisory service rejected the request. Try again later.",
            AdvisorError::Parse(_) => "The advisory service sent an unexpected reply. Try again.",
            AdvisorError::MissingApiKey => {
                "Set GEMINI_API_KEY or add an apiKey under \"advisor\" in ~/.commonhome/config.json"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_failures_are_retryable() {
        assert!(AdvisorError::Network("connection reset".to_string()).is_retryable());
        assert!(AdvisorError::Timeout(30).is_retryable());
        assert!(AdvisorError::RateLimit.is_retryable());
        assert!(!AdvisorError::Parse("bad json".to_string()).is_retryable());
    }

    #[test]
    fn missing_key_requires_user_action() {
        assert!(AdvisorError::MissingApiKey.requires_user_action());
        assert!(!AdvisorError::RateLimit.requires_user_action());
    }
}
