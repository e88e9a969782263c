//! Advisory chat integration.
//!
//! A thin request/response wrapper over a generative-language endpoint: the
//! session keeps an append-only transcript, sends the whole thing with a
//! fixed persona on every user turn, and maps any failure into a fixed
//! in-character fallback turn. Follows the same architectural pattern as the
//! other single-endpoint integrations (one client module, one config struct
//! with serde defaults).

pub mod client;
pub mod prompts;
pub mod session;

pub use client::{AdvisorProvider, GeminiClient, UnconfiguredProvider};
pub use session::{AdvisorSession, SessionPhase, SubmitOutcome, SubmitResult};

use serde::{Deserialize, Serialize};

/// Advisory endpoint configuration stored in ~/.commonhome/config.json.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisorConfig {
    /// API key for the advisory endpoint. The GEMINI_API_KEY environment
    /// variable takes precedence when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl AdvisorConfig {
    /// Resolve the API key: environment first, then the config file.
    /// Empty strings count as unset.
    pub fn resolved_api_key(&self) -> Option<String> {
        std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .or_else(|| self.api_key.clone().filter(|k| !k.is_empty()))
    }
}
