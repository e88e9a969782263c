//! REST client for the generative-language advisory endpoint.
//!
//! Uses reqwest with rustls and a bounded per-request timeout. The API key
//! travels in the `x-goog-api-key` header and must never appear in a log
//! line. The endpoint is stateless from our side: every call carries the
//! full transcript.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::prompts;
use super::AdvisorConfig;
use crate::error::AdvisorError;
use crate::types::{ChatMessage, ChatRole};

const GENERATE_URL_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Seam between the chat session and the advisory endpoint, so session
/// logic can be exercised against a scripted stand-in.
#[async_trait]
pub trait AdvisorProvider: Send + Sync {
    /// Send the full transcript and return the assistant's reply text.
    /// An empty string means the endpoint answered without usable text.
    async fn generate(&self, transcript: &[ChatMessage]) -> Result<String, AdvisorError>;
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    system_instruction: Content<'a>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<ReplyContent>,
}

#[derive(Debug, Default, Deserialize)]
struct ReplyContent {
    #[serde(default)]
    parts: Vec<ReplyPart>,
}

#[derive(Debug, Default, Deserialize)]
struct ReplyPart {
    #[serde(default)]
    text: String,
}

/// The endpoint's wire format names the assistant side "model".
fn wire_role(role: ChatRole) -> &'static str {
    match role {
        ChatRole::User => "user",
        ChatRole::Assistant => "model",
    }
}

fn build_request(transcript: &[ChatMessage]) -> GenerateRequest<'_> {
    GenerateRequest {
        contents: transcript
            .iter()
            .map(|m| Content {
                role: Some(wire_role(m.role)),
                parts: vec![Part { text: &m.content }],
            })
            .collect(),
        system_instruction: Content {
            role: None,
            parts: vec![Part {
                text: prompts::SYSTEM_INSTRUCTION,
            }],
        },
        generation_config: GenerationConfig {
            temperature: prompts::TEMPERATURE,
        },
    }
}

fn extract_text(body: &GenerateResponse) -> String {
    body.candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .map(|content| {
            content
                .parts
                .iter()
                .map(|p| p.text.as_str())
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    timeout_secs: u64,
}

impl GeminiClient {
    pub fn new(api_key: &str, model: &str, timeout_secs: u64) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            timeout_secs,
        }
    }

    pub fn from_config(config: &AdvisorConfig) -> Result<Self, AdvisorError> {
        let api_key = config.resolved_api_key().ok_or(AdvisorError::MissingApiKey)?;
        Ok(Self::new(&api_key, &config.model, config.request_timeout_secs))
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", GENERATE_URL_BASE, self.model)
    }
}

fn classify_transport_error(err: reqwest::Error, timeout_secs: u64) -> AdvisorError {
    if err.is_timeout() {
        AdvisorError::Timeout(timeout_secs)
    } else {
        AdvisorError::Network(err.to_string())
    }
}

#[async_trait]
impl AdvisorProvider for GeminiClient {
    async fn generate(&self, transcript: &[ChatMessage]) -> Result<String, AdvisorError> {
        let request = build_request(transcript);

        log::debug!(
            "Advisory call: {} turns to {}",
            transcript.len(),
            self.endpoint()
        );

        let resp = self
            .client
            .post(self.endpoint())
            .timeout(Duration::from_secs(self.timeout_secs))
            .header("x-goog-api-key", self.api_key.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| classify_transport_error(e, self.timeout_secs))?;

        let status = resp.status();
        if status.as_u16() == 429 {
            return Err(AdvisorError::RateLimit);
        }
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(AdvisorError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateResponse = resp
            .json()
            .await
            .map_err(|e| AdvisorError::Parse(e.to_string()))?;

        Ok(extract_text(&body))
    }
}

/// Stand-in used when no API key is configured. Every call resolves through
/// the failure path, so the session stays usable and the user sees the
/// in-character fallback rather than a crash.
pub struct UnconfiguredProvider;

#[async_trait]
impl AdvisorProvider for UnconfiguredProvider {
    async fn generate(&self, _transcript: &[ChatMessage]) -> Result<String, AdvisorError> {
        Err(AdvisorError::MissingApiKey)
    }
}
