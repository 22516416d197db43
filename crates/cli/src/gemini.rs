//! Gemini `generateContent` client used as the schema source.

use std::time::Duration;

use sectiongen_core::{SchemaSource, SourceError};
use serde::{Deserialize, Serialize};

use crate::config::ServiceConfig;

// ── Request / Response types ─────────────────────────────────────────────────

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

// ── Clients ──────────────────────────────────────────────────────────────────

/// Blocking client with a bounded request timeout.
pub struct GeminiClient {
    agent: ureq::Agent,
    url: String,
    api_key_env: String,
    api_key: Option<String>,
}

impl GeminiClient {
    /// Build a client. The key is read from the configured environment
    /// variable now; its absence only surfaces when a schema is requested.
    pub fn from_config(config: &ServiceConfig) -> Self {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty());
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .build()
            .into();
        GeminiClient {
            agent,
            url: generate_url(&config.endpoint, &config.model),
            api_key_env: config.api_key_env.clone(),
            api_key,
        }
    }
}

impl SchemaSource for GeminiClient {
    fn fetch(&self, prompt: &str) -> Result<String, SourceError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| SourceError::MissingCredentials(self.api_key_env.clone()))?;

        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        log::debug!("POST {}", self.url);
        let response = self
            .agent
            .post(&self.url)
            .header("x-goog-api-key", api_key)
            .header("content-type", "application/json")
            .send_json(&body)
            .map_err(|e| match e {
                ureq::Error::StatusCode(code) => SourceError::Status(code),
                other => SourceError::Transport(other.to_string()),
            })?;

        let envelope: GenerateResponse = response
            .into_body()
            .read_json()
            .map_err(|e| SourceError::Envelope(e.to_string()))?;
        first_text(envelope)
    }
}

/// Stands in for the service under `--offline`; every request falls back.
pub struct OfflineSource;

impl SchemaSource for OfflineSource {
    fn fetch(&self, _prompt: &str) -> Result<String, SourceError> {
        Err(SourceError::Disabled)
    }
}

// ── Internal ─────────────────────────────────────────────────────────────────

fn generate_url(endpoint: &str, model: &str) -> String {
    format!(
        "{}/models/{}:generateContent",
        endpoint.trim_end_matches('/'),
        model
    )
}

/// `candidates[0].content.parts[0].text`
fn first_text(envelope: GenerateResponse) -> Result<String, SourceError> {
    envelope
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| SourceError::Envelope("response contained no text".to_string()))
}
