//! Client for the generative-language API that produces translations and
//! free-text analyses.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("request to the generative service failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("generative service returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("generative service response is malformed or has no candidate text")]
    MalformedResponse,
}

/// Anything that turns a prompt into text.
#[async_trait]
pub trait TextService: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        config: GenerationConfig,
    ) -> Result<String, ServiceError>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    generation_config: GenerationConfig,
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// `candidates[0].content.parts[0].text`
    fn into_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
    }
}

fn request_body(prompt: &str, config: GenerationConfig) -> GenerateRequest<'_> {
    GenerateRequest {
        generation_config: config,
        contents: [Content {
            parts: [RequestPart { text: prompt }],
        }],
    }
}

pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            model: model.into(),
            api_key: api_key.into(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl TextService for GeminiClient {
    async fn generate(
        &self,
        prompt: &str,
        config: GenerationConfig,
    ) -> Result<String, ServiceError> {
        let resp = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&request_body(prompt, config))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ServiceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        // Undecodable bodies are malformed replies, not transport failures
        let bytes = resp.bytes().await?;
        let parsed: GenerateResponse =
            serde_json::from_slice(&bytes).map_err(|_| ServiceError::MalformedResponse)?;
        debug!(candidates = parsed.candidates.len(), "Generative service replied");
        parsed.into_text().ok_or(ServiceError::MalformedResponse)
    }
}
