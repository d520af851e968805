//! Gemini content provider.
//!
//! `GeminiClient` wraps the `generateContent` endpoint with structured JSON
//! output. `GeminiContentProvider` adapts it to `ContentProvider`: parse and
//! assemble on success, log and return nothing on any failure.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use lifeindex_core::clock::Clock;
use lifeindex_core::model::{Encounter, Planet};
use lifeindex_core::provider::ContentProvider;
use lifeindex_core::rng::DeterministicRng;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::assembler::{assemble_encounter, assemble_planet};
use crate::error::GenerationError;
use crate::payload::{parse_encounter, parse_planets};
use crate::prompts::{ENCOUNTER_PROMPT, encounter_schema, planet_prompt, planet_schema};

/// Default API base URL.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default model.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-3-flash-preview";

const REQUEST_TIMEOUT_SECS: u64 = 90;

/// Client for the Gemini `generateContent` API.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Creates a client. A trailing slash on `base_url` is ignored.
    #[must_use]
    pub fn new(base_url: &str, model: &str, api_key: &str) -> Self {
        Self::with_timeout(base_url, model, api_key, REQUEST_TIMEOUT_SECS)
    }

    /// Creates a client with a custom request timeout.
    #[must_use]
    pub fn with_timeout(base_url: &str, model: &str, api_key: &str, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            model: model.to_owned(),
            api_key: api_key.to_owned(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }

    /// Sends `prompt` with a JSON response schema and returns the raw text of
    /// the first candidate.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::Transport` if the request fails,
    /// `GenerationError::Status` for a non-success status,
    /// `GenerationError::Malformed` if the envelope cannot be decoded and
    /// `GenerationError::EmptyResponse` if it carries no text.
    pub async fn generate_json(
        &self,
        prompt: &str,
        schema: Value,
    ) -> Result<String, GenerationError> {
        let request = GenerateContentRequest::json(prompt, schema);

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| GenerationError::Transport(e.to_string()))?;
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Malformed(e.to_string()))?;
        envelope.into_text()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
    generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    fn json(prompt: &str, schema: Value) -> Self {
        Self {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![TextPart {
                    text: prompt.to_owned(),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: schema,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct RequestContent {
    role: &'static str,
    parts: Vec<TextPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TextPart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
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
    parts: Vec<TextPart>,
}

impl GenerateContentResponse {
    fn into_text(self) -> Result<String, GenerationError> {
        let text: String = self
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().map(|p| p.text).collect())
            .unwrap_or_default();
        if text.trim().is_empty() {
            Err(GenerationError::EmptyResponse)
        } else {
            Ok(text)
        }
    }
}

/// `ContentProvider` backed by Gemini.
pub struct GeminiContentProvider {
    client: GeminiClient,
    clock: Arc<dyn Clock>,
    rng: Arc<Mutex<dyn DeterministicRng + Send>>,
}

impl std::fmt::Debug for GeminiContentProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiContentProvider")
            .field("client", &self.client)
            .finish_non_exhaustive()
    }
}

impl GeminiContentProvider {
    /// Creates a provider. `clock` and `rng` feed the entity assembler.
    #[must_use]
    pub fn new(
        client: GeminiClient,
        clock: Arc<dyn Clock>,
        rng: Arc<Mutex<dyn DeterministicRng + Send>>,
    ) -> Self {
        Self { client, clock, rng }
    }

    async fn request_planets(&self, count: usize) -> Result<Vec<Planet>, GenerationError> {
        let text = self.client.generate_json(&planet_prompt(count), planet_schema()).await?;
        let raw = parse_planets(&text)?;
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(raw
            .iter()
            .map(|p| assemble_planet(p, self.clock.as_ref(), &mut *rng))
            .collect())
    }

    async fn request_encounter(&self) -> Result<Encounter, GenerationError> {
        let text = self.client.generate_json(ENCOUNTER_PROMPT, encounter_schema()).await?;
        let raw = parse_encounter(&text)?;
        Ok(assemble_encounter(&raw))
    }
}

#[async_trait]
impl ContentProvider for GeminiContentProvider {
    async fn generate_planets(&self, count: usize) -> Vec<Planet> {
        match self.request_planets(count).await {
            Ok(planets) => {
                debug!(requested = count, generated = planets.len(), "planets generated");
                planets
            }
            Err(e) => {
                warn!(error = %e, requested = count, "planet generation failed");
                Vec::new()
            }
        }
    }

    async fn generate_encounter(&self) -> Option<Encounter> {
        match self.request_encounter().await {
            Ok(encounter) => Some(encounter),
            Err(e) => {
                warn!(error = %e, "encounter generation failed");
                None
            }
        }
    }
}
