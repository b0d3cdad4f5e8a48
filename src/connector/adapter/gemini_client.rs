use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::application::LlmClient;
use crate::domain::DomainError;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const API_VERSION_PATH: &str = "/v1beta/models";

#[derive(Serialize)]
struct ApiRequest<'a> {
    contents: Vec<ApiContent<'a>>,
}

#[derive(Serialize)]
struct ApiContent<'a> {
    role: &'a str,
    parts: Vec<ApiPart<'a>>,
}

#[derive(Serialize)]
struct ApiPart<'a> {
    text: &'a str,
}

/// Minimal subset of the `generateContent` response we care about.
#[derive(Deserialize)]
struct ApiResponse {
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
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// HTTP client for the Gemini `generateContent` endpoint.
///
/// Implements [`LlmClient`]; every failure (transport, non-2xx status,
/// undecodable or empty body) is reported as [`DomainError::Generation`].
///
/// The `reqwest::Client` is cheap to clone, so the container builds one and
/// hands clones to each `GeminiClient` it creates.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    /// Full endpoint URL (base + model + `:generateContent`).
    url: String,
}

impl GeminiClient {
    pub fn new(client: reqwest::Client, api_key: impl Into<String>, base_url: &str) -> Self {
        Self::with_model(client, api_key, base_url, DEFAULT_MODEL)
    }

    pub fn with_model(
        client: reqwest::Client,
        api_key: impl Into<String>,
        base_url: &str,
        model: impl Into<String>,
    ) -> Self {
        let model: String = model.into();
        let url = format!(
            "{}{API_VERSION_PATH}/{model}:generateContent",
            base_url.trim_end_matches('/')
        );
        Self {
            client,
            api_key: api_key.into(),
            model,
            url,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.url
    }

    fn build_request(prompt: &str) -> ApiRequest<'_> {
        ApiRequest {
            contents: vec![ApiContent {
                role: "user",
                parts: vec![ApiPart { text: prompt }],
            }],
        }
    }

    /// Concatenates the text parts of the first candidate.
    fn extract_text(response: ApiResponse) -> Option<String> {
        let content = response.candidates.into_iter().next()?.content?;
        let text: String = content
            .parts
            .into_iter()
            .filter_map(|p| p.text)
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn generate_text(&self, prompt: &str) -> Result<String, DomainError> {
        info!("Generating response using model: {}", self.model);

        let response = self
            .client
            .post(&self.url)
            .header("x-goog-api-key", &self.api_key)
            .json(&Self::build_request(prompt))
            .send()
            .await
            .map_err(|e| DomainError::generation(format!("GeminiClient: request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("GeminiClient: API returned {status}: {body}");
            return Err(DomainError::generation(format!(
                "GeminiClient: API returned {status}"
            )));
        }

        let api_response: ApiResponse = response.json().await.map_err(|e| {
            DomainError::generation(format!("GeminiClient: failed to parse response: {e}"))
        })?;

        let text = Self::extract_text(api_response).ok_or_else(|| {
            DomainError::generation("GeminiClient: response contained no text")
        })?;

        info!("LLM response generated successfully.");
        Ok(text)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
