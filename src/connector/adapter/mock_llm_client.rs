use async_trait::async_trait;

use crate::application::LlmClient;
use crate::domain::DomainError;

pub const MOCK_MODEL: &str = "mock-llm";

/// Offline generator for local runs and tests.
///
/// Produces a deterministic reply derived from the prompt, so the same input
/// always yields the same output.
pub struct MockLlmClient {
    model: String,
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self {
            model: MOCK_MODEL.to_string(),
        }
    }
}

impl Default for MockLlmClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn generate_text(&self, prompt: &str) -> Result<String, DomainError> {
        let words = prompt.split_whitespace().count();
        Ok(format!("Mock response to a {words}-word prompt: {prompt}"))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
