use async_trait::async_trait;

use crate::domain::DomainError;

/// Turns a prompt into generated text.
///
/// Implementors hide transport, serialization, and vendor-specific API details.
/// Every provider failure (network, quota, malformed response) must come back
/// as [`DomainError::Generation`]; no partial output is ever returned.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn generate_text(&self, prompt: &str) -> Result<String, DomainError>;

    /// Name of the backend model recorded alongside each interaction.
    fn model_name(&self) -> &str;
}
