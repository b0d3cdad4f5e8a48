use async_trait::async_trait;

use crate::domain::{ChatInteraction, DomainError};

/// Write-only persistence for chat interactions.
#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// Stores `interaction` and returns the identifier assigned to it.
    ///
    /// Store failures are reported as [`DomainError::Save`].
    async fn create_chat_interaction(
        &self,
        interaction: &ChatInteraction,
    ) -> Result<String, DomainError>;
}
