use async_trait::async_trait;
use duckdb::params;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::application::ChatRepository;
use crate::connector::adapter::{DuckdbStore, SharedConnection};
use crate::domain::{ChatInteraction, DomainError};

pub const CHAT_INTERACTIONS_TABLE: &str = "chat_interactions";

/// Stores one row per interaction in `"<schema>".chat_interactions`.
pub struct DuckdbChatRepository {
    conn: SharedConnection,
    table: String,
}

impl DuckdbChatRepository {
    /// Creates the interaction table in the store's schema if needed.
    pub async fn new(store: &DuckdbStore) -> Result<Self, DomainError> {
        let repository = Self::with_connection_no_init(store.shared_connection(), store.schema());
        repository.initialize().await?;
        Ok(repository)
    }

    /// Wraps a connection whose table already exists.
    pub fn with_connection_no_init(conn: SharedConnection, schema: &str) -> Self {
        Self {
            conn,
            table: format!("\"{}\".{}", schema, CHAT_INTERACTIONS_TABLE),
        }
    }

    async fn initialize(&self) -> Result<(), DomainError> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or_else(|| DomainError::internal("DuckDB connection is closed"))?;

        conn.execute_batch(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                prompt TEXT NOT NULL,
                response TEXT NOT NULL,
                model TEXT NOT NULL,
                "timestamp" TEXT NOT NULL
            );
            "#,
            self.table
        ))
        .map_err(|e| DomainError::internal(format!("Failed to initialize schema: {}", e)))?;

        debug!("DuckDB table {} initialized", self.table);
        Ok(())
    }
}

#[async_trait]
impl ChatRepository for DuckdbChatRepository {
    async fn create_chat_interaction(
        &self,
        interaction: &ChatInteraction,
    ) -> Result<String, DomainError> {
        let id = interaction
            .id()
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(|| {
            DomainError::save("Failed to save chat interaction to database: connection is closed")
        })?;

        conn.execute(
            &format!(
                "INSERT INTO {} (id, user_id, prompt, response, model, \"timestamp\") VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                self.table
            ),
            params![
                id,
                interaction.user_id(),
                interaction.prompt(),
                interaction.response(),
                interaction.model(),
                interaction.timestamp_rfc3339(),
            ],
        )
        .map_err(|e| {
            error!("Error creating chat interaction: {}", e);
            DomainError::save(format!("Failed to save chat interaction to database: {}", e))
        })?;

        info!("Chat interaction created with ID: {}", id);
        Ok(id)
    }
}
