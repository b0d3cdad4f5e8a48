use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing::{debug, error, info};

use crate::application::{ChatRepository, ChatUseCase, LlmClient};
use crate::connector::adapter::{
    DuckdbChatRepository, DuckdbStore, GeminiClient, InMemoryChatRepository, MockLlmClient,
    DEFAULT_BASE_URL,
};

pub struct ContainerConfig {
    /// Key for the Generative Language API. Required unless `mock_llm` is set.
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: String,
    /// DuckDB location: a file path, `duckdb://<path>`, or `:memory:`.
    pub db_url: String,
    /// Schema inside the DuckDB database that holds the interaction table.
    pub db_name: String,
    pub memory_storage: bool,
    pub mock_llm: bool,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_base_url: DEFAULT_BASE_URL.to_string(),
            db_url: "chat_api.duckdb".to_string(),
            db_name: "mydatabase".to_string(),
            memory_storage: false,
            mock_llm: false,
        }
    }
}

/// Process-lifetime state: the adapters behind both ports plus the store handle
/// that has to be closed at shutdown.
pub struct Container {
    llm_client: Arc<dyn LlmClient>,
    chat_repository: Arc<dyn ChatRepository>,
    store: Option<DuckdbStore>,
    storage: &'static str,
}

impl Container {
    pub async fn new(config: ContainerConfig) -> Result<Self> {
        let llm_client: Arc<dyn LlmClient> = if config.mock_llm {
            debug!("Using mock LLM client");
            Arc::new(MockLlmClient::new())
        } else {
            let Some(api_key) = config.gemini_api_key.filter(|k| !k.trim().is_empty()) else {
                bail!("GEMINI_API_KEY is required unless --mock-llm is set");
            };
            let client = GeminiClient::new(reqwest::Client::new(), api_key, &config.gemini_base_url);
            debug!("Using Gemini client at {}", client.endpoint());
            Arc::new(client)
        };

        let (chat_repository, store, storage): (Arc<dyn ChatRepository>, _, _) =
            if config.memory_storage {
                debug!("Using in-memory chat storage");
                (Arc::new(InMemoryChatRepository::new()), None, "memory")
            } else {
                info!("Connecting to DuckDB at {}...", config.db_url);
                let store = match DuckdbStore::open(&config.db_url, &config.db_name).await {
                    Ok(store) => store,
                    Err(e) => {
                        error!("Could not connect to DuckDB: {}", e);
                        return Err(e).context("failed to connect to the chat store");
                    }
                };
                let repository = DuckdbChatRepository::new(&store)
                    .await
                    .context("failed to prepare the chat interaction table")?;
                (Arc::new(repository), Some(store), "duckdb")
            };

        Ok(Self {
            llm_client,
            chat_repository,
            store,
            storage,
        })
    }

    /// Builds a container around caller-supplied ports; no store is owned.
    pub fn from_parts(
        llm_client: Arc<dyn LlmClient>,
        chat_repository: Arc<dyn ChatRepository>,
    ) -> Self {
        Self {
            llm_client,
            chat_repository,
            store: None,
            storage: "custom",
        }
    }

    /// Fresh use case per request; only `Arc` handles are cloned.
    pub fn chat_use_case(&self) -> ChatUseCase {
        ChatUseCase::new(self.llm_client.clone(), self.chat_repository.clone())
    }

    pub fn model_name(&self) -> &str {
        self.llm_client.model_name()
    }

    pub fn storage(&self) -> &'static str {
        self.storage
    }

    /// Checks that the store still answers. Containers without a DuckDB store
    /// are always healthy.
    pub async fn ping(&self) -> Result<()> {
        if let Some(store) = &self.store {
            store.ping().await?;
        }
        Ok(())
    }

    pub async fn shutdown(&self) -> Result<()> {
        if let Some(store) = &self.store {
            info!("Closing DuckDB connection...");
            store.close().await?;
        }
        Ok(())
    }
}
