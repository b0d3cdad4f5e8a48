use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use chat_api::connector::DEFAULT_BASE_URL;
use chat_api::{
    serve, ChatController, ChatRequest, Commands, Container, ContainerConfig,
    PROCESSING_ERROR_DETAIL,
};

#[derive(Parser)]
#[command(name = "chat-api")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    #[arg(long, global = true, env = "GEMINI_API_KEY", hide_env_values = true)]
    gemini_api_key: Option<String>,

    #[arg(long, global = true, env = "GEMINI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    gemini_base_url: String,

    /// DuckDB file path, `duckdb://<path>`, or `:memory:`
    #[arg(long, global = true, env = "DB_URL", default_value = "chat_api.duckdb")]
    db_url: String,

    /// Schema that holds the chat_interactions table
    #[arg(long, global = true, env = "DB_NAME", default_value = "mydatabase")]
    db_name: String,

    /// Keep interactions in memory instead of DuckDB
    #[arg(long, global = true)]
    memory_storage: bool,

    /// Answer with a deterministic offline generator instead of Gemini
    #[arg(long, global = true)]
    mock_llm: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn container_config(&self) -> ContainerConfig {
        ContainerConfig {
            gemini_api_key: self.gemini_api_key.clone(),
            gemini_base_url: self.gemini_base_url.clone(),
            db_url: self.db_url.clone(),
            db_name: self.db_name.clone(),
            memory_storage: self.memory_storage,
            mock_llm: self.mock_llm,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let container = Arc::new(Container::new(cli.container_config()).await?);

    let outcome = run(cli.command, Arc::clone(&container)).await;
    container.shutdown().await?;
    outcome
}

async fn run(command: Commands, container: Arc<Container>) -> Result<()> {
    match command {
        Commands::Serve { host, port } => {
            let addr: SocketAddr = format!("{host}:{port}")
                .parse()
                .with_context(|| format!("invalid listen address {host}:{port}"))?;
            serve(container, addr).await
        }

        Commands::Chat { prompt, user_id } => {
            let request = ChatRequest::try_new(user_id, prompt)
                .map_err(|_| anyhow!("--user-id must not be empty"))?;
            let response = ChatController::new(&container)
                .chat(request)
                .await
                .map_err(|_| anyhow!(PROCESSING_ERROR_DETAIL))?;
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
    }
}
