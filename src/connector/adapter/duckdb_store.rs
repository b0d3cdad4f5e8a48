use std::path::PathBuf;
use std::sync::Arc;

use duckdb::Connection;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::domain::DomainError;

/// The process-wide DuckDB handle. `None` once the store has been closed.
pub type SharedConnection = Arc<Mutex<Option<Connection>>>;

const URL_SCHEME: &str = "duckdb://";
const IN_MEMORY: &str = ":memory:";
const DEFAULT_SCHEMA: &str = "main";

/// Where a database URL points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    InMemory,
    File(PathBuf),
}

impl DatabaseLocation {
    /// Accepts a plain path, `duckdb://<path>`, or `:memory:`.
    pub fn parse(url: &str) -> Result<Self, DomainError> {
        let raw = url.trim();
        let raw = raw.strip_prefix(URL_SCHEME).unwrap_or(raw);
        match raw {
            "" => Err(DomainError::invalid_input("database URL is empty")),
            IN_MEMORY => Ok(Self::InMemory),
            path => Ok(Self::File(PathBuf::from(path))),
        }
    }
}

/// Owns the single DuckDB connection shared by every request.
///
/// Opened once at startup, pinged so that an unreachable store fails the
/// process immediately, and closed explicitly at shutdown. `database` maps to a
/// DuckDB schema that holds the interaction table.
pub struct DuckdbStore {
    conn: SharedConnection,
    schema: String,
    location: DatabaseLocation,
}

impl DuckdbStore {
    pub async fn open(url: &str, database: &str) -> Result<Self, DomainError> {
        let location = DatabaseLocation::parse(url)?;
        let schema = Self::schema_name(database)?;

        let conn = match &location {
            DatabaseLocation::InMemory => Connection::open_in_memory(),
            DatabaseLocation::File(path) => Connection::open(path),
        }
        .map_err(|e| DomainError::internal(format!("Failed to open DuckDB database: {}", e)))?;

        conn.execute_batch(&format!("CREATE SCHEMA IF NOT EXISTS \"{}\";", schema))
            .map_err(|e| {
                DomainError::internal(format!("Failed to create DuckDB schema {}: {}", schema, e))
            })?;
        debug!("DuckDB schema {} ready", schema);

        let store = Self {
            conn: Arc::new(Mutex::new(Some(conn))),
            schema,
            location,
        };
        store.ping().await?;
        info!("Connected to DuckDB store at {}", store.describe());
        Ok(store)
    }

    pub async fn in_memory(database: &str) -> Result<Self, DomainError> {
        Self::open(IN_MEMORY, database).await
    }

    /// Returns a clone of the shared connection Arc so adapters can use it.
    pub fn shared_connection(&self) -> SharedConnection {
        Arc::clone(&self.conn)
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    pub fn describe(&self) -> String {
        match &self.location {
            DatabaseLocation::InMemory => format!("{IN_MEMORY} (schema {})", self.schema),
            DatabaseLocation::File(path) => format!("{} (schema {})", path.display(), self.schema),
        }
    }

    pub async fn ping(&self) -> Result<(), DomainError> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or_else(|| DomainError::internal("DuckDB connection is closed"))?;
        conn.query_row("SELECT 1", [], |row| row.get::<_, i32>(0))
            .map_err(|e| DomainError::internal(format!("DuckDB ping failed: {}", e)))?;
        Ok(())
    }

    /// Closes the connection. Later writes through any adapter fail with a
    /// save error; closing twice is a no-op.
    pub async fn close(&self) -> Result<(), DomainError> {
        let Some(conn) = self.conn.lock().await.take() else {
            return Ok(());
        };
        conn.close()
            .map_err(|(_, e)| DomainError::internal(format!("Failed to close DuckDB: {}", e)))?;
        info!("DuckDB connection closed.");
        Ok(())
    }

    fn schema_name(database: &str) -> Result<String, DomainError> {
        let name = database.trim();
        if name.is_empty() {
            return Ok(DEFAULT_SCHEMA.to_string());
        }
        if name.contains('"') {
            return Err(DomainError::invalid_input(format!(
                "database name must not contain quotes: {}",
                name
            )));
        }
        Ok(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_plain_paths_and_scheme() {
        assert_eq!(
            DatabaseLocation::parse("chat.duckdb").unwrap(),
            DatabaseLocation::File(PathBuf::from("chat.duckdb"))
        );
        assert_eq!(
            DatabaseLocation::parse("duckdb:///var/lib/chat.duckdb").unwrap(),
            DatabaseLocation::File(PathBuf::from("/var/lib/chat.duckdb"))
        );
        assert_eq!(
            DatabaseLocation::parse("duckdb://:memory:").unwrap(),
            DatabaseLocation::InMemory
        );
        assert_eq!(DatabaseLocation::parse(":memory:").unwrap(), DatabaseLocation::InMemory);
    }

    #[test]
    fn parse_rejects_empty_url() {
        assert!(DatabaseLocation::parse("  ").is_err());
        assert!(DatabaseLocation::parse("duckdb://").is_err());
    }

    #[test]
    fn schema_name_defaults_and_rejects_quotes() {
        assert_eq!(DuckdbStore::schema_name("").unwrap(), "main");
        assert_eq!(DuckdbStore::schema_name(" mydatabase ").unwrap(), "mydatabase");
        assert!(DuckdbStore::schema_name("bad\"name").is_err());
    }

    #[tokio::test]
    async fn close_makes_ping_fail() {
        let store = DuckdbStore::in_memory("mydatabase").await.unwrap();
        store.ping().await.unwrap();

        store.close().await.unwrap();
        assert!(store.ping().await.is_err());
        store.close().await.unwrap();
    }
}
