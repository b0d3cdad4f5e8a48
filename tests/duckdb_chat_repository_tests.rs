use chrono::{TimeZone, Utc};
use tempfile::tempdir;

use chat_api::{ChatInteraction, ChatRepository, DuckdbChatRepository, DuckdbStore};

fn sample_interaction() -> ChatInteraction {
    ChatInteraction::new(
        "user123",
        "Hello, bot!",
        "Hi there!",
        "test-model",
        Utc.with_ymd_and_hms(2023, 10, 27, 10, 0, 0).unwrap(),
    )
}

#[tokio::test]
async fn duckdb_chat_repository_writes_one_row_per_interaction() {
    let dir = tempdir().expect("tempdir");
    let db_path = dir.path().join("chat_api.duckdb");

    let store = DuckdbStore::open(db_path.to_str().unwrap(), "mydatabase")
        .await
        .expect("duckdb open");
    let repository = DuckdbChatRepository::new(&store).await.expect("init table");

    let id = repository
        .create_chat_interaction(&sample_interaction())
        .await
        .expect("save");
    assert!(!id.is_empty());

    let conn = store.shared_connection();
    let guard = conn.lock().await;
    let conn = guard.as_ref().expect("open connection");
    let (user_id, prompt, response, model, timestamp): (String, String, String, String, String) = conn
        .query_row(
            "SELECT user_id, prompt, response, model, \"timestamp\" FROM \"mydatabase\".chat_interactions WHERE id = ?1",
            [&id],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?)),
        )
        .expect("row exists");

    assert_eq!(user_id, "user123");
    assert_eq!(prompt, "Hello, bot!");
    assert_eq!(response, "Hi there!");
    assert_eq!(model, "test-model");
    assert_eq!(timestamp, "2023-10-27T10:00:00.000000Z");
}

#[tokio::test]
async fn duckdb_chat_repository_duplicate_calls_create_duplicate_rows() {
    let store = DuckdbStore::in_memory("mydatabase").await.expect("duckdb open");
    let repository = DuckdbChatRepository::new(&store).await.expect("init table");

    let first = repository
        .create_chat_interaction(&sample_interaction())
        .await
        .expect("first save");
    let second = repository
        .create_chat_interaction(&sample_interaction())
        .await
        .expect("second save");
    assert_ne!(first, second);

    let conn = store.shared_connection();
    let guard = conn.lock().await;
    let count: i64 = guard
        .as_ref()
        .expect("open connection")
        .query_row(
            "SELECT COUNT(*) FROM \"mydatabase\".chat_interactions",
            [],
            |row| row.get(0),
        )
        .expect("count");
    assert_eq!(count, 2);
}

#[tokio::test]
async fn duckdb_chat_repository_constraint_violation_is_save_error() {
    let store = DuckdbStore::in_memory("mydatabase").await.expect("duckdb open");
    let repository = DuckdbChatRepository::new(&store).await.expect("init table");

    let mut interaction = sample_interaction();
    interaction.assign_id("653b6e8a1a2b3c4d5e6f7a8b");

    repository
        .create_chat_interaction(&interaction)
        .await
        .expect("first save");
    let err = repository
        .create_chat_interaction(&interaction)
        .await
        .expect_err("duplicate primary key");

    assert!(err.is_save_error());
    assert!(err
        .to_string()
        .contains("Failed to save chat interaction to database"));
}

#[tokio::test]
async fn duckdb_chat_repository_closed_store_is_save_error() {
    let store = DuckdbStore::in_memory("mydatabase").await.expect("duckdb open");
    let repository = DuckdbChatRepository::new(&store).await.expect("init table");

    store.close().await.expect("close");

    let err = repository
        .create_chat_interaction(&sample_interaction())
        .await
        .expect_err("closed connection");
    assert!(err.is_save_error());
}

#[tokio::test]
async fn duckdb_store_keeps_rows_across_reopen() {
    let dir = tempdir().expect("tempdir");
    let url = format!("duckdb://{}", dir.path().join("chat_api.duckdb").display());

    let id = {
        let store = DuckdbStore::open(&url, "mydatabase").await.expect("open");
        let repository = DuckdbChatRepository::new(&store).await.expect("init table");
        let id = repository
            .create_chat_interaction(&sample_interaction())
            .await
            .expect("save");
        store.close().await.expect("close");
        id
    };

    let store = DuckdbStore::open(&url, "mydatabase").await.expect("reopen");
    DuckdbChatRepository::new(&store).await.expect("table exists");

    let conn = store.shared_connection();
    let guard = conn.lock().await;
    let found: String = guard
        .as_ref()
        .expect("open connection")
        .query_row(
            "SELECT id FROM \"mydatabase\".chat_interactions WHERE id = ?1",
            [&id],
            |row| row.get(0),
        )
        .expect("row survives reopen");
    assert_eq!(found, id);
}
