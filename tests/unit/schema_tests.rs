//! Unit tests for schema bootstrap on memory and file databases.

use std::sync::Arc;

use taskmanager::models::CategoryFields;
use taskmanager::persistence::category_repo::CategoryRepo;
use taskmanager::persistence::{db, schema};

#[tokio::test]
async fn in_memory_connect_creates_both_tables() {
    let pool = db::connect_memory()
        .await
        .expect("in-memory connect should succeed");

    for table in ["category", "task"] {
        let query = format!("SELECT COUNT(*) AS cnt FROM {table}");
        let row: (i64,) = sqlx::query_as(&query)
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("table '{table}' should be queryable: {e}"));
        assert_eq!(row.0, 0, "table '{table}' should start empty");
    }
}

#[tokio::test]
async fn foreign_keys_are_enforced() {
    let pool = db::connect_memory().await.expect("db");
    let (enabled,): (i64,) = sqlx::query_as("PRAGMA foreign_keys")
        .fetch_one(&pool)
        .await
        .expect("pragma");
    assert_eq!(enabled, 1);
}

#[tokio::test]
async fn bootstrap_is_idempotent() {
    let pool = db::connect_memory().await.expect("db");
    schema::bootstrap_schema(&pool).await.expect("second run");
    schema::bootstrap_schema(&pool).await.expect("third run");
}

#[tokio::test]
async fn file_database_persists_across_connections() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("tasks.db");

    let pool = db::connect(&path).await.expect("first open");
    CategoryRepo::new(Arc::new(pool.clone()))
        .create(&CategoryFields::new("Work"))
        .await
        .expect("create");
    pool.close().await;

    assert!(path.exists(), "database file should be created");

    let reopened = Arc::new(db::connect(&path).await.expect("second open"));
    let categories = CategoryRepo::new(reopened).list_all().await.expect("list");
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].category_name, "Work");
}
