#![allow(dead_code)]

use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

use todos::db::SqliteTodoStore;

/// Every connection to `sqlite::memory:` gets its own database, so the pool
/// is pinned to a single connection that never expires.
pub async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create database");

    todos::db::migrate(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

pub async fn memory_store() -> SqliteTodoStore {
    SqliteTodoStore::new(memory_pool().await)
}
