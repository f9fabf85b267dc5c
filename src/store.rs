//! Store adapter seam. Route handlers talk to persistence only through
//! [`TodoStore`]; [`crate::db::SqliteTodoStore`] is the production backend.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::Todo;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Document not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait TodoStore: Send + Sync {
    /// All records, newest `created_at` first.
    async fn list_all(&self) -> Result<Vec<Todo>, StoreError>;

    /// `None` when no record has this id or the id is malformed.
    async fn get_by_id(&self, id: &str) -> Result<Option<Todo>, StoreError>;

    async fn create(&self, title: &str, completed: bool) -> Result<Todo, StoreError>;

    async fn update(&self, id: &str, title: &str, completed: bool) -> Result<Todo, StoreError>;

    async fn toggle(&self, id: &str) -> Result<Todo, StoreError>;

    /// Succeeds whether or not the record existed.
    async fn delete_by_id(&self, id: &str) -> Result<(), StoreError>;

    /// Removes every record, returning how many were deleted.
    async fn delete_all(&self) -> Result<u64, StoreError>;

    /// Oldest record with exactly this title.
    async fn find_by_title(&self, title: &str) -> Result<Option<Todo>, StoreError>;
}

pub(crate) fn validate_title(title: &str) -> Result<(), StoreError> {
    if title.trim().is_empty() {
        return Err(StoreError::Validation("title is required".to_string()));
    }
    Ok(())
}
