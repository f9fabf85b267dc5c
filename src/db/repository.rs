use async_trait::async_trait;
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::debug;
use uuid::Uuid;

use crate::models::Todo;
use crate::models::todo::{next_timestamp, now, to_db_text};
use crate::store::{StoreError, TodoStore, validate_title};

#[derive(Clone)]
pub struct SqliteTodoStore {
    db: SqlitePool,
}

impl SqliteTodoStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

fn is_well_formed(id: &str) -> bool {
    Uuid::parse_str(id).is_ok()
}

/// Advances `updated_at` on a row already modified inside `tx`. The first
/// write in `tx` took the database write lock, so the pair lands as one.
async fn touch(tx: &mut Transaction<'_, Sqlite>, mut todo: Todo) -> Result<Todo, StoreError> {
    todo.updated_at = next_timestamp(todo.updated_at);
    sqlx::query("UPDATE todos SET updated_at = ? WHERE id = ?")
        .bind(to_db_text(todo.updated_at))
        .bind(&todo.id)
        .execute(&mut **tx)
        .await?;
    Ok(todo)
}

#[async_trait]
impl TodoStore for SqliteTodoStore {
    async fn list_all(&self) -> Result<Vec<Todo>, StoreError> {
        let todos = sqlx::query_as::<_, Todo>(
            "SELECT id, title, completed, created_at, updated_at FROM todos ORDER BY created_at DESC, rowid DESC"
        )
        .fetch_all(&self.db)
        .await?;
        Ok(todos)
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Todo>, StoreError> {
        if !is_well_formed(id) {
            return Ok(None);
        }

        let todo = sqlx::query_as::<_, Todo>(
            "SELECT id, title, completed, created_at, updated_at FROM todos WHERE id = ?"
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(todo)
    }

    async fn create(&self, title: &str, completed: bool) -> Result<Todo, StoreError> {
        validate_title(title)?;

        let id = Uuid::new_v4().to_string();
        let now = now();

        sqlx::query(
            "INSERT INTO todos (id, title, completed, created_at, updated_at) VALUES (?, ?, ?, ?, ?)"
        )
        .bind(&id)
        .bind(title)
        .bind(completed)
        .bind(to_db_text(now))
        .bind(to_db_text(now))
        .execute(&self.db)
        .await?;

        debug!("created todo {}", id);

        Ok(Todo {
            id,
            title: title.to_string(),
            completed,
            created_at: now,
            updated_at: now,
        })
    }

    async fn update(&self, id: &str, title: &str, completed: bool) -> Result<Todo, StoreError> {
        if self.get_by_id(id).await?.is_none() {
            return Err(StoreError::NotFound);
        }
        validate_title(title)?;

        let mut tx = self.db.begin().await?;
        let written = sqlx::query_as::<_, Todo>(
            "UPDATE todos SET title = ?, completed = ? WHERE id = ? RETURNING id, title, completed, created_at, updated_at"
        )
        .bind(title)
        .bind(completed)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        // Deleted between the lookup and the write.
        .ok_or(StoreError::NotFound)?;

        let todo = touch(&mut tx, written).await?;
        tx.commit().await?;

        debug!("updated todo {}", id);
        Ok(todo)
    }

    async fn toggle(&self, id: &str) -> Result<Todo, StoreError> {
        if !is_well_formed(id) {
            return Err(StoreError::NotFound);
        }

        let mut tx = self.db.begin().await?;
        let flipped = sqlx::query_as::<_, Todo>(
            "UPDATE todos SET completed = NOT completed WHERE id = ? RETURNING id, title, completed, created_at, updated_at"
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(StoreError::NotFound)?;

        let todo = touch(&mut tx, flipped).await?;
        tx.commit().await?;

        debug!("toggled todo {} to completed={}", id, todo.completed);
        Ok(todo)
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), StoreError> {
        if !is_well_formed(id) {
            return Ok(());
        }

        let affected = sqlx::query("DELETE FROM todos WHERE id = ?")
            .bind(id)
            .execute(&self.db)
            .await?
            .rows_affected();

        debug!("deleted todo {} ({} rows)", id, affected);
        Ok(())
    }

    async fn delete_all(&self) -> Result<u64, StoreError> {
        let affected = sqlx::query("DELETE FROM todos")
            .execute(&self.db)
            .await?
            .rows_affected();
        Ok(affected)
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Todo>, StoreError> {
        let todo = sqlx::query_as::<_, Todo>(
            "SELECT id, title, completed, created_at, updated_at FROM todos WHERE title = ? ORDER BY created_at ASC, rowid ASC LIMIT 1"
        )
        .bind(title)
        .fetch_optional(&self.db)
        .await?;
        Ok(todo)
    }
}
