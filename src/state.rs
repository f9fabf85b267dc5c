use std::sync::Arc;

use sqlx::SqlitePool;

use crate::db::SqliteTodoStore;
use crate::store::TodoStore;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub store: Arc<dyn TodoStore>,
}

impl AppState {
    pub fn new(db: SqlitePool) -> Self {
        let store = Arc::new(SqliteTodoStore::new(db.clone()));
        Self { db, store }
    }
}
