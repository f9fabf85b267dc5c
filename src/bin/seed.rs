//! Resets the database to a couple of sample todos and walks them through
//! an update and a delete. Handy for poking at the UI by hand.

use tracing::info;

use todos::config::Config;
use todos::db::{self, SqliteTodoStore};
use todos::models::Todo;
use todos::store::TodoStore;
use todos::init_tracing;

fn print_all(todos: &[Todo]) {
    info!("printing all todos:");
    for todo in todos {
        info!(
            "  {} | {} | completed={} | created {}",
            todo.id,
            todo.title,
            todo.completed,
            todo.created_at_display()
        );
    }
}

async fn run(store: &SqliteTodoStore) -> Result<(), Box<dyn std::error::Error>> {
    info!("removing old todos...");
    let removed = store.delete_all().await?;
    info!("old todos removed ({})", removed);

    info!("creating some new todos...");
    let saved = vec![
        store.create("groceries", false).await?,
        store.create("feed the cat", true).await?,
    ];
    info!("just saved {} todos", saved.len());

    print_all(&store.list_all().await?);

    match store.find_by_title("groceries").await? {
        Some(groceries) => {
            let updated = store.update(&groceries.id, &groceries.title, true).await?;
            info!("updated groceries: {}", serde_json::to_string(&updated)?);
            store.delete_by_id(&updated.id).await?;
        }
        None => tracing::warn!("groceries not found"),
    }

    print_all(&store.list_all().await?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_tracing("seed=info,todos=info");

    let config = Config::new_from_env()?;
    let pool = db::connect(&config).await?;
    db::migrate(&pool).await?;

    let store = SqliteTodoStore::new(pool.clone());
    let result = run(&store).await;
    if let Err(e) = &result {
        tracing::error!("seed failed: {}", e);
    }

    pool.close().await;
    info!("quitting");
    result
}
