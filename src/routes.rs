use axum::extract::{Form, Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::{Router, routing::get};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::models::{TodoForm, TodoInput};
use crate::state::AppState;
use crate::views;

const TODOS_PATH: &str = "/todos";

/// Form body for `POST /todos/{id}`, which stands in for PUT and DELETE
/// since HTML forms can only submit GET and POST.
#[derive(Debug, Deserialize)]
struct MethodOverrideForm {
    #[serde(rename = "_method")]
    method: Option<String>,
    title: Option<String>,
    completed: Option<String>,
}

pub fn router(state: AppState) -> Router {
    let todos = Router::new()
        .route("/", get(list_todos).post(create_todo))
        .route("/new", get(new_todo))
        .route(
            "/{id}",
            get(show_todo)
                .put(update_todo)
                .delete(delete_todo)
                .post(override_method),
        )
        .route("/{id}/edit", get(edit_todo))
        .route("/{id}/toggle", get(toggle_todo));

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .nest(TODOS_PATH, todos)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> Redirect {
    Redirect::to(TODOS_PATH)
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    sqlx::query("select 1").execute(&state.db).await?;
    Ok(StatusCode::OK)
}

async fn list_todos(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let todos = state.store.list_all().await?;
    Ok(Html(views::index(&todos)?))
}

async fn new_todo() -> Result<Html<String>, AppError> {
    Ok(Html(views::new_form(&TodoForm::default())?))
}

async fn show_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let todo = state.store.get_by_id(&id).await?.ok_or(AppError::NotFound)?;
    Ok(Html(views::show(&todo)?))
}

async fn create_todo(
    State(state): State<AppState>,
    Form(form): Form<TodoForm>,
) -> Result<Redirect, AppError> {
    let input = TodoInput::try_from(form)?;
    state.store.create(&input.title, input.completed).await?;
    Ok(Redirect::to(TODOS_PATH))
}

async fn edit_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let todo = state.store.get_by_id(&id).await?.ok_or(AppError::NotFound)?;
    Ok(Html(views::edit_form(&todo)?))
}

async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<TodoForm>,
) -> Result<Redirect, AppError> {
    apply_update(&state, &id, form).await
}

async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    state.store.delete_by_id(&id).await?;
    Ok(Redirect::to(TODOS_PATH))
}

async fn toggle_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    state.store.toggle(&id).await?;
    Ok(Redirect::to(TODOS_PATH))
}

async fn override_method(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<MethodOverrideForm>,
) -> Result<Response, AppError> {
    let method = form.method.as_deref().map(str::to_ascii_uppercase);
    match method.as_deref() {
        Some("PUT") => {
            let todo = TodoForm {
                title: form.title,
                completed: form.completed,
            };
            Ok(apply_update(&state, &id, todo).await?.into_response())
        }
        Some("DELETE") => {
            state.store.delete_by_id(&id).await?;
            Ok(Redirect::to(TODOS_PATH).into_response())
        }
        _ => Err(AppError::Validation(
            "_method must be PUT or DELETE".to_string(),
        )),
    }
}

/// Resolves the id before looking at the body, so an unknown id is a 404
/// whatever was submitted.
async fn apply_update(state: &AppState, id: &str, form: TodoForm) -> Result<Redirect, AppError> {
    let todo = state.store.get_by_id(id).await?.ok_or(AppError::NotFound)?;
    let input = TodoInput::try_from(form)?;
    state
        .store
        .update(&todo.id, &input.title, input.completed)
        .await?;
    Ok(Redirect::to(TODOS_PATH))
}
