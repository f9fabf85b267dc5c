//! Server-rendered HTML pages. Templates live in `templates/` and are
//! compiled into one handlebars registry on first use.

use std::sync::LazyLock;

use axum::http::StatusCode;
use handlebars::{Handlebars, RenderError};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::models::{Todo, TodoForm};

pub const INDEX: &str = "todos/index";
pub const NEW: &str = "todos/new";
pub const SHOW: &str = "todos/show";
pub const EDIT: &str = "todos/edit";
pub const ERROR: &str = "error";

const PARTIALS: [(&str, &str); 2] = [
    ("header", include_str!("../templates/header.hbs")),
    ("footer", include_str!("../templates/footer.hbs")),
];

const TEMPLATES: [(&str, &str); 5] = [
    (INDEX, include_str!("../templates/todos/index.hbs")),
    (NEW, include_str!("../templates/todos/new.hbs")),
    (SHOW, include_str!("../templates/todos/show.hbs")),
    (EDIT, include_str!("../templates/todos/edit.hbs")),
    (ERROR, include_str!("../templates/error.hbs")),
];

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("template registry unavailable: {0}")]
    Registry(String),

    #[error("render failed: {0}")]
    Render(#[from] RenderError),
}

static REGISTRY: LazyLock<Result<Handlebars<'static>, String>> = LazyLock::new(build_registry);

fn build_registry() -> Result<Handlebars<'static>, String> {
    let mut registry = Handlebars::new();
    for (name, source) in PARTIALS {
        registry
            .register_partial(name, source)
            .map_err(|e| format!("{name}: {e}"))?;
    }
    for (name, source) in TEMPLATES {
        registry
            .register_template_string(name, source)
            .map_err(|e| format!("{name}: {e}"))?;
    }
    Ok(registry)
}

/// The shared registry. Call once at startup to surface template errors early.
pub fn registry() -> Result<&'static Handlebars<'static>, ViewError> {
    REGISTRY
        .as_ref()
        .map_err(|e| ViewError::Registry(e.clone()))
}

pub fn render<T: Serialize>(name: &str, data: &T) -> Result<String, ViewError> {
    Ok(registry()?.render(name, data)?)
}

#[derive(Serialize)]
struct TodoView<'a> {
    id: &'a str,
    title: &'a str,
    completed: bool,
    created_at: String,
    updated_at: String,
}

impl<'a> From<&'a Todo> for TodoView<'a> {
    fn from(todo: &'a Todo) -> Self {
        Self {
            id: &todo.id,
            title: &todo.title,
            completed: todo.completed,
            created_at: todo.created_at_display(),
            updated_at: todo.updated_at_display(),
        }
    }
}

pub fn index(todos: &[Todo]) -> Result<String, ViewError> {
    let todos: Vec<TodoView> = todos.iter().map(TodoView::from).collect();
    render(INDEX, &json!({ "page_title": "Todos", "todos": todos }))
}

pub fn new_form(form: &TodoForm) -> Result<String, ViewError> {
    render(
        NEW,
        &json!({
            "page_title": "New todo",
            "todo": {
                "title": form.title.as_deref().unwrap_or(""),
                "completed": form.completed.is_some(),
            },
        }),
    )
}

pub fn show(todo: &Todo) -> Result<String, ViewError> {
    render(SHOW, &json!({ "page_title": todo.title, "todo": TodoView::from(todo) }))
}

pub fn edit_form(todo: &Todo) -> Result<String, ViewError> {
    render(EDIT, &json!({ "page_title": "Edit todo", "todo": TodoView::from(todo) }))
}

pub fn error_page(status: StatusCode, message: &str) -> Result<String, ViewError> {
    let status = status.to_string();
    render(
        ERROR,
        &json!({ "page_title": status, "status": status, "message": message }),
    )
}
