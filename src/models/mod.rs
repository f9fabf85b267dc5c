pub mod todo;

pub use todo::{Todo, TodoForm, TodoInput};
