//! Plain-text rendering of client results.

use chrono::Local;
use remote_entity_core::utils::truncate_string;
use remote_entity_core::{SecureGreeting, Todo};

/// Placeholder row shown instead of an empty table
const NO_TASKS: &str = "No tasks";

/// Longest title shown before truncation
const MAX_TITLE_WIDTH: usize = 48;

pub fn todo_table(todos: &[Todo]) -> String {
    let titles: Vec<String> = todos
        .iter()
        .map(|t| truncate_string(&t.title, MAX_TITLE_WIDTH))
        .collect();

    let id_width = todos
        .iter()
        .map(|t| t.id.to_string().len())
        .max()
        .unwrap_or(0)
        .max("ID".len());
    let title_width = titles
        .iter()
        .map(|t| t.chars().count())
        .max()
        .unwrap_or(0)
        .max("Title".len())
        .max(NO_TASKS.len());

    let mut out = format!("{:<id_width$}  {:<title_width$}  Done\n", "ID", "Title");
    if todos.is_empty() {
        out.push_str(&format!("{:<id_width$}  {NO_TASKS}\n", ""));
        return out;
    }
    for (todo, title) in todos.iter().zip(&titles) {
        out.push_str(&format!(
            "{:<id_width$}  {:<title_width$}  {}\n",
            todo.id,
            title,
            todo.status_display()
        ));
    }
    out
}

pub fn greeting(greeting: &SecureGreeting) -> String {
    let mut out = String::new();
    if let Some(ref username) = greeting.username {
        out.push_str(&format!("Hello, {}!\n", username));
    }
    out.push_str(&greeting.message);
    out.push('\n');
    out.push_str(&format!(
        "Last updated: {}\n",
        greeting.fetched_at.with_timezone(&Local).format("%H:%M:%S")
    ));
    out
}
