//! Database layer - stores and data access

pub mod memory;
pub mod postgres;
pub mod traits;

pub use memory::InMemoryDirectoryStore;
pub use postgres::{connect_pool, run_migrations, PostgresDirectoryStore};
pub use traits::DirectoryStore;

/// Escape `%`, `_` and `\` so user input is matched literally inside `ILIKE`.
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// `%term%` pattern for case-insensitive substring matching.
pub fn contains_pattern(term: &str) -> String {
    format!("%{}%", escape_like(term))
}
