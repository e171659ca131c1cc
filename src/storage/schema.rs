//! Database schema definitions

use rusqlite::Connection;

/// SQL to create the comments table
pub const CREATE_COMMENTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS comments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT,
    message TEXT NOT NULL,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)
"#;

/// SQL to create the links table
pub const CREATE_LINKS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS links (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    url TEXT NOT NULL,
    description TEXT,
    category TEXT,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)
"#;

/// SQL to create the memories table
/// `date` is the user-supplied event date, distinct from `created_at`
pub const CREATE_MEMORIES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS memories (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    content TEXT NOT NULL,
    image_url TEXT,
    date DATE,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)
"#;

/// All schema creation statements, paired with the table they create
pub fn all_schema_statements() -> Vec<(&'static str, &'static str)> {
    vec![
        ("comments", CREATE_COMMENTS_TABLE),
        ("links", CREATE_LINKS_TABLE),
        ("memories", CREATE_MEMORIES_TABLE),
    ]
}

/// Create any missing tables.
///
/// Safe to run on every start. A failing statement is logged and skipped;
/// the affected table then reports storage errors on first use.
pub fn initialize_schema(conn: &Connection) {
    let mut ready = 0;
    for (table, stmt) in all_schema_statements() {
        match conn.execute(stmt, []) {
            Ok(_) => ready += 1,
            Err(e) => tracing::error!("Failed to create table {}: {}", table, e),
        }
    }
    tracing::debug!("Schema initialized ({} tables ready)", ready);
}
