//! Storage Layer - SQLite-backed persistence
//!
//! System of record is one SQLite file with tables:
//! - comments(name, email, message, created_at)
//! - links(title, url, description, category, created_at)
//! - memories(title, content, image_url, date, created_at)

pub mod schema;
pub mod sqlite;
pub mod store;

pub use sqlite::Database;
pub use store::{Created, Store};
