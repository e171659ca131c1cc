//! # Keepsake - guestbook, link directory and memory journal backend
//!
//! Keepsake exposes three independent resources over HTTP/JSON:
//! - Comments (a guestbook)
//! - Links (a categorized link directory)
//! - Memories (dated journal entries)
//!
//! Every resource supports `list` and `create`, persisted in a single SQLite
//! file through one shared connection handle.

pub mod config;
pub mod resource;
pub mod server;
pub mod storage;

// Re-exports for convenient access
pub use resource::{Comment, Link, Memory, Resource};
pub use storage::{Database, Store};

/// Result type alias for Keepsake operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Keepsake operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Client supplied insufficient data; never reaches the database.
    #[error("{0}")]
    Validation(&'static str),

    #[error("{0}")]
    Storage(#[from] rusqlite::Error),

    #[error("database connection is closed")]
    ConnectionClosed,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for errors caused by the request rather than the storage layer
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}
