//! Generic list/create store over one resource table

use std::marker::PhantomData;
use std::sync::Arc;
use rusqlite::params_from_iter;
use serde::Serialize;
use crate::resource::Resource;
use crate::Result;
use super::Database;

/// Outcome of a successful `create`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Created {
    pub id: i64,
    pub success: bool,
    pub message: &'static str,
}

/// Data access for one resource table, sharing the process-wide handle.
pub struct Store<R> {
    db: Arc<Database>,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for Store<R> {
    fn clone(&self) -> Self {
        Self {
            db: Arc::clone(&self.db),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> Store<R> {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            db,
            _resource: PhantomData,
        }
    }

    /// All rows in the resource's display order
    pub fn list(&self) -> Result<Vec<R>> {
        let sql = format!(
            "SELECT {} FROM {} ORDER BY {}",
            R::COLUMNS.join(", "),
            R::TABLE,
            R::ORDER_BY
        );

        self.db.with_conn(|conn| {
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map([], |row| R::from_row(row))?
                .collect::<rusqlite::Result<Vec<R>>>()?;
            Ok(rows)
        })
    }

    /// Validate and insert a new row, returning its id
    pub fn create(&self, draft: &R::Draft) -> Result<Created> {
        R::validate(draft)?;

        let placeholders = (1..=R::INSERT_COLUMNS.len())
            .map(|i| format!("?{}", i))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            R::TABLE,
            R::INSERT_COLUMNS.join(", "),
            placeholders
        );

        let id = self.db.with_conn(|conn| {
            conn.execute(&sql, params_from_iter(R::insert_values(draft)))?;
            Ok(conn.last_insert_rowid())
        })?;

        tracing::debug!("Inserted row {} into {}", id, R::TABLE);
        Ok(Created {
            id,
            success: true,
            message: R::CREATED_MESSAGE,
        })
    }
}
