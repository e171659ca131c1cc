//! Resource definitions
//!
//! Each resource is a row type plus a draft (the create request body). The
//! [`Resource`] trait carries the per-table configuration the generic
//! [`Store`](crate::storage::Store) needs: table name, insert columns,
//! required fields, ordering and the user-facing messages.

pub mod comment;
pub mod link;
pub mod memory;

pub use comment::{Comment, CommentDraft};
pub use link::{Link, LinkDraft};
pub use memory::{Memory, MemoryDraft};

use rusqlite::types::ValueRef;
use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};

/// A persisted row type with list and create support.
pub trait Resource: Serialize + Send + Sized + 'static {
    /// Request body accepted by `create`
    type Draft: DeserializeOwned + Default + Send + 'static;

    /// Table name
    const TABLE: &'static str;

    /// Columns returned by `list`, in the order `from_row` reads them
    const COLUMNS: &'static [&'static str];

    /// Columns written by `create`, in the order `insert_values` yields them
    const INSERT_COLUMNS: &'static [&'static str];

    /// ORDER BY clause used by `list`
    const ORDER_BY: &'static str;

    /// Error returned when a required field is missing or empty
    const REQUIRED_MESSAGE: &'static str;

    /// Message returned alongside a newly created id
    const CREATED_MESSAGE: &'static str;

    /// Required field values of a draft
    fn required_values(draft: &Self::Draft) -> Vec<Option<&str>>;

    /// Values bound to `INSERT_COLUMNS`
    fn insert_values(draft: &Self::Draft) -> Vec<Option<&str>>;

    /// Build a row from a result set laid out as `COLUMNS`
    fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self>;

    /// Check every required field is present and non-empty
    fn validate(draft: &Self::Draft) -> crate::Result<()> {
        let complete = Self::required_values(draft)
            .into_iter()
            .all(|value| value.is_some_and(|v| !v.is_empty()));

        if complete {
            Ok(())
        } else {
            Err(crate::Error::Validation(Self::REQUIRED_MESSAGE))
        }
    }
}

/// Read a nullable column as text.
///
/// Columns declared `DATE` or `TIMESTAMP` have numeric affinity, so a value
/// such as `2020` comes back as an integer.
pub(crate) fn text_column(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<Option<String>> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Null => None,
        ValueRef::Integer(i) => Some(i.to_string()),
        ValueRef::Real(f) => Some(f.to_string()),
        ValueRef::Text(t) | ValueRef::Blob(t) => Some(String::from_utf8_lossy(t).into_owned()),
    })
}

/// A scalar request field. Numbers and booleans are kept as their text form.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Text(s) => s,
            Scalar::Integer(i) => i.to_string(),
            Scalar::Float(f) => f.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

/// `deserialize_with` for draft fields: accepts any JSON scalar, `null` is missing
pub(crate) fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(Scalar::into_text))
}
