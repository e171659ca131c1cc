//! Link directory entries

use serde::{Deserialize, Serialize};
use super::{Resource, scalar_text, text_column};

/// A bookmarked URL, grouped by category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LinkDraft {
    #[serde(default, deserialize_with = "scalar_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub category: Option<String>,
}

impl Resource for Link {
    type Draft = LinkDraft;

    const TABLE: &'static str = "links";
    const COLUMNS: &'static [&'static str] =
        &["id", "title", "url", "description", "category", "created_at"];
    const INSERT_COLUMNS: &'static [&'static str] = &["title", "url", "description", "category"];
    // Uncategorized links sort first (SQLite orders NULL lowest)
    const ORDER_BY: &'static str = "category ASC, title ASC, id ASC";
    const REQUIRED_MESSAGE: &'static str = "標題和網址為必填項";
    const CREATED_MESSAGE: &'static str = "網址已成功添加";

    fn required_values(draft: &LinkDraft) -> Vec<Option<&str>> {
        vec![draft.title.as_deref(), draft.url.as_deref()]
    }

    fn insert_values(draft: &LinkDraft) -> Vec<Option<&str>> {
        vec![
            draft.title.as_deref(),
            draft.url.as_deref(),
            draft.description.as_deref(),
            draft.category.as_deref(),
        ]
    }

    fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Link {
            id: row.get(0)?,
            title: row.get(1)?,
            url: row.get(2)?,
            description: row.get(3)?,
            category: row.get(4)?,
            created_at: text_column(row, 5)?,
        })
    }
}
