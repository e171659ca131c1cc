//! Memory journal entries

use serde::{Deserialize, Serialize};
use super::{Resource, scalar_text, text_column};

/// A remembered event.
///
/// `date` is when the event happened as entered by the user; `created_at`
/// is when the row was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memory {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub date: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemoryDraft {
    #[serde(default, deserialize_with = "scalar_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub date: Option<String>,
}

impl Resource for Memory {
    type Draft = MemoryDraft;

    const TABLE: &'static str = "memories";
    const COLUMNS: &'static [&'static str] =
        &["id", "title", "content", "image_url", "date", "created_at"];
    const INSERT_COLUMNS: &'static [&'static str] = &["title", "content", "image_url", "date"];
    // Undated memories go last; ties resolve newest row first
    const ORDER_BY: &'static str = "date IS NULL, date DESC, id DESC";
    const REQUIRED_MESSAGE: &'static str = "標題和內容為必填項";
    const CREATED_MESSAGE: &'static str = "回憶已成功添加";

    fn required_values(draft: &MemoryDraft) -> Vec<Option<&str>> {
        vec![draft.title.as_deref(), draft.content.as_deref()]
    }

    fn insert_values(draft: &MemoryDraft) -> Vec<Option<&str>> {
        vec![
            draft.title.as_deref(),
            draft.content.as_deref(),
            draft.image_url.as_deref(),
            draft.date.as_deref(),
        ]
    }

    fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Memory {
            id: row.get(0)?,
            title: row.get(1)?,
            content: row.get(2)?,
            image_url: row.get(3)?,
            date: text_column(row, 4)?,
            created_at: text_column(row, 5)?,
        })
    }
}
