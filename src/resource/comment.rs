//! Guestbook comments

use serde::{Deserialize, Serialize};
use super::{Resource, scalar_text, text_column};

/// A guestbook entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub message: String,
    pub created_at: Option<String>,
}

/// Body of `POST /api/comments`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentDraft {
    #[serde(default, deserialize_with = "scalar_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub message: Option<String>,
}

impl Resource for Comment {
    type Draft = CommentDraft;

    const TABLE: &'static str = "comments";
    const COLUMNS: &'static [&'static str] = &["id", "name", "email", "message", "created_at"];
    const INSERT_COLUMNS: &'static [&'static str] = &["name", "email", "message"];
    // created_at has one-second resolution
    const ORDER_BY: &'static str = "created_at DESC, id DESC";
    const REQUIRED_MESSAGE: &'static str = "姓名和留言內容為必填項";
    const CREATED_MESSAGE: &'static str = "留言已成功添加";

    fn required_values(draft: &CommentDraft) -> Vec<Option<&str>> {
        vec![draft.name.as_deref(), draft.message.as_deref()]
    }

    fn insert_values(draft: &CommentDraft) -> Vec<Option<&str>> {
        vec![draft.name.as_deref(), draft.email.as_deref(), draft.message.as_deref()]
    }

    fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Comment {
            id: row.get(0)?,
            name: row.get(1)?,
            email: row.get(2)?,
            message: row.get(3)?,
            created_at: text_column(row, 4)?,
        })
    }
}
