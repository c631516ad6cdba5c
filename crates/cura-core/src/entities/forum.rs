use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::AuthorRole;

/// A forum thread. Patient questions and researcher discussions share this
/// shape and are told apart by `author_role` and `specialization`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ForumPost {
    pub id: String,
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    pub specialization: Option<String>,
    pub author_name: String,
    pub author_role: AuthorRole,
    pub created_at: DateTime<Utc>,
    /// Replies, oldest first.
    #[serde(default)]
    pub replies: Vec<ForumReply>,
}

/// A reply attached to a forum post.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ForumReply {
    pub id: String,
    pub post_id: String,
    pub reply_text: String,
    pub replier_name: String,
    pub replier_role: AuthorRole,
    pub created_at: DateTime<Utc>,
}
