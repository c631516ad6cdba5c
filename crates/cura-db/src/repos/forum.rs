//! Unified forum: posts by patients and researchers, with threaded replies.

use std::collections::HashMap;

use chrono::Utc;

use cura_core::entities::{ForumPost, ForumReply};
use cura_core::enums::AuthorRole;
use cura_core::errors::CoreError;
use cura_core::ids::{PREFIX_POST, PREFIX_REPLY};
use cura_core::responses::SpecializationForums;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, opt_value, parse_datetime, parse_enum, timestamp};
use crate::service::CuraService;

/// Author name stored when a post is submitted without one.
pub const ANONYMOUS: &str = "Anonymous";

const POST_COLS: &str =
    "p.id, p.title, p.content, p.category, p.specialization, p.author_name, p.author_role, p.created_at";

const REPLY_COLS: &str =
    "x.id, x.post_id, x.reply_text, x.replier_name, x.replier_role, x.created_at";

fn row_to_post(row: &libsql::Row) -> Result<ForumPost, DatabaseError> {
    Ok(ForumPost {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        category: get_opt_string(row, 3)?,
        specialization: get_opt_string(row, 4)?,
        author_name: row.get(5)?,
        author_role: parse_enum(&row.get::<String>(6)?)?,
        created_at: parse_datetime(&row.get::<String>(7)?)?,
        replies: Vec::new(),
    })
}

fn row_to_reply(row: &libsql::Row) -> Result<ForumReply, DatabaseError> {
    Ok(ForumReply {
        id: row.get(0)?,
        post_id: row.get(1)?,
        reply_text: row.get(2)?,
        replier_name: row.get(3)?,
        replier_role: parse_enum(&row.get::<String>(4)?)?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

fn required(field: &str, value: &str) -> Result<String, CoreError> {
    let value = value.trim();
    if value.is_empty() {
        Err(CoreError::missing_field(field))
    } else {
        Ok(value.to_string())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Input for [`CuraService::create_post`].
#[derive(Debug, Clone, Default)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    pub specialization: Option<String>,
    /// Defaults to [`ANONYMOUS`].
    pub author_name: Option<String>,
    /// Defaults to patient.
    pub author_role: Option<AuthorRole>,
}

/// Input for [`CuraService::add_reply`].
#[derive(Debug, Clone, Default)]
pub struct NewReply {
    pub reply_text: String,
    pub replier_name: String,
    /// Defaults to researcher.
    pub replier_role: Option<AuthorRole>,
}

/// Optional filters for [`CuraService::list_posts`].
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    pub role: Option<AuthorRole>,
    /// Case-insensitive equality on the post's specialization.
    pub specialization: Option<String>,
}

impl CuraService {
    /// # Errors
    ///
    /// `CoreError::Validation` when title or content is blank.
    pub async fn create_post(&self, new: &NewPost) -> Result<ForumPost, DatabaseError> {
        let title = required("title", &new.title)?;
        let content = required("content", &new.content)?;
        let author_name = non_blank(new.author_name.as_deref()).unwrap_or(ANONYMOUS);
        let author_role = new.author_role.unwrap_or(AuthorRole::Patient);

        let id = self.db().generate_id(PREFIX_POST).await?;
        self.db()
            .conn()
            .execute(
                "INSERT INTO forum_posts
                    (id, title, content, category, specialization, author_name, author_role, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                libsql::params![
                    id.as_str(),
                    title.as_str(),
                    content.as_str(),
                    opt_value(non_blank(new.category.as_deref())),
                    opt_value(non_blank(new.specialization.as_deref())),
                    author_name,
                    author_role.as_str(),
                    timestamp(Utc::now())
                ],
            )
            .await?;

        tracing::info!(post_id = %id, role = %author_role, "forum post created");
        self.get_post(&id).await
    }

    /// A single post with its replies.
    ///
    /// # Errors
    ///
    /// `CoreError::NotFound` when no post has this ID.
    pub async fn get_post(&self, id: &str) -> Result<ForumPost, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {POST_COLS} FROM forum_posts p WHERE p.id = ?1"),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| CoreError::not_found("Forum post", id))?;
        let mut posts = vec![row_to_post(&row)?];
        self.attach_replies(&mut posts).await?;
        Ok(posts.remove(0))
    }

    /// Posts newest first, each with its replies oldest first.
    pub async fn list_posts(&self, filter: &PostFilter) -> Result<Vec<ForumPost>, DatabaseError> {
        let mut conditions = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(role) = filter.role {
            params.push(role.as_str().into());
            conditions.push(format!("p.author_role = ?{}", params.len()));
        }
        if let Some(specialization) = non_blank(filter.specialization.as_deref()) {
            params.push(specialization.to_lowercase().into());
            conditions.push(format!(
                "LOWER(COALESCE(p.specialization, '')) = ?{}",
                params.len()
            ));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };
        let mut posts = self
            .query_all(
                &format!(
                    "SELECT {POST_COLS} FROM forum_posts p {where_clause}
                     ORDER BY p.created_at DESC, p.rowid DESC"
                ),
                libsql::params_from_iter(params),
                row_to_post,
            )
            .await?;
        self.attach_replies(&mut posts).await?;
        Ok(posts)
    }

    /// # Errors
    ///
    /// - `CoreError::Validation` when reply text or replier name is blank.
    /// - `CoreError::NotFound` for an unknown post.
    pub async fn add_reply(&self, post_id: &str, new: &NewReply) -> Result<ForumReply, DatabaseError> {
        let reply_text = required("reply_text", &new.reply_text)?;
        let replier_name = required("replier_name", &new.replier_name)?;
        let replier_role = new.replier_role.unwrap_or(AuthorRole::Researcher);

        let mut rows = self
            .db()
            .conn()
            .query("SELECT 1 FROM forum_posts WHERE id = ?1", [post_id])
            .await?;
        if rows.next().await?.is_none() {
            return Err(CoreError::not_found("Forum post", post_id).into());
        }

        let id = self.db().generate_id(PREFIX_REPLY).await?;
        let now = Utc::now();
        self.db()
            .conn()
            .execute(
                "INSERT INTO forum_replies (id, post_id, reply_text, replier_name, replier_role, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                libsql::params![
                    id.as_str(),
                    post_id,
                    reply_text.as_str(),
                    replier_name.as_str(),
                    replier_role.as_str(),
                    timestamp(now)
                ],
            )
            .await?;

        tracing::debug!(post_id, reply_id = %id, "forum reply added");
        Ok(ForumReply {
            id,
            post_id: post_id.to_string(),
            reply_text,
            replier_name,
            replier_role,
            created_at: parse_datetime(&timestamp(now))?,
        })
    }

    /// Researcher and patient threads for one specialization.
    pub async fn forums_by_specialization(
        &self,
        specialization: &str,
    ) -> Result<SpecializationForums, DatabaseError> {
        let filter = |role| PostFilter {
            role: Some(role),
            specialization: Some(specialization.to_string()),
        };
        Ok(SpecializationForums {
            researcher_forums: self.list_posts(&filter(AuthorRole::Researcher)).await?,
            patient_forums: self.list_posts(&filter(AuthorRole::Patient)).await?,
        })
    }

    /// Load replies for `posts` in one query and attach them in order.
    async fn attach_replies(&self, posts: &mut [ForumPost]) -> Result<(), DatabaseError> {
        if posts.is_empty() {
            return Ok(());
        }
        let placeholders: Vec<String> = (1..=posts.len()).map(|i| format!("?{i}")).collect();
        let params: Vec<libsql::Value> = posts.iter().map(|p| p.id.clone().into()).collect();

        let replies = self
            .query_all(
                &format!(
                    "SELECT {REPLY_COLS} FROM forum_replies x
                     WHERE x.post_id IN ({})
                     ORDER BY x.created_at ASC, x.rowid ASC",
                    placeholders.join(", ")
                ),
                libsql::params_from_iter(params),
                row_to_reply,
            )
            .await?;

        let mut by_post: HashMap<String, Vec<ForumReply>> = HashMap::new();
        for reply in replies {
            by_post.entry(reply.post_id.clone()).or_default().push(reply);
        }
        for post in posts.iter_mut() {
            post.replies = by_post.remove(&post.id).unwrap_or_default();
        }
        Ok(())
    }
}
