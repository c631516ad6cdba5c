//! Forum handlers: the unified forum plus the per-specialization view.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};

use cura_core::entities::{ForumPost, ForumReply};
use cura_core::enums::AuthorRole;
use cura_core::responses::SpecializationForums;
use cura_db::repos::forum::{NewPost, NewReply, PostFilter};

use crate::api::error::ApiError;
use crate::api::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ForumQuery {
    pub role: Option<String>,
    pub specialization: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PostBody {
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    pub specialization: Option<String>,
    #[serde(alias = "authorName")]
    pub author_name: Option<String>,
    #[serde(alias = "authorRole", alias = "role")]
    pub author_role: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ReplyBody {
    #[serde(alias = "replyText")]
    pub reply_text: String,
    #[serde(alias = "replierName")]
    pub replier_name: String,
    #[serde(alias = "replierRole")]
    pub replier_role: Option<String>,
}

/// Response of the researcher-forum reply route.
#[derive(Debug, Serialize)]
pub struct ReplyCreated {
    pub message: &'static str,
    pub reply: ForumReply,
}

/// Parse an optional role; blank means "not given".
fn parse_role(value: Option<&str>) -> Result<Option<AuthorRole>, ApiError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => Ok(Some(v.parse::<AuthorRole>()?)),
        None => Ok(None),
    }
}

impl ReplyBody {
    fn into_new(self) -> Result<NewReply, ApiError> {
        Ok(NewReply {
            replier_role: parse_role(self.replier_role.as_deref())?,
            reply_text: self.reply_text,
            replier_name: self.replier_name,
        })
    }
}

/// GET /api/forums?role=&specialization=
pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<ForumQuery>,
) -> Result<Json<Vec<ForumPost>>, ApiError> {
    let filter = PostFilter {
        role: parse_role(query.role.as_deref())?,
        specialization: query.specialization,
    };
    Ok(Json(state.service.list_posts(&filter).await?))
}

/// POST /api/forums
pub async fn create_post(
    State(state): State<AppState>,
    Json(body): Json<PostBody>,
) -> Result<(StatusCode, Json<ForumPost>), ApiError> {
    let new = NewPost {
        author_role: parse_role(body.author_role.as_deref())?,
        title: body.title,
        content: body.content,
        category: body.category,
        specialization: body.specialization,
        author_name: body.author_name,
    };
    let post = state.service.create_post(&new).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// POST /api/forums/{post_id}/replies
pub async fn add_reply(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
    Json(body): Json<ReplyBody>,
) -> Result<(StatusCode, Json<ForumReply>), ApiError> {
    let reply = state.service.add_reply(&post_id, &body.into_new()?).await?;
    Ok((StatusCode::CREATED, Json(reply)))
}

/// GET /api/researcherforums/{specialization}
pub async fn forums_by_specialization(
    State(state): State<AppState>,
    Path(specialization): Path<String>,
) -> Result<Json<SpecializationForums>, ApiError> {
    Ok(Json(
        state
            .service
            .forums_by_specialization(&specialization)
            .await?,
    ))
}

/// POST /api/researcherforums/{post_id}/replies
pub async fn add_researcher_reply(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
    Json(body): Json<ReplyBody>,
) -> Result<(StatusCode, Json<ReplyCreated>), ApiError> {
    let reply = state.service.add_reply(&post_id, &body.into_new()?).await?;
    Ok((
        StatusCode::CREATED,
        Json(ReplyCreated {
            message: "Reply added successfully.",
            reply,
        }),
    ))
}
