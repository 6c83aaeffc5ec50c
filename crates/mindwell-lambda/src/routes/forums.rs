use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use serde_json::json;
use uuid::Uuid;

use mindwell_audit::events::{Actor, AuditAction, AuditEvent};
use mindwell_core::models::forum::{
    ForumCategory, ForumCategoryView, ForumPost, ForumPostView, NewForumPost, PostQuery,
    active_categories, list_posts,
};
use mindwell_core::object_keys;
use mindwell_storage::state::{load_all, save_record, update_record};

use crate::error::ApiError;
use crate::routes::resources::LanguageQuery;
use crate::state::AppState;

/// Opaque per-device id the app sends so a student's posts can be grouped
/// without an account.
pub const CLIENT_ID_HEADER: &str = "x-mindwell-client-id";

async fn load_categories(state: &AppState) -> Result<Vec<ForumCategory>, ApiError> {
    Ok(load_all(&state.s3, &state.bucket, object_keys::FORUM_CATEGORIES_PREFIX).await?)
}

pub async fn list_categories(
    State(state): State<AppState>,
    Query(query): Query<LanguageQuery>,
) -> Result<Json<Vec<ForumCategoryView>>, ApiError> {
    let categories = load_categories(&state).await?;
    Ok(Json(active_categories(&categories, query.language)))
}

pub async fn list_forum_posts(
    State(state): State<AppState>,
    Query(query): Query<PostQuery>,
) -> Result<Json<Vec<ForumPostView>>, ApiError> {
    let posts: Vec<ForumPost> =
        load_all(&state.s3, &state.bucket, object_keys::FORUM_POSTS_PREFIX).await?;
    Ok(Json(list_posts(&posts, &query)))
}

pub async fn create_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<NewForumPost>,
) -> Result<Json<ForumPostView>, ApiError> {
    let author_id = headers
        .get(CLIENT_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("guest-{}", Uuid::new_v4()));

    let categories = load_categories(&state).await?;
    let post = req.into_post(author_id, &categories, jiff::Timestamp::now())?;

    save_record(
        &state.s3,
        &state.bucket,
        &object_keys::forum_post(post.id),
        &post,
    )
    .await?;

    AuditEvent::new(
        AuditAction::ForumPostCreated,
        "forum_post",
        post.id.to_string(),
        Actor::Anonymous,
    )
    .with_details(json!({
        "category_id": post.category_id,
        "is_anonymous": post.is_anonymous,
    }))
    .emit();

    Ok(Json(post.public_view()))
}

pub async fn upvote_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ForumPostView>, ApiError> {
    let post: ForumPost = update_record(
        &state.s3,
        &state.bucket,
        &object_keys::forum_post(id),
        |p: &mut ForumPost| -> Result<(), ApiError> {
            if p.is_moderated {
                return Err(ApiError::NotFound(format!("post not found: {id}")));
            }
            p.upvote().map_err(ApiError::from)
        },
    )
    .await?;
    Ok(Json(post.public_view()))
}
