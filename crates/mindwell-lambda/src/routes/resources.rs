use axum::Json;
use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use mindwell_audit::events::{Actor, AuditAction, AuditEvent};
use mindwell_core::models::locale::Language;
use mindwell_core::models::resource::{
    CategorySummary, Resource, ResourceFeedback, ResourceQuery, ResourceView, browse,
    category_summaries,
};
use mindwell_core::object_keys;
use mindwell_storage::objects;
use mindwell_storage::state::{load_all, load_record, save_record, update_record};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct LanguageQuery {
    #[serde(default)]
    pub language: Language,
}

#[derive(Deserialize)]
pub struct FeedbackRequest {
    pub helpful: bool,
}

#[derive(Serialize)]
pub struct MediaLink {
    url: String,
    expires_in_secs: u64,
}

async fn load_resources(state: &AppState) -> Result<Vec<Resource>, ApiError> {
    Ok(load_all(&state.s3, &state.bucket, object_keys::RESOURCES_PREFIX).await?)
}

pub async fn list_resources(
    State(state): State<AppState>,
    Query(query): Query<ResourceQuery>,
) -> Result<Json<Vec<ResourceView>>, ApiError> {
    let resources = load_resources(&state).await?;
    Ok(Json(browse(&resources, &query)))
}

pub async fn list_categories(
    State(state): State<AppState>,
    Query(query): Query<LanguageQuery>,
) -> Result<Json<Vec<CategorySummary>>, ApiError> {
    let resources = load_resources(&state).await?;
    Ok(Json(category_summaries(&resources, query.language)))
}

pub async fn record_view(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<LanguageQuery>,
) -> Result<Json<ResourceView>, ApiError> {
    let resource: Resource = update_record(
        &state.s3,
        &state.bucket,
        &object_keys::resource(id),
        |r: &mut Resource| -> Result<(), ApiError> {
            r.record_view();
            Ok(())
        },
    )
    .await?;
    Ok(Json(resource.view(query.language)))
}

pub async fn submit_feedback(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<LanguageQuery>,
    Json(req): Json<FeedbackRequest>,
) -> Result<Json<ResourceView>, ApiError> {
    let resource: Resource = update_record(
        &state.s3,
        &state.bucket,
        &object_keys::resource(id),
        |r: &mut Resource| -> Result<(), ApiError> {
            r.record_feedback(req.helpful);
            Ok(())
        },
    )
    .await?;

    let feedback = ResourceFeedback {
        id: Uuid::new_v4(),
        resource_id: id,
        helpful: req.helpful,
        created_at: jiff::Timestamp::now(),
    };
    save_record(
        &state.s3,
        &state.bucket,
        &object_keys::resource_feedback(id, feedback.id),
        &feedback,
    )
    .await?;

    AuditEvent::new(
        AuditAction::ResourceFeedback,
        "resource",
        id.to_string(),
        Actor::Anonymous,
    )
    .with_details(json!({ "helpful": req.helpful }))
    .emit();

    Ok(Json(resource.view(query.language)))
}

/// Short-lived download link for a resource's video, audio or PDF.
pub async fn media_url(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MediaLink>, ApiError> {
    let (resource, _): (Resource, _) =
        load_record(&state.s3, &state.bucket, &object_keys::resource(id)).await?;
    let key = resource
        .media_key
        .ok_or_else(|| ApiError::NotFound(format!("resource {id} has no media")))?;

    let url = objects::presign_get(&state.s3, &state.bucket, &key, state.media_url_ttl).await?;
    Ok(Json(MediaLink {
        url,
        expires_in_secs: state.media_url_ttl.as_secs(),
    }))
}
