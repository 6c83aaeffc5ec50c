use axum::Json;
use axum::extract::{Extension, Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::IntoResponse;
use serde::Deserialize;

use mindwell_audit::events::{Actor, AuditAction, AuditEvent};
use mindwell_core::models::analytics::{AnalyticsInput, AnalyticsSummary, TimeRange, summarize};
use mindwell_core::models::assessment::AssessmentRecord;
use mindwell_core::models::booking::Booking;
use mindwell_core::models::chat::ChatInteraction;
use mindwell_core::models::resource::Resource;
use mindwell_core::object_keys;
use mindwell_storage::state::load_all;

use crate::error::ApiError;
use crate::middleware::auth::AdminUser;
use crate::routes::today_utc;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct RangeQuery {
    #[serde(default)]
    pub range: TimeRange,
}

async fn build_summary(state: &AppState, range: TimeRange) -> Result<AnalyticsSummary, ApiError> {
    let (s3, bucket) = (&state.s3, state.bucket.as_str());
    let assessments: Vec<AssessmentRecord> =
        load_all(s3, bucket, object_keys::ASSESSMENTS_PREFIX).await?;
    let bookings: Vec<Booking> = load_all(s3, bucket, object_keys::BOOKINGS_PREFIX).await?;
    let chats: Vec<ChatInteraction> =
        load_all(s3, bucket, object_keys::CHAT_INTERACTIONS_PREFIX).await?;
    let resources: Vec<Resource> = load_all(s3, bucket, object_keys::RESOURCES_PREFIX).await?;

    let input = AnalyticsInput {
        assessments: &assessments,
        bookings: &bookings,
        chats: &chats,
        resources: &resources,
    };
    Ok(summarize(input, range, today_utc()))
}

pub async fn get_analytics(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminUser>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<AnalyticsSummary>, ApiError> {
    let summary = build_summary(&state, query.range).await?;
    AuditEvent::new(
        AuditAction::AnalyticsViewed,
        "analytics",
        query.range.days().to_string(),
        Actor::User(admin.sub),
    )
    .emit();
    Ok(Json(summary))
}

pub async fn export_analytics(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminUser>,
    Query(query): Query<RangeQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let summary = build_summary(&state, query.range).await?;
    AuditEvent::new(
        AuditAction::AnalyticsExported,
        "analytics",
        query.range.days().to_string(),
        Actor::User(admin.sub),
    )
    .emit();

    let filename = format!(
        "attachment; filename=\"mindwell-analytics-{}d-{}.csv\"",
        query.range.days(),
        today_utc()
    );
    Ok((
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (CONTENT_DISPOSITION, filename),
        ],
        summary.to_csv(),
    ))
}
