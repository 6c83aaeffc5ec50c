use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use mindwell_audit::events::{Actor, AuditAction, AuditEvent};
use mindwell_core::models::assessment::AssessmentRecord;
use mindwell_core::object_keys;
use mindwell_instruments::error::InstrumentError;
use mindwell_instruments::get_instrument;
use mindwell_instruments::scoring::AnswerSet;
use mindwell_storage::state::{load_record, save_record};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SubmitAssessment {
    /// `phq9`, `gad7`, `depression` or `anxiety`.
    pub instrument: String,
    /// One response value (0-3) per question, in question order.
    pub answers: Vec<u8>,
}

#[derive(Serialize)]
pub struct AssessmentResponse {
    pub record: AssessmentRecord,
    pub next_steps: Vec<&'static str>,
}

pub async fn create_assessment(
    State(state): State<AppState>,
    Json(req): Json<SubmitAssessment>,
) -> Result<Json<AssessmentResponse>, ApiError> {
    let instrument = get_instrument(&req.instrument)
        .ok_or_else(|| InstrumentError::UnknownInstrument(req.instrument.clone()))?;

    let answers = AnswerSet::from_values(&req.answers)?;
    let score = instrument.score(&answers)?;
    let classification = instrument.classify(score)?;

    let record = AssessmentRecord {
        id: Uuid::new_v4(),
        instrument: classification.instrument,
        score,
        max_score: classification.max_score,
        tier: classification.tier,
        risk_level: classification.level,
        label: classification.label.clone(),
        completed_at: jiff::Timestamp::now(),
    };
    save_record(
        &state.s3,
        &state.bucket,
        &object_keys::assessment(record.id),
        &record,
    )
    .await?;

    AuditEvent::new(
        AuditAction::AssessmentCompleted,
        "assessment",
        record.id.to_string(),
        Actor::Anonymous,
    )
    .with_details(json!({
        "instrument": record.instrument.id(),
        "risk_level": record.risk_level,
    }))
    .emit();

    Ok(Json(AssessmentResponse {
        next_steps: classification.next_steps().to_vec(),
        record,
    }))
}

pub async fn get_assessment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AssessmentRecord>, ApiError> {
    let (record, _) =
        load_record(&state.s3, &state.bucket, &object_keys::assessment(id)).await?;
    Ok(Json(record))
}
