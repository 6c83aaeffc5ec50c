use axum::Json;
use axum::extract::Path;
use serde::Serialize;

use mindwell_instruments::scoring::{ResponseOption, response_options};
use mindwell_instruments::{all_instruments, get_instrument};

use crate::error::ApiError;

#[derive(Serialize)]
pub struct InstrumentSummary {
    id: String,
    name: String,
    title: String,
    question_count: usize,
    max_score: u32,
}

#[derive(Serialize)]
pub struct InstrumentDetail {
    id: String,
    name: String,
    title: String,
    description: String,
    questions: Vec<String>,
    options: Vec<ResponseOption>,
    max_score: u32,
}

pub async fn list_instruments() -> Json<Vec<InstrumentSummary>> {
    let instruments: Vec<InstrumentSummary> = all_instruments()
        .iter()
        .map(|i| InstrumentSummary {
            id: i.id().to_string(),
            name: i.name().to_string(),
            title: i.title().to_string(),
            question_count: i.questions().len(),
            max_score: i.max_score(),
        })
        .collect();
    Json(instruments)
}

pub async fn get_instrument_detail(
    Path(id): Path<String>,
) -> Result<Json<InstrumentDetail>, ApiError> {
    let instrument = get_instrument(&id)
        .ok_or_else(|| ApiError::NotFound(format!("instrument not found: {id}")))?;

    Ok(Json(InstrumentDetail {
        id: instrument.id().to_string(),
        name: instrument.name().to_string(),
        title: instrument.title().to_string(),
        description: instrument.description().to_string(),
        questions: instrument.questions().iter().map(|q| q.to_string()).collect(),
        options: response_options().to_vec(),
        max_score: instrument.max_score(),
    }))
}
