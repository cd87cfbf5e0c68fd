use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use pneumo_core::models::record::PathologyRecord;
use pneumo_export::docx::generate_docx;
use pneumo_export::render::render_summary;
use pneumo_export::summary::{Summary, SummaryOptions, build_summary};
use pneumo_forms::Pathology;

use crate::error::ApiError;
use crate::routes::pathologies::find_pathology;
use crate::state::AppState;

const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Serialize)]
pub struct SummaryResponse {
    summary: Summary,
    markdown: String,
}

pub async fn get_record(
    State(state): State<AppState>,
    path: Result<Path<(Uuid, String)>, PathRejection>,
) -> Result<Json<PathologyRecord>, ApiError> {
    let Path((patient_id, id)) = path?;
    let pathology = find_pathology(&id)?;
    let record = load_record(&state, patient_id, pathology.id()).await?;
    Ok(Json(record))
}

/// Validate a submitted form and store it as the patient's record for this pathology.
pub async fn save_record(
    State(state): State<AppState>,
    path: Result<Path<(Uuid, String)>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<PathologyRecord>, ApiError> {
    let Path((patient_id, id)) = path?;
    let Json(body) = body?;
    let pathology = find_pathology(&id)?;
    let validated = pathology.validate(&body)?;

    let record = state
        .records
        .lock()
        .await
        .upsert(patient_id, pathology.id(), validated.to_value());
    Ok(Json(record))
}

pub async fn get_summary(
    State(state): State<AppState>,
    path: Result<Path<(Uuid, String)>, PathRejection>,
    query: Result<Query<SummaryOptions>, QueryRejection>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let Path((patient_id, id)) = path?;
    let Query(options) = query?;
    let summary = load_summary(&state, patient_id, &id, &options).await?;
    let markdown = render_summary(&summary)?;
    Ok(Json(SummaryResponse { summary, markdown }))
}

pub async fn export_summary_docx(
    State(state): State<AppState>,
    path: Result<Path<(Uuid, String)>, PathRejection>,
    query: Result<Query<SummaryOptions>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path((patient_id, id)) = path?;
    let Query(options) = query?;
    let summary = load_summary(&state, patient_id, &id, &options).await?;
    let bytes = generate_docx(&summary)?;
    Ok(([(header::CONTENT_TYPE, DOCX_CONTENT_TYPE)], bytes))
}

async fn load_record(
    state: &AppState,
    patient_id: Uuid,
    pathology_id: &str,
) -> Result<PathologyRecord, ApiError> {
    state
        .records
        .lock()
        .await
        .get(patient_id, pathology_id)
        .cloned()
        .ok_or_else(|| {
            ApiError::NotFound(format!(
                "no {pathology_id} record for patient {patient_id}"
            ))
        })
}

async fn load_summary(
    state: &AppState,
    patient_id: Uuid,
    id: &str,
    options: &SummaryOptions,
) -> Result<Summary, ApiError> {
    let pathology = find_pathology(id)?;
    let record = load_record(state, patient_id, pathology.id()).await?;
    Ok(build_summary(
        pathology.name(),
        pathology.display(),
        &record.data,
        options,
    ))
}
