use axum::Json;
use axum::extract::Path;
use axum::extract::rejection::{JsonRejection, PathRejection};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use pneumo_core::models::patient::PatientContext;
use pneumo_forms::catalog::Section;
use pneumo_forms::display::DisplayConfig;
use pneumo_forms::engine::FormEngine;
use pneumo_forms::schema::ValidatedRecord;
use pneumo_forms::state::FormState;
use pneumo_forms::view::FormView;
use pneumo_forms::visibility::VisibilityMap;
use pneumo_forms::{Pathology, all_pathologies, get_pathology};

use crate::error::ApiError;

#[derive(Serialize)]
pub struct PathologySummary {
    id: String,
    name: String,
}

#[derive(Serialize)]
pub struct PathologyDetail {
    id: String,
    name: String,
    sections: Vec<Section>,
    display: DisplayConfig,
}

#[derive(Deserialize)]
pub struct EvaluateRequest {
    #[serde(default)]
    pub state: Value,
    #[serde(default)]
    pub patient: Option<PatientContext>,
}

#[derive(Serialize)]
pub struct EvaluateResponse {
    visibility: VisibilityMap,
    view: FormView,
}

pub(crate) fn find_pathology(id: &str) -> Result<Box<dyn Pathology>, ApiError> {
    get_pathology(id).ok_or_else(|| ApiError::NotFound(format!("pathology not found: {id}")))
}

pub async fn list_pathologies() -> Json<Vec<PathologySummary>> {
    let pathologies: Vec<PathologySummary> = all_pathologies()
        .iter()
        .map(|p| PathologySummary {
            id: p.id().to_string(),
            name: p.name().to_string(),
        })
        .collect();
    Json(pathologies)
}

pub async fn get_pathology_detail(
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<PathologyDetail>, ApiError> {
    let Path(id) = path?;
    let pathology = find_pathology(&id)?;

    Ok(Json(PathologyDetail {
        id: pathology.id().to_string(),
        name: pathology.name().to_string(),
        sections: pathology.catalog().sections().to_vec(),
        display: pathology.display().clone(),
    }))
}

/// Compute visibility and the render tree for an in-progress form state.
pub async fn evaluate(
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<EvaluateRequest>, JsonRejection>,
) -> Result<Json<EvaluateResponse>, ApiError> {
    let Path(id) = path?;
    let Json(req) = body?;
    let pathology = find_pathology(&id)?;
    let state = FormState::from_value(req.state)?;
    let engine = FormEngine::from_state(pathology.catalog(), req.patient, state);

    Ok(Json(EvaluateResponse {
        visibility: engine.visibility().clone(),
        view: engine.view(),
    }))
}

/// Run the schema validator without saving anything.
pub async fn validate(
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ValidatedRecord>, ApiError> {
    let Path(id) = path?;
    let Json(body) = body?;
    let pathology = find_pathology(&id)?;
    Ok(Json(pathology.validate(&body)?))
}
