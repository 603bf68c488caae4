use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use axum_extra::extract::WithRejection;
use common::types::Message;
use models::patient::{Patient, PatientUpdate, PatientView};
use serde::Deserialize;
use tracing::info;

use crate::errors::JsonApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SortQuery {
    pub sort_by: String,
    #[serde(default = "default_order")]
    pub order: String,
}

fn default_order() -> String {
    "asc".to_string()
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/view", get(view_patients))
        .route("/patient/:id", get(get_patient))
        .route("/sort", get(sort_patients))
        .route("/create", post(create_patient))
        .route("/edit/:id", put(edit_patient))
        .route("/delete/:id", delete(delete_patient))
}

#[utoipa::path(get, path = "/view", tag = "patients", responses((status = 200, description = "All patients in insertion order", body = [crate::openapi::PatientViewDoc])))]
pub async fn view_patients(State(state): State<AppState>) -> Result<Json<Vec<PatientView>>, JsonApiError> {
    let items: Vec<PatientView> = state.patients.list().await?.into_iter().map(Patient::view).collect();
    info!(count = items.len(), "list patients");
    Ok(Json(items))
}

#[utoipa::path(get, path = "/patient/{id}", tag = "patients", params(("id" = String, Path, description = "Patient id, e.g. P001")), responses((status = 200, description = "OK", body = crate::openapi::PatientViewDoc), (status = 404, description = "Not Found")))]
pub async fn get_patient(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<String>, JsonApiError>,
) -> Result<Json<PatientView>, JsonApiError> {
    Ok(Json(state.patients.get(&id).await?.view()))
}

#[utoipa::path(get, path = "/sort", tag = "patients", params(("sort_by" = String, Query, description = "height, weight or bmi"), ("order" = Option<String>, Query, description = "asc (default) or desc")), responses((status = 200, description = "Sorted patients", body = [crate::openapi::PatientViewDoc]), (status = 400, description = "Invalid field or order")))]
pub async fn sort_patients(
    State(state): State<AppState>,
    WithRejection(Query(q), _): WithRejection<Query<SortQuery>, JsonApiError>,
) -> Result<Json<Vec<PatientView>>, JsonApiError> {
    let sorted = state.patients.sort(&q.sort_by, &q.order).await?;
    Ok(Json(sorted.into_iter().map(Patient::view).collect()))
}

#[utoipa::path(post, path = "/create", tag = "patients", request_body = crate::openapi::PatientDoc, responses((status = 201, description = "Created", body = crate::openapi::MessageDoc), (status = 400, description = "Duplicate id or invalid fields")))]
pub async fn create_patient(
    State(state): State<AppState>,
    WithRejection(Json(patient), _): WithRejection<Json<Patient>, JsonApiError>,
) -> Result<(StatusCode, Json<Message>), JsonApiError> {
    let created = state.patients.create(patient).await?;
    info!(id = %created.id, "created patient");
    Ok((StatusCode::CREATED, Json(Message::new("Patient created successfully"))))
}

/// 仅覆盖请求体中出现的字段
#[utoipa::path(put, path = "/edit/{id}", tag = "patients", params(("id" = String, Path, description = "Patient id")), request_body = crate::openapi::PatientUpdateDoc, responses((status = 200, description = "Updated", body = crate::openapi::MessageDoc), (status = 404, description = "Not Found")))]
pub async fn edit_patient(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<String>, JsonApiError>,
    WithRejection(Json(patch), _): WithRejection<Json<PatientUpdate>, JsonApiError>,
) -> Result<Json<Message>, JsonApiError> {
    state.patients.merge(&id, patch).await?;
    Ok(Json(Message::new("Patient details updated successfully")))
}

#[utoipa::path(delete, path = "/delete/{id}", tag = "patients", params(("id" = String, Path, description = "Patient id")), responses((status = 200, description = "Deleted", body = crate::openapi::MessageDoc), (status = 404, description = "Not Found")))]
pub async fn delete_patient(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<String>, JsonApiError>,
) -> Result<Json<Message>, JsonApiError> {
    state.patients.delete(&id).await?;
    info!(id = %id, "deleted patient");
    Ok(Json(Message::new("Patient deleted")))
}
