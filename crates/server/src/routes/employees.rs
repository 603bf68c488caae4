use axum::{
    extract::{Path, State},
    routing::{delete, get, put},
    Json, Router,
};
use axum_extra::extract::WithRejection;
use common::types::Message;
use models::employee::Employee;
use tracing::info;

use crate::errors::JsonApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/employees", get(list_employees).post(create_employee))
        .route("/employee/:id", get(get_employee))
        .route("/update_employee/:id", put(update_employee))
        .route("/delete_employee/:id", delete(delete_employee))
}

#[utoipa::path(get, path = "/employees", tag = "employees", responses((status = 200, description = "All employees", body = [crate::openapi::EmployeeDoc])))]
pub async fn list_employees(State(state): State<AppState>) -> Result<Json<Vec<Employee>>, JsonApiError> {
    Ok(Json(state.employees.list().await?))
}

#[utoipa::path(get, path = "/employee/{id}", tag = "employees", params(("id" = i64, Path, description = "Employee id")), responses((status = 200, description = "OK", body = crate::openapi::EmployeeDoc), (status = 404, description = "Not Found")))]
pub async fn get_employee(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, JsonApiError>,
) -> Result<Json<Employee>, JsonApiError> {
    Ok(Json(state.employees.get(id).await?))
}

#[utoipa::path(post, path = "/employees", tag = "employees", request_body = crate::openapi::EmployeeDoc, responses((status = 200, description = "Created", body = crate::openapi::EmployeeDoc), (status = 400, description = "Duplicate id or invalid fields")))]
pub async fn create_employee(
    State(state): State<AppState>,
    WithRejection(Json(employee), _): WithRejection<Json<Employee>, JsonApiError>,
) -> Result<Json<Employee>, JsonApiError> {
    let created = state.employees.create(employee).await?;
    info!(id = created.id, department = %created.department, "created employee");
    Ok(Json(created))
}

#[utoipa::path(put, path = "/update_employee/{id}", tag = "employees", params(("id" = i64, Path, description = "Employee id")), request_body = crate::openapi::EmployeeDoc, responses((status = 200, description = "Replaced", body = crate::openapi::EmployeeDoc), (status = 400, description = "Body id differs from path id"), (status = 404, description = "Not Found")))]
pub async fn update_employee(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, JsonApiError>,
    WithRejection(Json(employee), _): WithRejection<Json<Employee>, JsonApiError>,
) -> Result<Json<Employee>, JsonApiError> {
    Ok(Json(state.employees.replace(id, employee).await?))
}

#[utoipa::path(delete, path = "/delete_employee/{id}", tag = "employees", params(("id" = i64, Path, description = "Employee id")), responses((status = 200, description = "Deleted", body = crate::openapi::MessageDoc), (status = 404, description = "Not Found")))]
pub async fn delete_employee(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, JsonApiError>,
) -> Result<Json<Message>, JsonApiError> {
    state.employees.delete(id).await?;
    info!(id, "deleted employee");
    Ok(Json(Message::new("Employee deleted")))
}
