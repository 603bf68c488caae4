use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::WithRejection;
use common::types::Message;
use models::product::Product;
use serde::Deserialize;
use tracing::info;

use crate::errors::JsonApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: i32,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products))
        .route("/product/:id", get(get_product))
        .route("/product", post(create_product).put(update_product).delete(delete_product))
}

#[utoipa::path(get, path = "/products", tag = "products", responses((status = 200, description = "All products ordered by id", body = [crate::openapi::ProductDoc])))]
pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>, JsonApiError> {
    let items = state.products.list().await?;
    info!(count = items.len(), "list products");
    Ok(Json(items))
}

#[utoipa::path(get, path = "/product/{id}", tag = "products", params(("id" = i32, Path, description = "Product id")), responses((status = 200, description = "OK", body = crate::openapi::ProductDoc), (status = 404, description = "Not Found")))]
pub async fn get_product(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, JsonApiError>,
) -> Result<Json<Product>, JsonApiError> {
    Ok(Json(state.products.get(id).await?))
}

#[utoipa::path(post, path = "/product", tag = "products", request_body = crate::openapi::ProductDoc, responses((status = 200, description = "Created", body = crate::openapi::ProductDoc), (status = 400, description = "Bad Request")))]
pub async fn create_product(
    State(state): State<AppState>,
    WithRejection(Json(product), _): WithRejection<Json<Product>, JsonApiError>,
) -> Result<Json<Product>, JsonApiError> {
    let created = state.products.create(product).await?;
    info!(id = created.id, name = %created.name, "created product");
    Ok(Json(created))
}

/// 按查询参数 id 整体替换商品，请求体中的 id 会被忽略
#[utoipa::path(put, path = "/product", tag = "products", params(("id" = i32, Query, description = "Product id")), request_body = crate::openapi::ProductDoc, responses((status = 200, description = "Updated", body = crate::openapi::ProductDoc), (status = 404, description = "Not Found")))]
pub async fn update_product(
    State(state): State<AppState>,
    WithRejection(Query(q), _): WithRejection<Query<IdQuery>, JsonApiError>,
    WithRejection(Json(product), _): WithRejection<Json<Product>, JsonApiError>,
) -> Result<Json<Product>, JsonApiError> {
    let updated = state.products.replace(q.id, product).await?;
    info!(id = updated.id, "updated product");
    Ok(Json(updated))
}

#[utoipa::path(delete, path = "/product", tag = "products", params(("id" = i32, Query, description = "Product id")), responses((status = 200, description = "Deleted", body = crate::openapi::MessageDoc), (status = 404, description = "Not Found")))]
pub async fn delete_product(
    State(state): State<AppState>,
    WithRejection(Query(q), _): WithRejection<Query<IdQuery>, JsonApiError>,
) -> Result<Json<Message>, JsonApiError> {
    state.products.delete(q.id).await?;
    info!(id = q.id, "deleted product");
    Ok(Json(Message::new("product deleted")))
}
