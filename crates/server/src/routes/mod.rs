use axum::{routing::get, Json, Router};
use common::types::{Health, Message};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod employees;
pub mod patients;
pub mod products;

#[utoipa::path(get, path = "/", tag = "meta", responses((status = 200, description = "Service banner", body = crate::openapi::MessageDoc)))]
pub async fn home() -> Json<Message> {
    Json(Message::new("Record services API: products, patients, employees"))
}

#[utoipa::path(get, path = "/about", tag = "meta", responses((status = 200, description = "About", body = crate::openapi::MessageDoc)))]
pub async fn about() -> Json<Message> {
    Json(Message::new("A fully functional API to manage products, patient records and employees"))
}

#[utoipa::path(get, path = "/health", tag = "meta", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(crate::openapi::OPENAPI.clone())
}

/// Build the full application router: meta routes plus one group per record variant
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let meta = Router::new()
        .route("/", get(home))
        .route("/about", get(about))
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json));

    Router::new()
        .merge(products::router())
        .merge(patients::router())
        .merge(employees::router())
        .with_state(state)
        .merge(meta)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时打点，包含状态码与耗时
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
