use actix_web::{HttpResponse, Responder};

use crate::models::ApiResponse;

/// GET /api/health — liveness probe.
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(ApiResponse::ok(serde_json::json!({ "status": "ok" })))
}
