use actix_web::{HttpResponse, Responder};
use serde_json::json;

/// Liveness probe, no auth.
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Server is running", body = Object, example = json!({
            "success": true,
            "status": "OK",
            "message": "Server is running"
        }))
    ),
    tag = "Health"
)]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "success": true,
        "status": "OK",
        "message": "Server is running"
    }))
}
