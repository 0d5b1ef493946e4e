pub mod admin;
pub mod health;
pub mod redirect;

pub use admin::AdminService;
pub use health::HealthService;
pub use redirect::RedirectService;

use actix_web::{HttpResponse, web};
use tracing::error;

use crate::errors::TinylinkError;

/// Register every route of the service.
///
/// Order matters: `/healthz` and the `/api` scope must be tried before the
/// single-segment `/{code}` redirect route; everything else lands on the
/// JSON 404 catch-all.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/healthz", web::get().to(HealthService::health_check))
        .service(
            web::scope("/api")
                .route("/links", web::get().to(AdminService::get_all_links))
                .route("/links", web::post().to(AdminService::post_link))
                .route("/links/{code}", web::get().to(AdminService::get_link))
                .route("/links/{code}", web::delete().to(AdminService::delete_link)),
        )
        .route("/{code}", web::get().to(RedirectService::handle_redirect))
        .default_service(web::route().to(fallback_not_found));
}

/// Map a crate error to its HTTP response.
///
/// Storage failures are logged here, before the response is written; clients
/// only ever see a short machine-readable message.
pub fn error_response(err: &TinylinkError) -> HttpResponse {
    match err {
        TinylinkError::Validation(msg) => {
            HttpResponse::BadRequest().json(serde_json::json!({ "error": msg }))
        }
        TinylinkError::Duplicate(_) => {
            HttpResponse::Conflict().json(serde_json::json!({ "error": "Code already exists" }))
        }
        TinylinkError::NotFound(_) => {
            HttpResponse::NotFound().json(serde_json::json!({ "error": "Not found" }))
        }
        _ => {
            error!("storage error [{}]: {}", err.code(), err.message());
            HttpResponse::InternalServerError()
                .json(serde_json::json!({ "error": "Internal server error" }))
        }
    }
}

/// Catch-all for unmatched routes.
pub async fn fallback_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "Not found" }))
}
