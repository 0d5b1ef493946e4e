use std::sync::Arc;

use actix_web::http::header;
use actix_web::{HttpResponse, Responder, web};
use tracing::{debug, instrument};

use crate::errors::TinylinkError;
use crate::services::error_response;
use crate::storage::Repository;
use crate::utils::is_valid_code;

pub struct RedirectService;

impl RedirectService {
    #[instrument(skip(repository), fields(path = %path))]
    pub async fn handle_redirect(
        path: web::Path<String>,
        repository: web::Data<Arc<dyn Repository>>,
    ) -> impl Responder {
        let code = path.into_inner();

        // 非短码形状的路径不可能是短链接，不查库，直接走 catch-all 的 404
        if !is_valid_code(&code) {
            debug!("Path is not code-shaped, falling through: {}", code);
            return HttpResponse::NotFound().json(serde_json::json!({ "error": "Not found" }));
        }

        match repository.redirect_and_track(&code).await {
            Ok(target_url) => HttpResponse::Found()
                .insert_header((header::LOCATION, target_url))
                .finish(),
            Err(TinylinkError::NotFound(_)) => {
                debug!("Redirect link not found: {}", code);
                HttpResponse::NotFound().json(serde_json::json!({ "error": "Not found" }))
            }
            Err(e) => error_response(&e),
        }
    }
}
