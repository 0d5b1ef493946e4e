use std::sync::Arc;

use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::get_config;
use crate::services::error_response;
use crate::storage::Repository;
use crate::utils::{generate_random_code, is_valid_code};
use crate::utils::url_validator::validate_url;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PostNewLink {
    pub target_url: String,
    pub code: Option<String>,
}

pub struct AdminService;

impl AdminService {
    pub async fn get_all_links(repository: web::Data<Arc<dyn Repository>>) -> impl Responder {
        info!("Admin API: request to list all links");

        match repository.list().await {
            Ok(links) => {
                info!("Admin API: returning {} links", links.len());
                HttpResponse::Ok()
                    .append_header(("Content-Type", "application/json; charset=utf-8"))
                    .json(links)
            }
            Err(e) => error_response(&e),
        }
    }

    pub async fn post_link(
        payload: web::Json<PostNewLink>,
        repository: web::Data<Arc<dyn Repository>>,
    ) -> impl Responder {
        if let Err(e) = validate_url(&payload.target_url) {
            info!("Admin API: rejected target_url: {}", e);
            return HttpResponse::BadRequest()
                .json(serde_json::json!({ "error": "Invalid or missing target_url" }));
        }

        let code = match payload.code.as_deref() {
            Some(code) if !code.is_empty() => {
                if !is_valid_code(code) {
                    info!("Admin API: rejected code shape: {}", code);
                    return HttpResponse::BadRequest().json(
                        serde_json::json!({ "error": "Code must match [A-Za-z0-9]{6,8}" }),
                    );
                }
                code.to_string()
            }
            _ => {
                debug!("Admin API: no code provided, generating a new one");
                generate_random_code(get_config().random_code_length)
            }
        };

        info!(
            "Admin API: create link request - code: {}, target: {}",
            code, payload.target_url
        );

        match repository.insert(&code, &payload.target_url).await {
            Ok(link) => {
                info!("Admin API: link created - {}", link.code);
                HttpResponse::Created()
                    .append_header(("Content-Type", "application/json; charset=utf-8"))
                    .json(link)
            }
            Err(e) => error_response(&e),
        }
    }

    pub async fn get_link(
        code: web::Path<String>,
        repository: web::Data<Arc<dyn Repository>>,
    ) -> impl Responder {
        info!("Admin API: get link request - code: {}", code);

        match repository.get(&code).await {
            Ok(link) => HttpResponse::Ok()
                .append_header(("Content-Type", "application/json; charset=utf-8"))
                .json(link),
            Err(e) => error_response(&e),
        }
    }

    pub async fn delete_link(
        code: web::Path<String>,
        repository: web::Data<Arc<dyn Repository>>,
    ) -> impl Responder {
        info!("Admin API: delete link request - code: {}", code);

        match repository.remove(&code).await {
            Ok(()) => {
                info!("Admin API: link deleted - {}", code);
                HttpResponse::NoContent().finish()
            }
            Err(e) => error_response(&e),
        }
    }
}
