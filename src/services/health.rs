use actix_web::{HttpResponse, Responder};
use serde_json::json;
use tracing::trace;

pub struct HealthService;

impl HealthService {
    pub async fn health_check() -> impl Responder {
        trace!("Received health check request");

        HttpResponse::Ok()
            .append_header(("Content-Type", "application/json; charset=utf-8"))
            .json(json!({
                "ok": true,
                "version": env!("CARGO_PKG_VERSION"),
            }))
    }
}
