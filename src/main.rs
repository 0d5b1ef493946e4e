use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use tracing::info;

use tinylink::config;
use tinylink::services::configure_routes;
use tinylink::storage::RepositoryFactory;
use tinylink::system::logging::init_logging;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    let config = config::init_config();
    let _log_guard = init_logging(config);

    let repository = RepositoryFactory::create()
        .await
        .map_err(|e| std::io::Error::other(e.format_simple()))?;
    info!("Using storage backend: {}", repository.backend_name());

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    info!(
        "TinyLink listening on http://{} (base url: {})",
        bind_address, config.server.base_url
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(web::Data::new(repository.clone()))
            .configure(configure_routes)
    })
    .bind(bind_address)?
    .run()
    .await
}
