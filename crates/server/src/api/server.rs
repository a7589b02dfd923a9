use crate::api::routes::appointments::appointments_routes;
use crate::api::routes::hospitals::hospitals_routes;
use crate::store::core::StoreContext;
use actix_web::middleware::{Compress, NormalizePath, TrailingSlash};
use actix_web::{middleware, web, web::Data, App, HttpResponse, HttpServer};
use anyhow::Error;
use log::info;
use serde_json::json;
use shared::security::rate_limit_middleware::RateLimiter;
use shared::security::sanitize_middleware::SanitizeRequest;
use shared::security::security_headers_middleware::SecurityHeaders;
use std::sync::Arc;

const MAX_PAYLOAD_SIZE: usize = 1024 * 1024;

pub struct AppState {
    pub store_context: Arc<StoreContext>,
}

pub async fn start_server(
    host: &str,
    port: u16,
    store_context: Arc<StoreContext>,
    rate_limiter: RateLimiter,
) -> Result<(), Error> {
    info!("Starting server at http://{host}:{port}");
    let app_state = Data::new(AppState { store_context });

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .wrap(Compress::default())
            .wrap(NormalizePath::new(TrailingSlash::Trim))
            .wrap(SecurityHeaders)
            .wrap(SanitizeRequest::new(MAX_PAYLOAD_SIZE))
            // Outermost: over-limit clients are rejected before any other work.
            .wrap(rate_limiter.clone())
            .app_data(web::PayloadConfig::default().limit(MAX_PAYLOAD_SIZE))
            .service(hospitals_routes())
            .service(appointments_routes())
            .default_service(web::route().to(|| async {
                HttpResponse::NotFound().json(json!({
                    "success": false,
                    "error": "Resource not found"
                }))
            }))
    })
    .bind((host, port))?
    .run()
    .await?;
    Ok(())
}
