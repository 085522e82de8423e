// src/api/routes.rs
use actix_web::web;

use super::handlers;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/health", web::get().to(handlers::health_check))
            .route("/analyze", web::post().to(handlers::analyze))
            .service(
                web::scope("/analysis")
                    .route("", web::get().to(handlers::get_analysis))
                    .route("/reset", web::post().to(handlers::reset_analysis)),
            ),
    );
}
