pub mod health;
pub mod services;
pub mod workers;

use actix_web::{HttpResponse, error, web};

use crate::models::ApiResponse;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // Malformed query strings and path segments get the same envelope as
    // every other failure.
    cfg.app_data(web::QueryConfig::default().error_handler(|err, _req| {
        bad_request(format!("Invalid query: {err}"), err)
    }));
    cfg.app_data(web::PathConfig::default().error_handler(|err, _req| {
        bad_request(format!("Invalid path: {err}"), err)
    }));

    cfg.route("/health", web::get().to(health::health));

    // ── Worker routes ──
    cfg.service(
        web::scope("/workers")
            .route("", web::get().to(workers::get_workers))
            .route("/{id}", web::get().to(workers::get_worker)),
    );

    // ── Service routes ──
    cfg.service(web::resource("/services").route(web::get().to(services::get_services)));
}

fn bad_request<E>(message: String, cause: E) -> actix_web::Error
where
    E: std::fmt::Debug + std::fmt::Display + 'static,
{
    error::InternalError::from_response(
        cause,
        HttpResponse::BadRequest().json(ApiResponse::failure(message)),
    )
    .into()
}
