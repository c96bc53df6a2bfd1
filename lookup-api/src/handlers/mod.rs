pub mod contacts;
pub mod method;

use actix_web::{error::InternalError, web, HttpResponse};
use shared_types::ErrorResponse;

/// Rejected query strings and bodies answer with the same JSON error shape
/// as the handlers themselves.
fn bad_request<E: std::fmt::Display + std::fmt::Debug + 'static>(err: E) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(ErrorResponse {
        error: format!("Malformed input: {}", err),
    });
    InternalError::from_response(err, response).into()
}

/// Routes shared by the server and the handler tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(|err, _req| bad_request(err)))
        .app_data(web::JsonConfig::default().error_handler(|err, _req| bad_request(err)))
        .route(
            "/api/method/get_contact_list",
            web::get().to(method::get_contact_list),
        )
        .route(
            "/api/method/get_contact_list",
            web::post().to(method::post_contact_list),
        )
        .route("/api/contacts", web::post().to(contacts::create_contact))
        .route("/api/contacts/{id}", web::get().to(contacts::get_contact));
}
