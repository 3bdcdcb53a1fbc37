pub mod bookings;
pub mod enquiry;

use actix_web::{error, web, HttpResponse};
use validator::ValidationErrors;

use crate::error::ErrorResponse;

/// 400 naming every field that failed validation, in a stable order.
pub(crate) fn validation_failure(errors: &ValidationErrors) -> HttpResponse {
    let mut fields: Vec<String> = errors
        .field_errors()
        .keys()
        .map(|field| field.to_string())
        .collect();
    fields.sort();
    HttpResponse::BadRequest().json(ErrorResponse::new(format!(
        "Missing required fields: {}",
        fields.join(", ")
    )))
}

/// Register the `/api` routes and the JSON/query rejection bodies.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        let body = ErrorResponse::new(format!("Invalid request body: {err}"));
        error::InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        let body = ErrorResponse::new(format!("Invalid query string: {err}"));
        error::InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    }))
    .service(
        web::scope("/api")
            .route("/booked-dates", web::get().to(bookings::get_booked_dates))
            .route("/make-booking", web::post().to(bookings::make_booking))
            .route(
                "/remove-booking/{id}",
                web::delete().to(bookings::remove_booking),
            )
            .route("/all-bookings", web::get().to(bookings::get_all_bookings))
            .route("/all-bookings", web::post().to(bookings::get_all_bookings))
            .route("/bookings/{id}", web::get().to(bookings::get_booking))
            .route("/enquiry", web::post().to(enquiry::submit_enquiry)),
    );
}
