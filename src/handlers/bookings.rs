use actix_web::{web, HttpRequest, HttpResponse, Responder, ResponseError};
use validator::Validate;

use super::validation_failure;
use crate::auth::{self, Authorized, BodyToken};
use crate::availability;
use crate::db::Storage;
use crate::error::{ErrorResponse, StorageError};
use crate::models::booking::{BookingFilter, CreateBooking};

fn storage_failure(context: &str, err: StorageError) -> HttpResponse {
    log::error!("{context}: {err}");
    match err {
        StorageError::Validation { field } => {
            HttpResponse::BadRequest().json(ErrorResponse::new(format!("Missing required field: {field}")))
        }
        StorageError::Unavailable(_) => {
            HttpResponse::ServiceUnavailable().json(ErrorResponse::new("Storage unavailable"))
        }
        StorageError::Query(_) => {
            HttpResponse::InternalServerError().json(ErrorResponse::new("Database error"))
        }
    }
}

pub async fn get_booked_dates(storage: web::Data<Storage>) -> impl Responder {
    match storage.list_booked_ranges().await {
        Ok(ranges) => HttpResponse::Ok().json(serde_json::json!({
            "booked_dates": availability::expand(ranges)
        })),
        Err(e) => storage_failure("Failed to list booked dates", e),
    }
}

fn body_token(body: &Option<web::Json<BodyToken>>) -> Option<&str> {
    body.as_ref().and_then(|b| b.auth_token.as_deref())
}

pub async fn make_booking(
    req: HttpRequest,
    storage: web::Data<Storage>,
    body: web::Json<CreateBooking>,
) -> impl Responder {
    if let Err(e) = auth::authorize(&req, body.auth_token.as_deref()) {
        return e.error_response();
    }

    let booking = &body.booking;
    if let Err(e) = booking.validate() {
        return validation_failure(&e);
    }

    match storage.create_booking(booking).await {
        Ok(id) => {
            log::info!("booking {id} created for {}", booking.name);
            HttpResponse::Created().json(serde_json::json!({
                "message": "Booking created successfully",
                "id": id
            }))
        }
        Err(e) => storage_failure("Failed to create booking", e),
    }
}

/// The passcode may come in a header or in an optional `{"auth_token"}` body.
pub async fn remove_booking(
    req: HttpRequest,
    storage: web::Data<Storage>,
    path: web::Path<i64>,
    body: Option<web::Json<BodyToken>>,
) -> impl Responder {
    if let Err(e) = auth::authorize(&req, body_token(&body)) {
        return e.error_response();
    }
    let id = path.into_inner();

    match storage.remove_booking(id).await {
        Ok(()) => {
            log::info!("booking {id} removed");
            HttpResponse::Ok().json(serde_json::json!({
                "message": "Booking removed successfully"
            }))
        }
        Err(e) => storage_failure("Failed to remove booking", e),
    }
}

pub async fn get_all_bookings(
    req: HttpRequest,
    storage: web::Data<Storage>,
    params: web::Query<BookingFilter>,
    body: Option<web::Json<BodyToken>>,
) -> impl Responder {
    if let Err(e) = auth::authorize(&req, body_token(&body)) {
        return e.error_response();
    }

    match storage.list_bookings(params.after_date).await {
        Ok(bookings) => HttpResponse::Ok().json(serde_json::json!({ "bookings": bookings })),
        Err(e) => storage_failure("Failed to list bookings", e),
    }
}

pub async fn get_booking(
    _auth: Authorized,
    storage: web::Data<Storage>,
    path: web::Path<i64>,
) -> impl Responder {
    let id = path.into_inner();

    match storage.get_booking(id).await {
        Ok(Some(booking)) => HttpResponse::Ok().json(booking),
        Ok(None) => HttpResponse::NotFound().json(ErrorResponse::new("Booking not found")),
        Err(e) => storage_failure("Failed to fetch booking", e),
    }
}
