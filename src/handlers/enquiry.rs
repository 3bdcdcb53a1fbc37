use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use super::validation_failure;
use crate::error::ErrorResponse;
use crate::models::booking::EnquiryRequest;
use crate::notify::EnquiryNotifier;

pub async fn submit_enquiry(
    notifier: web::Data<dyn EnquiryNotifier>,
    body: web::Json<EnquiryRequest>,
) -> impl Responder {
    if let Err(e) = body.validate() {
        return validation_failure(&e);
    }

    match notifier.notify(&body) {
        Ok(()) => HttpResponse::Created().json(serde_json::json!({
            "message": "Enquiry submitted successfully"
        })),
        Err(e) => {
            log::error!("{e}");
            HttpResponse::InternalServerError().json(ErrorResponse::new("Failed to send enquiry"))
        }
    }
}
