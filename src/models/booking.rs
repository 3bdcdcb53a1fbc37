use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::error::StorageError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Booking {
    #[sqlx(rename = "Bookingid")]
    pub id: i64,
    #[sqlx(rename = "Name")]
    pub name: String,
    #[sqlx(rename = "Phone")]
    pub phone: String,
    #[sqlx(rename = "Email")]
    pub email: Option<String>,
    #[sqlx(rename = "ArrivalDate")]
    pub arrival_date: NaiveDate,
    #[sqlx(rename = "DepartureDate")]
    pub departure_date: NaiveDate,
    #[sqlx(rename = "Notes")]
    pub notes: Option<String>,
}

/// Payload for a new stay. Missing text fields deserialize as empty and are
/// rejected by validation rather than by the JSON extractor.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewBooking {
    #[serde(default)]
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "phone is required"))]
    pub phone: String,
    #[validate(required(message = "arrival_date is required"))]
    pub arrival_date: Option<NaiveDate>,
    #[validate(required(message = "departure_date is required"))]
    pub departure_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl NewBooking {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        arrival_date: NaiveDate,
        departure_date: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            arrival_date: Some(arrival_date),
            departure_date: Some(departure_date),
            notes: None,
            email: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Minimal check applied by the store itself, independent of the HTTP
    /// layer. Returns the stay dates on success.
    pub(crate) fn required_dates(&self) -> Result<(NaiveDate, NaiveDate), StorageError> {
        if self.name.is_empty() {
            return Err(StorageError::Validation { field: "name" });
        }
        if self.phone.is_empty() {
            return Err(StorageError::Validation { field: "phone" });
        }
        let arrival = self
            .arrival_date
            .ok_or(StorageError::Validation { field: "arrival_date" })?;
        let departure = self
            .departure_date
            .ok_or(StorageError::Validation { field: "departure_date" })?;
        Ok((arrival, departure))
    }
}

/// Body of a create request. The admin page sends the passcode alongside the
/// booking fields.
#[derive(Debug, Deserialize)]
pub struct CreateBooking {
    #[serde(flatten)]
    pub booking: NewBooking,
    #[serde(default)]
    pub auth_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BookingFilter {
    pub after_date: Option<NaiveDate>,
}

/// Public enquiry form, forwarded to the property owner.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct EnquiryRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,
    pub phone: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, message = "checkin is required"))]
    pub checkin: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "checkout is required"))]
    pub checkout: String,
    pub message: Option<String>,
}
