//! Passcode gate for the admin endpoints.

use std::future::{ready, Ready};

use actix_web::http::header::AUTHORIZATION;
use actix_web::http::StatusCode;
use actix_web::{dev::Payload, web, FromRequest, HttpRequest, HttpResponse, ResponseError};
use serde::Deserialize;
use thiserror::Error;

use crate::error::ErrorResponse;

pub const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

/// Decides whether a presented credential grants access.
pub trait CredentialCheck: Send + Sync {
    fn verify(&self, credential: &str) -> bool;
}

/// A single passcode shared by every administrator.
#[derive(Clone)]
pub struct SharedSecret {
    passcode: String,
}

impl SharedSecret {
    pub fn new(passcode: impl Into<String>) -> Self {
        Self {
            passcode: passcode.into(),
        }
    }
}

impl std::fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedSecret").finish_non_exhaustive()
    }
}

impl CredentialCheck for SharedSecret {
    fn verify(&self, credential: &str) -> bool {
        constant_time_eq(self.passcode.as_bytes(), credential.as_bytes())
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("no credential check configured")]
    NotConfigured,
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Unauthorized => StatusCode::UNAUTHORIZED,
            AuthError::NotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse::new(self.to_string()))
    }
}

/// Passcode sent inside a JSON request body, the way the admin page sends it.
#[derive(Debug, Default, Deserialize)]
pub struct BodyToken {
    #[serde(default)]
    pub auth_token: Option<String>,
}

/// Extractor that only succeeds when the request headers carry a valid
/// passcode, either as `Authorization: Bearer <passcode>` or in `X-Auth-Token`.
#[derive(Debug)]
pub struct Authorized;

impl FromRequest for Authorized {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(authorize(req, None))
    }
}

/// Grant access when any presented passcode passes the configured check.
/// Headers are tried first, then `body_token`.
pub fn authorize(req: &HttpRequest, body_token: Option<&str>) -> Result<Authorized, AuthError> {
    let Some(check) = req.app_data::<web::Data<dyn CredentialCheck>>() else {
        log::error!("protected route reached without a credential check");
        return Err(AuthError::NotConfigured);
    };

    if presented_credentials(req, body_token).any(|credential| check.verify(credential)) {
        Ok(Authorized)
    } else {
        log::warn!("rejected unauthorized request to {}", req.path());
        Err(AuthError::Unauthorized)
    }
}

fn presented_credentials<'a>(
    req: &'a HttpRequest,
    body_token: Option<&'a str>,
) -> impl Iterator<Item = &'a str> {
    let headers = req.headers();
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim);
    let token = headers
        .get(AUTH_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim);
    [bearer, token, body_token].into_iter().flatten()
}
