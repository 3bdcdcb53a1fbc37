use std::sync::Arc;

use actix_web::web;

use crate::auth::CredentialCheck;
use crate::db::Storage;
use crate::handlers;
use crate::notify::EnquiryNotifier;

/// Shared application state, cloned into every worker.
#[derive(Clone)]
pub struct AppState {
    storage: web::Data<Storage>,
    credentials: web::Data<dyn CredentialCheck>,
    notifier: web::Data<dyn EnquiryNotifier>,
}

impl AppState {
    pub fn new(
        storage: Storage,
        credentials: Arc<dyn CredentialCheck>,
        notifier: Arc<dyn EnquiryNotifier>,
    ) -> Self {
        Self {
            storage: web::Data::new(storage),
            credentials: web::Data::from(credentials),
            notifier: web::Data::from(notifier),
        }
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Attach the shared state and mount the API routes.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.storage.clone())
            .app_data(self.credentials.clone())
            .app_data(self.notifier.clone());
        handlers::configure(cfg);
    }
}
