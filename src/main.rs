use std::io;
use std::sync::Arc;

use actix_web::{middleware, App, HttpServer};
use env_logger::Env;

use woodcroft_bookings::auth::SharedSecret;
use woodcroft_bookings::config::AppConfig;
use woodcroft_bookings::db::Storage;
use woodcroft_bookings::notify::LogNotifier;
use woodcroft_bookings::state::AppState;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Initialize environment and logger
    let config = AppConfig::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    if let Some(dir) = config.database_dir() {
        std::fs::create_dir_all(&dir)?;
    }

    log::info!("Connecting to database at {}...", config.database_url);
    let storage = Storage::connect(&config.database_url, config.max_connections)
        .await
        .map_err(|e| {
            log::error!("{e}");
            io::Error::other(e)
        })?;

    log::info!("Ensuring bookings table exists...");
    storage.initialize().await.map_err(|e| {
        log::error!("{e}");
        io::Error::other(e)
    })?;

    let state = AppState::new(
        storage.clone(),
        Arc::new(SharedSecret::new(config.passcode.clone())),
        Arc::new(LogNotifier::new(config.enquiry_recipient.clone())),
    );

    log::info!(
        "Starting server at http://{}:{} ({:?})",
        config.bind_addr,
        config.port,
        config.environment
    );

    HttpServer::new(move || {
        let state = state.clone();
        App::new()
            .wrap(middleware::Logger::default())
            .configure(move |cfg| state.configure(cfg))
    })
    .bind((config.bind_addr.as_str(), config.port))?
    .run()
    .await?;

    log::info!("Server stopped, closing database");
    storage.close().await;
    Ok(())
}
