use serde::Serialize;
use thiserror::Error;

/// Errors returned by the booking store.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The database could not be opened or no connection could be obtained.
    #[error("storage unavailable: {0}")]
    Unavailable(#[source] sqlx::Error),

    /// A required booking field was missing or empty.
    #[error("missing required field: {field}")]
    Validation { field: &'static str },

    #[error("database error: {0}")]
    Query(#[source] sqlx::Error),
}

// SQLite primary result codes that mean the file itself is out of reach.
const SQLITE_BUSY: i64 = 5;
const SQLITE_LOCKED: i64 = 6;
const SQLITE_IOERR: i64 = 10;
const SQLITE_CANTOPEN: i64 = 14;

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        let unavailable = match &err {
            sqlx::Error::Configuration(_)
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => true,
            sqlx::Error::Database(db_err) => is_unavailable_code(db_err.code().as_deref()),
            _ => false,
        };

        if unavailable {
            StorageError::Unavailable(err)
        } else {
            StorageError::Query(err)
        }
    }
}

/// Extended SQLite codes carry the primary code in their low byte.
fn is_unavailable_code(code: Option<&str>) -> bool {
    let Some(code) = code.and_then(|c| c.parse::<i64>().ok()) else {
        return false;
    };
    matches!(
        code & 0xff,
        SQLITE_BUSY | SQLITE_LOCKED | SQLITE_IOERR | SQLITE_CANTOPEN
    )
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Errors raised while reading configuration from the environment.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be set when APP_ENV=production")]
    Missing { name: &'static str },

    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

// Helper error struct
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
