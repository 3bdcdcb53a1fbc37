use std::path::{Path, PathBuf};

use crate::error::ConfigError;

const DEV_PASSCODE: &str = "1111";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

/// Runtime settings, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub database_url: String,
    pub max_connections: u32,
    pub bind_addr: String,
    pub port: u16,
    pub passcode: String,
    pub enquiry_recipient: Option<String>,
}

impl AppConfig {
    /// Read settings from `.env` (if present) and the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("APP_ENV").as_deref() {
            None | Some("development") => Environment::Development,
            Some("production") => Environment::Production,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "APP_ENV",
                    value: other.to_string(),
                })
            }
        };

        let passcode = match (lookup("PROD_PASSCODE"), environment) {
            (Some(code), _) if !code.is_empty() => code,
            (_, Environment::Development) => DEV_PASSCODE.to_string(),
            (_, Environment::Production) => {
                return Err(ConfigError::Missing {
                    name: "PROD_PASSCODE",
                })
            }
        };

        Ok(Self {
            environment,
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| "sqlite://data/db.sqlite3".to_string()),
            max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 5)?,
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", 8081)?,
            passcode,
            enquiry_recipient: lookup("EMAIL_DEFAULT_SENDER"),
        })
    }

    /// Directory holding the SQLite file, if the database lives on disk.
    pub fn database_dir(&self) -> Option<PathBuf> {
        let path = self
            .database_url
            .strip_prefix("sqlite://")
            .or_else(|| self.database_url.strip_prefix("sqlite:"))?;
        let path = path.split('?').next().unwrap_or_default();
        if path.is_empty() || path == ":memory:" {
            return None;
        }
        Path::new(path)
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(Path::to_path_buf)
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}
