use std::env;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("PORT must be a number between 0 and 65535, got {0:?}")]
    InvalidPort(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseSettings {
    pub url: String,
    /// Overrides the name reported for the connected database
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    /// `None` when `DATABASE_URL` is unset; the service then runs without a database.
    pub database: Option<DatabaseSettings>,
}

impl Settings {
    /// Reads settings from the process environment. Call `dotenvy::dotenv()` first
    /// to pick up a local `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let present = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = present("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match present("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };
        let database = present("DATABASE_URL").map(|url| DatabaseSettings {
            url,
            name: present("DATABASE_NAME"),
        });

        Ok(Self { host, port, database })
    }
}

/// True when `key` is set to a non-empty value.
pub fn is_set(key: &str) -> bool {
    env::var_os(key).is_some_and(|v| !v.is_empty())
}
