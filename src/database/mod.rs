mod catalog;

pub use catalog::{Catalog, SeaOrmCatalog};

use crate::config::DatabaseSettings;
use log::{info, warn};
use sea_orm::{ConnectOptions, Database};
use std::sync::Arc;
use std::time::Duration;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// What the service knows about its optional database, fixed at startup.
pub enum DatabaseState {
    /// No `DATABASE_URL` was given.
    NotConfigured,
    /// A URL was given but the connection could not be established.
    Unavailable(String),
    Connected(Arc<dyn Catalog>),
}

impl DatabaseState {
    /// Connects when settings are present. Never fails: a broken database only
    /// degrades the status report.
    pub async fn connect(settings: Option<&DatabaseSettings>) -> Self {
        let Some(settings) = settings else {
            info!("DATABASE_URL not set, running without a database");
            return DatabaseState::NotConfigured;
        };

        let mut opts = ConnectOptions::new(settings.url.clone());
        opts.connect_timeout(CONNECT_TIMEOUT).sqlx_logging(false);

        let connected = match Database::connect(opts).await {
            Ok(conn) => SeaOrmCatalog::new(conn, settings.name.clone()).await,
            Err(e) => Err(e),
        };

        match connected {
            Ok(catalog) => {
                info!("Connected to database '{}'", catalog.name());
                DatabaseState::Connected(Arc::new(catalog))
            }
            Err(e) => {
                warn!("Database connection failed, continuing without it: {}", e);
                DatabaseState::Unavailable(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn no_settings_means_not_configured() {
        assert!(matches!(DatabaseState::connect(None).await, DatabaseState::NotConfigured));
    }

    #[actix_web::test]
    async fn bad_url_degrades_instead_of_failing() {
        let settings = DatabaseSettings { url: "nosuchdb://nowhere".into(), name: None };
        assert!(matches!(
            DatabaseState::connect(Some(&settings)).await,
            DatabaseState::Unavailable(_)
        ));
    }

    #[actix_web::test]
    async fn sqlite_url_connects() {
        let settings = DatabaseSettings { url: "sqlite::memory:".into(), name: None };
        match DatabaseState::connect(Some(&settings)).await {
            DatabaseState::Connected(catalog) => assert_eq!(catalog.name(), "main"),
            _ => panic!("expected a connected catalog"),
        }
    }
}
