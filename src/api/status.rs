use actix_web::{get, web, HttpResponse};
use log::{debug, warn};
use serde::Serialize;
use utoipa::ToSchema;

use crate::config;
use crate::database::DatabaseState;
use crate::error::truncated;

const MAX_COLLECTIONS: usize = 10;
const ERROR_DETAIL_LIMIT: usize = 50;

#[derive(Debug, Serialize, ToSchema)]
pub struct StatusReport {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    /// At most ten collection names
    pub collections: Vec<String>,
}

impl StatusReport {
    /// Describes the database state. Errors end up in the text, never in the result.
    pub async fn probe(db: &DatabaseState, is_set: impl Fn(&str) -> bool) -> Self {
        let mut report = StatusReport {
            backend: "✅ Running".into(),
            database: "❌ Not Available".into(),
            database_url: String::new(),
            database_name: String::new(),
            connection_status: "Not Connected".into(),
            collections: Vec::new(),
        };

        match db {
            DatabaseState::NotConfigured => {
                report.database = "❌ Database module not found (set DATABASE_URL to enable it)".into();
            }
            DatabaseState::Unavailable(reason) => {
                debug!("Status probe: database unavailable since startup: {}", reason);
                report.database = "⚠️  Available but not initialized".into();
            }
            DatabaseState::Connected(catalog) => {
                report.database = "✅ Available".into();
                report.connection_status = "Connected".into();
                match catalog.list_collection_names().await {
                    Ok(mut names) => {
                        names.truncate(MAX_COLLECTIONS);
                        report.collections = names;
                        report.database = "✅ Connected & Working".into();
                    }
                    Err(e) => {
                        warn!("Listing collections of '{}' failed: {}", catalog.name(), e);
                        report.database =
                            format!("⚠️  Connected but Error: {}", truncated(e, ERROR_DETAIL_LIMIT));
                    }
                }
            }
        }

        report.database_url = set_marker(is_set("DATABASE_URL"));
        report.database_name = set_marker(is_set("DATABASE_NAME"));
        report
    }
}

fn set_marker(set: bool) -> String {
    if set { "✅ Set".into() } else { "❌ Not Set".into() }
}

#[utoipa::path(
    get,
    path = "/test",
    tag = "Status",
    responses(
        (status = 200, description = "Backend and database status, always returned", body = StatusReport),
    )
)]
#[get("/test")]
pub async fn test_database(db: web::Data<DatabaseState>) -> HttpResponse {
    let report = StatusReport::probe(db.get_ref(), config::is_set).await;
    HttpResponse::Ok().json(report)
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(test_database);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Catalog;
    use actix_web::{test, App};
    use async_trait::async_trait;
    use sea_orm::DbErr;
    use std::sync::Arc;

    struct FakeCatalog {
        tables: Result<Vec<String>, String>,
    }

    #[async_trait]
    impl Catalog for FakeCatalog {
        fn name(&self) -> &str {
            "fake"
        }

        async fn list_collection_names(&self) -> Result<Vec<String>, DbErr> {
            self.tables.clone().map_err(DbErr::Custom)
        }
    }

    fn connected(tables: Result<Vec<String>, String>) -> DatabaseState {
        DatabaseState::Connected(Arc::new(FakeCatalog { tables }))
    }

    #[actix_web::test]
    async fn reports_missing_database_and_env() {
        let report = StatusReport::probe(&DatabaseState::NotConfigured, |_| false).await;

        assert_eq!(report.backend, "✅ Running");
        assert!(report.database.starts_with("❌ Database module not found"));
        assert_eq!(report.database_url, "❌ Not Set");
        assert_eq!(report.database_name, "❌ Not Set");
        assert_eq!(report.connection_status, "Not Connected");
        assert!(report.collections.is_empty());
    }

    #[actix_web::test]
    async fn failed_startup_connection_reads_as_uninitialized() {
        let state = DatabaseState::Unavailable("connection refused".into());
        let report = StatusReport::probe(&state, |key| key == "DATABASE_URL").await;

        assert_eq!(report.database, "⚠️  Available but not initialized");
        assert_eq!(report.database_url, "✅ Set");
        assert_eq!(report.database_name, "❌ Not Set");
        assert_eq!(report.connection_status, "Not Connected");
    }

    #[actix_web::test]
    async fn working_database_lists_first_ten_collections() {
        let tables: Vec<String> = (0..15).map(|i| format!("table_{i:02}")).collect();
        let report = StatusReport::probe(&connected(Ok(tables.clone())), |_| true).await;

        assert_eq!(report.database, "✅ Connected & Working");
        assert_eq!(report.connection_status, "Connected");
        assert_eq!(report.collections, tables[..10].to_vec());
        assert_eq!(report.database_url, "✅ Set");
        assert_eq!(report.database_name, "✅ Set");
    }

    #[actix_web::test]
    async fn listing_error_is_truncated_into_the_text() {
        let reason = "e".repeat(200);
        let report = StatusReport::probe(&connected(Err(reason)), |_| false).await;

        let detail = report.database.strip_prefix("⚠️  Connected but Error: ").unwrap();
        assert_eq!(detail.chars().count(), 50);
        assert_eq!(report.connection_status, "Connected");
        assert!(report.collections.is_empty());
    }

    #[actix_web::test]
    async fn endpoint_answers_200_without_a_database() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(DatabaseState::NotConfigured))
                .configure(init_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/test").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["backend"], "✅ Running");
        assert!(body["database"].as_str().unwrap().starts_with("❌"));
        assert_eq!(body["collections"], serde_json::json!([]));
    }
}
