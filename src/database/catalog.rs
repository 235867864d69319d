use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, DbErr, Statement};

/// A database the status probe can describe: something with a name that can
/// enumerate its collections.
#[async_trait]
pub trait Catalog: Send + Sync {
    fn name(&self) -> &str;

    async fn list_collection_names(&self) -> Result<Vec<String>, DbErr>;
}

/// Catalog over a sea-orm connection; collections are the tables of the current schema.
pub struct SeaOrmCatalog {
    conn: DatabaseConnection,
    name: String,
}

impl SeaOrmCatalog {
    /// Uses `name` when given, otherwise asks the server which database it is serving.
    pub async fn new(conn: DatabaseConnection, name: Option<String>) -> Result<Self, DbErr> {
        let name = match name {
            Some(name) => name,
            None => current_database(&conn).await?,
        };
        Ok(Self { conn, name })
    }
}

#[async_trait]
impl Catalog for SeaOrmCatalog {
    fn name(&self) -> &str {
        &self.name
    }

    async fn list_collection_names(&self) -> Result<Vec<String>, DbErr> {
        let backend = self.conn.get_database_backend();
        let sql = match backend {
            DbBackend::MySql => {
                "SELECT CAST(table_name AS CHAR) AS name FROM information_schema.tables \
                 WHERE table_schema = DATABASE() ORDER BY name"
            }
            DbBackend::Sqlite => {
                "SELECT name FROM sqlite_master \
                 WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name"
            }
            _ => {
                "SELECT table_name::text AS name FROM information_schema.tables \
                 WHERE table_schema = current_schema() ORDER BY name"
            }
        };

        let rows = self.conn.query_all(Statement::from_string(backend, sql)).await?;
        rows.iter().map(|row| row.try_get::<String>("", "name")).collect()
    }
}

async fn current_database(conn: &DatabaseConnection) -> Result<String, DbErr> {
    let backend = conn.get_database_backend();
    let sql = match backend {
        DbBackend::Sqlite => return Ok("main".to_string()),
        DbBackend::MySql => "SELECT CAST(DATABASE() AS CHAR) AS name",
        _ => "SELECT current_database()::text AS name",
    };

    match conn.query_one(Statement::from_string(backend, sql)).await? {
        Some(row) => row.try_get::<String>("", "name"),
        None => Err(DbErr::RecordNotFound("current database name".to_string())),
    }
}
