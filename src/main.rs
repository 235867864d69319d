use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use dotenvy::dotenv;
use env_logger::Env;
use log::info;
use std::io;
mod api;
mod config;
mod database;
mod error;
mod inference;
mod routes;
use api::{docs, hello, predict, status};
use config::Settings;
use database::DatabaseState;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load environment variables from .env if present
    dotenv().ok();

    // Initialize logger (RUST_LOG overrides default if set)
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let settings = Settings::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    // The database is optional; a failed connection only shows up in /test
    let db = web::Data::new(DatabaseState::connect(settings.database.as_ref()).await);

    info!("Server running at http://{}:{}", settings.host, settings.port);
    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .supports_credentials();

        App::new()
            .wrap(middleware::Compress::default())
            // Log each incoming request with status, time, and size
            .wrap(middleware::Logger::new("%a \"%r\" %s %b %T"))
            .wrap(cors)
            .app_data(db.clone())
            .route("/", web::get().to(routes::index))
            .configure(predict::init_routes)
            .configure(status::init_routes)
            .configure(docs::init_routes)
            .service(web::scope("/api").configure(hello::init_routes))
            .default_service(web::route().to(routes::not_found))
    })
    .bind((settings.host.as_str(), settings.port))?
    .run()
    .await
}
