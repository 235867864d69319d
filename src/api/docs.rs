use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{hello, predict, status};
use crate::error::ErrorBody;
use crate::inference::{Label, Prediction};
use crate::routes;

#[derive(OpenApi)]
#[openapi(
    info(title = "smear-screen", description = "Mock blood smear classifier backend"),
    paths(
        routes::index::index,
        hello::hello,
        predict::predict,
        status::test_database,
    ),
    components(schemas(Prediction, Label, ErrorBody, status::StatusReport, hello::Greeting))
)]
pub struct ApiDoc;

/// Swagger UI at `/docs/` backed by `/openapi.json`.
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(SwaggerUi::new("/docs/{_:.*}").url("/openapi.json", ApiDoc::openapi()));
}
