use actix_web::{get, web, HttpResponse};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct Greeting {
    #[schema(value_type = String)]
    pub message: &'static str,
}

#[utoipa::path(
    get,
    path = "/api/hello",
    tag = "Greeting",
    responses((status = 200, description = "Static greeting", body = Greeting))
)]
#[get("/hello")]
pub async fn hello() -> HttpResponse {
    HttpResponse::Ok().json(Greeting { message: "Hello from the backend API!" })
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(hello);
}
