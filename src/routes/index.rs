use actix_web::HttpResponse;

use crate::api::hello::Greeting;

#[utoipa::path(
    get,
    path = "/",
    tag = "Greeting",
    responses((status = 200, description = "Static greeting", body = Greeting))
)]
pub async fn index() -> HttpResponse {
    HttpResponse::Ok().json(Greeting { message: "Hello from the smear-screen backend!" })
}
