pub mod index;
mod not_found;

pub use index::index;
pub use not_found::not_found;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App};

    #[actix_web::test]
    async fn root_greets_and_unknown_paths_are_json_404() {
        let app = test::init_service(
            App::new()
                .route("/", web::get().to(index))
                .default_service(web::route().to(not_found)),
        )
        .await;

        let req = test::TestRequest::get().uri("/").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["message"], "Hello from the smear-screen backend!");

        let req = test::TestRequest::get().uri("/nope").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["detail"], "Not Found");
    }
}
