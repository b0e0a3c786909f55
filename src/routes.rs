use actix_web::{HttpResponse, Responder};
use serde::Serialize;

pub mod admin;
pub mod routes;
pub mod workflow;

#[cfg(test)]
pub mod test_support;

#[derive(Serialize)]
pub struct RootResponse {
    pub message: &'static str,
}

pub async fn root() -> impl Responder {
    HttpResponse::Ok().json(RootResponse {
        message: "Automation backend is running!",
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{test, App};
    use serde_json::{json, Value};

    use crate::notify::testing::RecordingNotifier;
    use crate::routes::test_support::state_with;

    #[actix_web::test]
    async fn root_reports_running() {
        let app = test::init_service(
            App::new()
                .app_data(state_with(Arc::new(RecordingNotifier::default())))
                .configure(super::routes::configure),
        )
        .await;
        let req = test::TestRequest::get().uri("/").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({"message": "Automation backend is running!"}));
    }
}
