use actix_web::{error, web, HttpRequest};
use log::warn;

use super::admin::admin_handlers;
use super::workflow::workflow_handlers;
use crate::error::ApiError;

// Every area plus the extractor configs, as mounted by the server.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(extractor_errors_as_json())
        .app_data(query_errors_as_json())
        .app_data(path_errors_as_json())
        .route("/", web::get().to(super::root));
    admin_configure(cfg);
    workflow_configure(cfg);
}

pub fn admin_configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/upload-schedule", web::post().to(admin_handlers::upload_schedule))
            .route("/upload-attendance", web::post().to(admin_handlers::upload_attendance))
            .route("/ai-task", web::post().to(admin_handlers::run_ai_task))
    );
}

pub fn workflow_configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/workflow", web::post().to(workflow_handlers::create_workflow))
        .service(
            web::resource("/workflow/{workflow_id}")
                .route(web::post().to(workflow_handlers::save_workflow))
                .route(web::delete().to(workflow_handlers::delete_workflow))
        )
        .route("/workflows", web::get().to(workflow_handlers::list_workflows))
        .route("/trigger/{workflow_id}", web::post().to(workflow_handlers::trigger_workflow));
}

fn rejected(kind: &str, message: String, req: &HttpRequest) -> error::Error {
    warn!("Rejected {} for {}: {}", kind, req.path(), message);
    ApiError::BadRequest(message).into()
}

fn extractor_errors_as_json() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req| rejected("JSON body", err.to_string(), req))
}

fn query_errors_as_json() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, req| rejected("query", err.to_string(), req))
}

fn path_errors_as_json() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, req| rejected("path", err.to_string(), req))
}
