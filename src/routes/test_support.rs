use std::sync::Arc;

use actix_web::http::header;
use actix_web::test::TestRequest;
use actix_web::web;

use crate::config::Config;
use crate::notify::testing::RecordingNotifier;
use crate::state::AppState;

const BOUNDARY: &str = "automation-test-boundary";

pub fn state_with(notifier: Arc<RecordingNotifier>) -> web::Data<AppState> {
    web::Data::new(AppState::new(Config::default(), notifier))
}

// A POST carrying `csv` as the `file` field of a multipart form.
pub fn csv_upload(uri: &str, csv: &str) -> TestRequest {
    let body = format!(
        "--{b}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"upload.csv\"\r\n\
         Content-Type: text/csv\r\n\r\n\
         {csv}\r\n\
         --{b}--\r\n",
        b = BOUNDARY,
        csv = csv
    );
    TestRequest::post()
        .uri(uri)
        .insert_header((
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        ))
        .set_payload(body)
}

pub fn state_with_config(config: Config, notifier: Arc<RecordingNotifier>) -> web::Data<AppState> {
    web::Data::new(AppState::new(config, notifier))
}
