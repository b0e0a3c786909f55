use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use chrono::Local;
use log::{error, info, warn};

use super::admin_models::{
    AdminAiTaskRequest, AdminAiTaskResponse,
    NoTasksResponse, UploadScheduleQuery, UploadScheduleResponse,
    UploadAttendanceResponse,
};
use super::admin_upload::read_file_field;
use crate::ai_tasks::run_admin_task;
use crate::attendance;
use crate::csv_table::CsvTable;
use crate::error::ApiError;
use crate::notify::NotifyMethod;
use crate::schedule::{format_line, upcoming_tasks};
use crate::state::AppState;

// Filter an uploaded schedule to the alert window and notify the recipient
pub async fn upload_schedule(
    state: web::Data<AppState>,
    query: web::Query<UploadScheduleQuery>,
    payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let method = NotifyMethod::parse(&query.notify_type).map_err(|e| {
        warn!("Rejected schedule upload with notify_type '{}'", query.notify_type);
        e
    })?;
    let recipient = query.recipient.trim();
    if recipient.is_empty() {
        return Err(ApiError::BadRequest("recipient must not be empty".into()));
    }
    info!("Received schedule upload for {} via {}", recipient, method);

    let content = read_file_field(payload, state.config.max_upload_bytes).await?;
    let table = CsvTable::parse(&content)?;
    let now = Local::now().naive_local();
    let tasks = upcoming_tasks(&table, now, state.config.alert_window())?;

    if tasks.is_empty() {
        info!("No upcoming deadlines in {} uploaded rows", table.len());
        return Ok(HttpResponse::Ok().json(NoTasksResponse {
            status: "no_tasks",
            message: format!(
                "No upcoming deadlines within {} days.",
                state.config.alert_window_days
            ),
        }));
    }

    let message_preview: Vec<String> = tasks.iter().map(format_line).collect();
    if let Err(e) = state
        .notifier
        .send(method, recipient, &message_preview.join("\n"))
    {
        error!("Failed to notify {} via {}: {}", recipient, method, e);
        return Err(e.into());
    }

    info!("Sent {} upcoming deadlines to {}", tasks.len(), recipient);
    Ok(HttpResponse::Ok().json(UploadScheduleResponse {
        status: "success",
        sent_to: recipient.to_string(),
        method,
        message_preview,
        total_upcoming: tasks.len(),
    }))
}

// Summarize an uploaded attendance sheet
pub async fn upload_attendance(
    state: web::Data<AppState>,
    payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    info!("Received attendance upload");
    let content = read_file_field(payload, state.config.max_upload_bytes).await?;
    let table = CsvTable::parse(&content)?;
    let summary = attendance::summarize(&table)?;

    let below_threshold = summary.below(state.config.attendance_threshold);
    info!(
        "Processed {} attendance records, {} students below {}%",
        summary.total_records,
        below_threshold.len(),
        state.config.attendance_threshold
    );
    Ok(HttpResponse::Ok().json(UploadAttendanceResponse {
        status: "success",
        total_records: summary.total_records,
        present: summary.overall.present,
        absent: summary.overall.absent,
        late: summary.overall.late,
        excused: summary.overall.excused,
        unrecognized: summary.unrecognized,
        attendance_rate: summary.overall.rate(),
        students: summary.students,
        below_threshold,
    }))
}

// Run one of the canned admin AI tasks on free text
pub async fn run_ai_task(
    state: web::Data<AppState>,
    request: web::Json<AdminAiTaskRequest>,
) -> Result<HttpResponse, ApiError> {
    let ai_task = request.ai_task;
    info!("Running admin AI task {:?}", ai_task);
    let result = run_admin_task(
        ai_task,
        &request.text,
        state.notifier.as_ref(),
        state.config.attendance_threshold,
    )?;

    Ok(HttpResponse::Ok().json(AdminAiTaskResponse {
        status: "success",
        ai_task,
        result,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::{http::StatusCode, test, App};
    use chrono::Duration;
    use serde_json::{json, Value};

    use crate::notify::testing::RecordingNotifier;
    use crate::routes::routes::configure;
    use crate::config::Config;
    use crate::routes::test_support::{csv_upload, state_with, state_with_config};

    fn deadline_in(offset: Duration) -> String {
        (Local::now() + offset).format("%Y-%m-%d %H:%M:%S").to_string()
    }

    fn date_in(offset: Duration) -> String {
        (Local::now() + offset).format("%Y-%m-%d").to_string()
    }

    #[actix_web::test]
    async fn schedule_upload_notifies_upcoming_tasks() {
        let notifier = Arc::new(RecordingNotifier::default());
        let app = test::init_service(
            App::new()
                .app_data(state_with(notifier.clone()))
                .configure(configure),
        )
        .await;

        let csv = format!(
            "Task,Deadline,Notes\n\
             Essay,{soon},Chapter 3\n\
             Old quiz,{past},\n\
             Project,{later},\n\
             Lab report,{far},Too far\n\
             Broken,whenever,\n",
            soon = deadline_in(Duration::days(2)),
            past = deadline_in(Duration::days(-2)),
            later = deadline_in(Duration::days(5)),
            far = deadline_in(Duration::days(30)),
        );
        let req = csv_upload(
            "/admin/upload-schedule?notify_type=Email&recipient=teacher@school.edu",
            &csv,
        )
        .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        let expected_preview = vec![
            format!("Task: Essay | Deadline: {} | Notes: Chapter 3", date_in(Duration::days(2))),
            format!("Task: Project | Deadline: {} | Notes: ", date_in(Duration::days(5))),
        ];
        assert_eq!(
            body,
            json!({
                "status": "success",
                "sent_to": "teacher@school.edu",
                "method": "email",
                "message_preview": expected_preview,
                "total_upcoming": 2,
            })
        );

        let sent = notifier.messages();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method, NotifyMethod::Email);
        assert_eq!(sent[0].recipient, "teacher@school.edu");
        assert_eq!(sent[0].body, expected_preview.join("\n"));
    }

    #[actix_web::test]
    async fn schedule_without_upcoming_rows_reports_no_tasks() {
        let notifier = Arc::new(RecordingNotifier::default());
        let app = test::init_service(
            App::new()
                .app_data(state_with(notifier.clone()))
                .configure(configure),
        )
        .await;

        let csv = format!("Task,Deadline\nOld,{}\n", deadline_in(Duration::days(-1)));
        let req = csv_upload("/admin/upload-schedule?notify_type=viber&recipient=v-42", &csv)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "no_tasks");
        assert_eq!(body["message"], "No upcoming deadlines within 7 days.");
        assert!(notifier.messages().is_empty());
    }

    #[actix_web::test]
    async fn schedule_rejects_bad_input_with_400() {
        let notifier = Arc::new(RecordingNotifier::default());
        let app = test::init_service(
            App::new()
                .app_data(state_with(notifier.clone()))
                .configure(configure),
        )
        .await;
        let good_csv = format!("Task,Deadline\nEssay,{}\n", deadline_in(Duration::days(1)));

        let cases = vec![
            (
                "/admin/upload-schedule?notify_type=sms&recipient=x",
                good_csv.clone(),
                "Invalid notify_type. Use 'email' or 'viber'.",
            ),
            (
                "/admin/upload-schedule?notify_type=email&recipient=x",
                "Task,Notes\nEssay,none\n".to_string(),
                "CSV must include 'Task' and 'Deadline' columns",
            ),
            (
                "/admin/upload-schedule?notify_type=email&recipient=x",
                "Task,Deadline\nEssay,2030-01-01,extra\n".to_string(),
                "Invalid CSV format: Expected 2 fields in line 2, saw 3",
            ),
            (
                "/admin/upload-schedule?notify_type=email&recipient=%20",
                good_csv.clone(),
                "recipient must not be empty",
            ),
        ];

        for (uri, csv, detail) in cases {
            let resp = test::call_service(&app, csv_upload(uri, &csv).to_request()).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", uri);
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["detail"], detail);
        }

        let resp = test::call_service(
            &app,
            csv_upload("/admin/upload-schedule?notify_type=email", &good_csv).to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(notifier.messages().is_empty());
    }

    #[actix_web::test]
    async fn schedule_notifier_failure_is_500() {
        let notifier = Arc::new(RecordingNotifier::failing());
        let app = test::init_service(
            App::new()
                .app_data(state_with(notifier))
                .configure(configure),
        )
        .await;

        let csv = format!("Task,Deadline\nEssay,{}\n", deadline_in(Duration::days(1)));
        let req = csv_upload("/admin/upload-schedule?notify_type=email&recipient=a@b.c", &csv)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body["detail"],
            "Notification failed: delivery failed: gateway unavailable"
        );
    }

    #[actix_web::test]
    async fn schedule_window_out_of_range_is_500() {
        let notifier = Arc::new(RecordingNotifier::default());
        let config = Config {
            alert_window_days: 1_000_000_000,
            ..Config::default()
        };
        let app = test::init_service(
            App::new()
                .app_data(state_with_config(config, notifier.clone()))
                .configure(configure),
        )
        .await;

        let csv = format!("Task,Deadline\nEssay,{}\n", deadline_in(Duration::days(1)));
        let req = csv_upload("/admin/upload-schedule?notify_type=email&recipient=a@b.c", &csv)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["detail"]
            .as_str()
            .unwrap_or_default()
            .starts_with("Schedule processing failed:"));
        assert!(notifier.messages().is_empty());
    }

    #[actix_web::test]
    async fn attendance_upload_returns_rates() {
        let app = test::init_service(
            App::new()
                .app_data(state_with(Arc::new(RecordingNotifier::default())))
                .configure(configure),
        )
        .await;

        let csv = "Student,Status\nAna,Present\nAna,Absent\nBen,Present\nBen,Late\n";
        let resp = test::call_service(&app, csv_upload("/admin/upload-attendance", csv).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "success");
        assert_eq!(body["total_records"], 4);
        assert_eq!(body["attendance_rate"], 75.0);
        assert_eq!(body["below_threshold"], json!(["Ana"]));
        assert_eq!(
            body["students"][1],
            json!({
                "student": "Ben",
                "present": 1,
                "absent": 0,
                "late": 1,
                "excused": 0,
                "attendance_rate": 100.0,
            })
        );
    }

    #[actix_web::test]
    async fn attendance_upload_requires_status_column() {
        let app = test::init_service(
            App::new()
                .app_data(state_with(Arc::new(RecordingNotifier::default())))
                .configure(configure),
        )
        .await;

        let resp = test::call_service(
            &app,
            csv_upload("/admin/upload-attendance", "Student,Date\nAna,2030-01-01\n").to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["detail"], "CSV must include a 'Status' column");
    }

    #[actix_web::test]
    async fn admin_ai_task_runs_and_validates_task_names() {
        let app = test::init_service(
            App::new()
                .app_data(state_with(Arc::new(RecordingNotifier::default())))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/admin/ai-task")
            .set_json(json!({
                "ai_task": "Summarize Class Feedback",
                "text": "The course was great. Labs were confusing at first. Overall good.",
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["ai_task"], "Summarize Class Feedback");
        assert_eq!(body["result"]["type"], "feedback_summary");
        assert_eq!(body["result"]["sentiment"], "positive");
        assert_eq!(
            body["result"]["summary"],
            "The course was great. Labs were confusing at first."
        );

        let req = test::TestRequest::post()
            .uri("/admin/ai-task")
            .set_json(json!({ "ai_task": "Predict Lottery Numbers", "text": "" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["detail"].is_string());
    }
}
