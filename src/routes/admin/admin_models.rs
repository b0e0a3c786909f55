use serde::{Deserialize, Serialize};

use crate::ai_tasks::{AdminAiTask, AiOutput};
use crate::models::attendance::StudentAttendance;
use crate::notify::NotifyMethod;

// Schedule upload query and responses
#[derive(Deserialize)]
pub struct UploadScheduleQuery {
    pub notify_type: String,
    pub recipient: String,
}

#[derive(Serialize)]
pub struct NoTasksResponse {
    pub status: &'static str,
    pub message: String,
}

#[derive(Serialize)]
pub struct UploadScheduleResponse {
    pub status: &'static str,
    pub sent_to: String,
    pub method: NotifyMethod,
    pub message_preview: Vec<String>,
    pub total_upcoming: usize,
}


// Attendance upload response
#[derive(Serialize)]
pub struct UploadAttendanceResponse {
    pub status: &'static str,
    pub total_records: usize,
    pub present: usize,
    pub absent: usize,
    pub late: usize,
    pub excused: usize,
    pub unrecognized: usize,
    pub attendance_rate: f64,
    pub students: Vec<StudentAttendance>,
    pub below_threshold: Vec<String>,
}


// Admin AI task request and response
#[derive(Deserialize)]
pub struct AdminAiTaskRequest {
    pub ai_task: AdminAiTask,
    #[serde(default)]
    pub text: String,
}

#[derive(Serialize)]
pub struct AdminAiTaskResponse {
    pub status: &'static str,
    pub ai_task: AdminAiTask,
    pub result: AiOutput,
}
