use serde::{Deserialize, Serialize};

use crate::ai_tasks::{AiOutput, UserAiTask};
use crate::models::workflow::{Action, Trigger};

// Save workflow response
#[derive(Serialize)]
pub struct SaveWorkflowResponse {
    pub success: bool,
    pub message: String,
    pub workflow_id: String,
}


// Delete workflow response
#[derive(Serialize)]
pub struct DeleteWorkflowResponse {
    pub success: bool,
    pub message: String,
}


// Trigger workflow request and response
#[derive(Deserialize)]
pub struct TriggerWorkflowRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Serialize)]
pub struct TriggerWorkflowResponse {
    pub status: &'static str,
    pub workflow_id: String,
    pub trigger: Trigger,
    pub ai_task: UserAiTask,
    pub action: Action,
    pub action_status: &'static str,
    pub result: AiOutput,
}
