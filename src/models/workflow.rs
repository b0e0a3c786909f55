use serde::{Deserialize, Serialize};

use crate::ai_tasks::UserAiTask;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trigger {
    #[serde(rename = "Google Form Submission")]
    GoogleFormSubmission,
    #[serde(rename = "New Email")]
    NewEmail,
    #[serde(rename = "Webhook Received")]
    WebhookReceived,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    #[serde(rename = "Update Google Sheet")]
    UpdateGoogleSheet,
    #[serde(rename = "Send Email")]
    SendEmail,
    #[serde(rename = "Post to Slack")]
    PostToSlack,
}

impl Action {
    pub fn label(&self) -> &'static str {
        match self {
            Action::UpdateGoogleSheet => "Update Google Sheet",
            Action::SendEmail => "Send Email",
            Action::PostToSlack => "Post to Slack",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    pub trigger: Trigger,
    pub ai_task: UserAiTask,
    pub action: Action,
}
