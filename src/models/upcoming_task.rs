use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpcomingTask {
    pub task: String,
    pub deadline: String,
    pub note: String,
}
