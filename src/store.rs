use std::collections::BTreeMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::workflow::Workflow;

/// Process-lifetime workflow registry keyed by workflow id.
#[derive(Default)]
pub struct WorkflowStore {
    workflows: RwLock<BTreeMap<String, Workflow>>,
}

impl WorkflowStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces; returns true when an existing workflow was replaced.
    pub async fn save(&self, id: &str, workflow: Workflow) -> bool {
        self.workflows
            .write()
            .await
            .insert(id.to_string(), workflow)
            .is_some()
    }

    pub async fn get(&self, id: &str) -> Option<Workflow> {
        self.workflows.read().await.get(id).cloned()
    }

    pub async fn all(&self) -> BTreeMap<String, Workflow> {
        self.workflows.read().await.clone()
    }

    pub async fn delete(&self, id: &str) -> Option<Workflow> {
        self.workflows.write().await.remove(id)
    }
}

// Short ids, matching what the form generates client-side.
pub fn generate_workflow_id() -> String {
    Uuid::new_v4().to_string()[..8].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai_tasks::UserAiTask;
    use crate::models::workflow::{Action, Trigger};

    fn sample() -> Workflow {
        Workflow {
            trigger: Trigger::NewEmail,
            ai_task: UserAiTask::Summarization,
            action: Action::PostToSlack,
        }
    }

    #[tokio::test]
    async fn save_get_delete() {
        let store = WorkflowStore::new();
        assert!(!store.save("abc", sample()).await);
        assert!(store.save("abc", sample()).await);
        assert_eq!(store.get("abc").await, Some(sample()));
        assert_eq!(store.all().await.len(), 1);
        assert_eq!(store.delete("abc").await, Some(sample()));
        assert_eq!(store.delete("abc").await, None);
        assert!(store.all().await.is_empty());
    }

    #[test]
    fn generated_ids_are_short() {
        let id = generate_workflow_id();
        assert_eq!(id.len(), 8);
        assert_ne!(id, generate_workflow_id());
    }
}
