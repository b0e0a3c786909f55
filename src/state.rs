use std::sync::Arc;

use crate::config::Config;
use crate::notify::Notifier;
use crate::store::WorkflowStore;

pub struct AppState {
    pub config: Config,
    pub store: WorkflowStore,
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    pub fn new(config: Config, notifier: Arc<dyn Notifier>) -> Self {
        AppState {
            config,
            store: WorkflowStore::new(),
            notifier,
        }
    }
}
