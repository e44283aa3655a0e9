use std::sync::Arc;

use service::storage::QuestionStore;

/// Shared handler state: the injected store handle.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn QuestionStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn QuestionStore>) -> Self {
        Self { store }
    }
}
