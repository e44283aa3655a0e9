//! Storage abstractions for the question collection.
//!
//! A store holds exactly one ordered collection of opaque questions.
//! Backends only implement the raw read and write; the degradation and
//! reporting policy shared by every backend lives in the provided methods.

use std::time::Instant;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::errors::StoreError;
use crate::metrics;
use crate::question::{json_kind, Question, SaveConfirmation};

pub mod file_store;
pub mod table_store;

pub use file_store::JsonFileStore;
pub use table_store::SeaOrmQuestionStore;

/// Durable storage of one JSON array of questions.
#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// Short backend name used in logs and metric labels.
    fn backend(&self) -> &'static str;

    /// Read the persisted collection, surfacing every failure.
    async fn try_load(&self) -> Result<Vec<Question>, StoreError>;

    /// Replace the persisted collection. Must be all-or-nothing.
    async fn write_all(&self, questions: Vec<Question>) -> Result<usize, StoreError>;

    /// Release the underlying handle. Best effort.
    async fn close(&self) {}

    /// Load the collection, falling back to an empty one on any failure.
    async fn load(&self) -> Vec<Question> {
        let backend = self.backend();
        metrics::LOADS_TOTAL.with_label_values(&[backend]).inc();
        match self.try_load().await {
            Ok(questions) => questions,
            Err(e) if e.is_missing() => {
                info!(op = "load", backend, error = %e, "store not written yet; returning empty collection");
                Vec::new()
            }
            Err(e) => {
                metrics::LOAD_FALLBACKS_TOTAL.with_label_values(&[backend]).inc();
                warn!(op = "load", backend, error = %e, "load failed; returning empty collection");
                Vec::new()
            }
        }
    }

    /// Atomically replace the whole collection.
    async fn replace_all(&self, questions: Vec<Question>) -> Result<SaveConfirmation, StoreError> {
        let backend = self.backend();
        let started = Instant::now();
        let result = self.write_all(questions).await;
        metrics::SAVE_DURATION
            .with_label_values(&[backend])
            .observe(started.elapsed().as_secs_f64());
        match result {
            Ok(count) => {
                metrics::SAVES_TOTAL.with_label_values(&[backend]).inc();
                info!(op = "replace_all", backend, count, "collection saved");
                Ok(SaveConfirmation { count })
            }
            Err(e) => {
                metrics::SAVE_FAILURES_TOTAL.with_label_values(&[backend]).inc();
                error!(op = "replace_all", backend, error = %e, "save failed; previous collection kept");
                Err(e)
            }
        }
    }

    /// Replace from an arbitrary JSON payload; anything but an array is rejected.
    async fn replace_from_value(&self, payload: Value) -> Result<SaveConfirmation, StoreError> {
        match payload {
            Value::Array(items) => self.replace_all(items.into_iter().map(Question).collect()).await,
            other => {
                let e = StoreError::NotACollection(json_kind(&other));
                metrics::SAVE_FAILURES_TOTAL.with_label_values(&[self.backend()]).inc();
                error!(op = "replace_all", backend = self.backend(), error = %e, "save rejected");
                Err(e)
            }
        }
    }
}
