use std::sync::Arc;

use async_trait::async_trait;
use migration::MigratorTrait;
use models::question;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::{info, instrument, warn};

use crate::errors::StoreError;
use crate::question::Question;
use crate::storage::QuestionStore;

/// Postgres-backed question collection, one row per question.
///
/// Replace-all runs in a single transaction: truncate (restarting the
/// identity counter), then insert every question with `id = position + 1`.
/// Any failure rolls the transaction back, so loads only ever observe a
/// committed collection. The pooled connection is returned when the
/// transaction is dropped, whatever the outcome.
pub struct SeaOrmQuestionStore {
    db: DatabaseConnection,
    schema: OnceCell<()>,
}

impl SeaOrmQuestionStore {
    /// Store that applies pending migrations on first use. If the database
    /// is unreachable, the next operation tries again.
    pub fn new(db: DatabaseConnection) -> Arc<Self> {
        Arc::new(Self { db, schema: OnceCell::new() })
    }

    /// Store for a database whose schema is managed elsewhere.
    pub fn with_existing_schema(db: DatabaseConnection) -> Arc<Self> {
        Arc::new(Self { db, schema: OnceCell::new_with(Some(())) })
    }

    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        self.schema
            .get_or_try_init(|| async {
                migration::Migrator::up(&self.db, None).await?;
                info!(backend = "table", event = "schema_ready", "questions table migrated");
                Ok::<(), StoreError>(())
            })
            .await?;
        Ok(())
    }

    async fn replace_rows(txn: &DatabaseTransaction, values: &[Value]) -> Result<u64, StoreError> {
        question::reset(txn).await?;
        let written = question::insert_ordered(txn, values).await?;
        Ok(written)
    }
}

#[async_trait]
impl QuestionStore for SeaOrmQuestionStore {
    fn backend(&self) -> &'static str {
        "table"
    }

    async fn try_load(&self) -> Result<Vec<Question>, StoreError> {
        self.ensure_schema().await?;
        let rows = question::fetch_ordered(&self.db).await?;
        Ok(rows.into_iter().map(|row| Question(row.data)).collect())
    }

    #[instrument(skip_all, fields(count = questions.len()))]
    async fn write_all(&self, questions: Vec<Question>) -> Result<usize, StoreError> {
        self.ensure_schema().await?;
        let values: Vec<Value> = questions.into_iter().map(Question::into_inner).collect();

        let txn = self.db.begin().await?;
        match Self::replace_rows(&txn, &values).await {
            Ok(_) => {
                txn.commit().await?;
                Ok(values.len())
            }
            Err(e) => {
                if let Err(rb) = txn.rollback().await {
                    warn!(backend = "table", error = %rb, "rollback failed; connection will be discarded");
                }
                Err(e)
            }
        }
    }

    async fn close(&self) {
        match self.db.clone().close().await {
            Ok(()) => info!(backend = "table", event = "pool_closed", "database pool closed"),
            Err(e) => warn!(backend = "table", error = %e, "database pool close failed"),
        }
    }
}
