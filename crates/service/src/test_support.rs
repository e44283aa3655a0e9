#![cfg(test)]
use tokio::sync::{Mutex, MutexGuard, OnceCell};
use sea_orm::{ConnectionTrait, DatabaseConnection, DatabaseTransaction, Statement, TransactionTrait};
use migration::MigratorTrait;
use models::db::connect_with_config;
use configs::DatabaseConfig;

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<()> = OnceCell::const_new();

/// Live tests share one `questions` table; hold this while touching it.
pub static DB_LOCK: Mutex<()> = Mutex::const_new(());

/// Advisory lock key shared with the server crate's end-to-end tests.
pub const QUESTIONS_LOCK_KEY: i64 = 0x5155_495A;

/// Exclusive use of the `questions` table for one live test, within this
/// process and across test binaries. Released on drop.
pub struct QuestionsLock {
    _local: MutexGuard<'static, ()>,
    _session: DatabaseTransaction,
}

pub async fn lock_questions(db: &DatabaseConnection) -> Result<QuestionsLock, anyhow::Error> {
    let local = DB_LOCK.lock().await;
    // xact-scoped so the lock stays on the connection pinned by `session`
    let session = db.begin().await?;
    session
        .execute(Statement::from_string(
            db.get_database_backend(),
            format!("SELECT pg_advisory_xact_lock({QUESTIONS_LOCK_KEY})"),
        ))
        .await?;
    Ok(QuestionsLock { _local: local, _session: session })
}

/// Connection for live Postgres tests, or `None` when no database is configured.
pub async fn get_db() -> Result<Option<DatabaseConnection>, anyhow::Error> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(None);
    }
    let url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("DATABASE_URL missing; skip live store tests");
            return Ok(None);
        }
    };

    let cfg = DatabaseConfig { url, max_connections: 20, min_connections: 1, acquire_timeout_secs: 10, ..DatabaseConfig::default() };

    // Run migrations exactly once, with a throwaway connection
    MIGRATED
        .get_or_try_init(|| async {
            let db = connect_with_config(&cfg).await?;
            migration::Migrator::up(&db, None).await?;
            Ok::<(), anyhow::Error>(())
        })
        .await?;

    // Return a fresh connection for the current test's runtime
    let db = connect_with_config(&cfg).await?;
    Ok(Some(db))
}
