/// Database connection tests (live Postgres, skipped without DATABASE_URL)
pub mod db_tests;

/// Query helpers for the `questions` table against a mock connection
pub mod question_tests;

/// Pool settings for live tests, or `None` when they should be skipped.
pub(crate) fn live_db_config() -> Option<configs::DatabaseConfig> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let url = std::env::var("DATABASE_URL").ok()?;
    Some(configs::DatabaseConfig { url, ..configs::DatabaseConfig::default() })
}
