use crate::question::{self, INSERT_CHUNK};
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Transaction, Value};
use serde_json::json;

#[tokio::test]
async fn fetch_ordered_returns_rows_from_query() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![
            question::Model { id: 1, data: json!({"q": "first"}) },
            question::Model { id: 2, data: json!({"q": "second"}) },
        ]])
        .into_connection();

    let rows = question::fetch_ordered(&db).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].data, json!({"q": "first"}));
    assert_eq!(rows[1].id, 2);

    let log = db.into_transaction_log();
    assert_eq!(log.len(), 1);
    let sql = format!("{:?}", log[0]);
    assert!(sql.contains("ORDER BY"), "expected ordered query, got {sql}");
}

#[tokio::test]
async fn insert_ordered_skips_empty_input() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let written = question::insert_ordered(&db, &[]).await.unwrap();
    assert_eq!(written, 0);
    assert!(db.into_transaction_log().is_empty());
}

#[tokio::test]
async fn insert_ordered_binds_serialized_text_in_key_order() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult { last_insert_id: 0, rows_affected: 2 }])
        .into_connection();

    let values = [json!({"zeta": 1, "alpha": 2, "mid": 3}), json!({"q": "a\u{0000}b"})];
    let written = question::insert_ordered(&db, &values).await.unwrap();
    assert_eq!(written, 2);

    assert_eq!(
        db.into_transaction_log(),
        [Transaction::from_sql_and_values(
            DatabaseBackend::Postgres,
            r#"INSERT INTO "questions" ("id", "data") VALUES ($1, CAST($2 AS json)), ($3, CAST($4 AS json))"#,
            [
                Value::from(1i32),
                Value::from(r#"{"zeta":1,"alpha":2,"mid":3}"#),
                Value::from(2i32),
                Value::from(r#"{"q":"a\u0000b"}"#),
            ]
        )]
    );
}

#[tokio::test]
async fn insert_ordered_splits_large_collections_into_chunks() {
    let values: Vec<_> = (0..INSERT_CHUNK * 2 + 5).map(|i| json!({ "n": i })).collect();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([
            MockExecResult { last_insert_id: 0, rows_affected: INSERT_CHUNK as u64 },
            MockExecResult { last_insert_id: 0, rows_affected: INSERT_CHUNK as u64 },
            MockExecResult { last_insert_id: 0, rows_affected: 5 },
        ])
        .into_connection();

    let written = question::insert_ordered(&db, &values).await.unwrap();
    assert_eq!(written, values.len() as u64);
    assert_eq!(db.into_transaction_log().len(), 3);
}

#[tokio::test]
async fn reset_issues_truncate_with_identity_restart() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult { last_insert_id: 0, rows_affected: 0 }])
        .into_connection();

    question::reset(&db).await.unwrap();
    let sql = format!("{:?}", db.into_transaction_log());
    assert!(sql.contains("TRUNCATE TABLE questions RESTART IDENTITY"));
}
