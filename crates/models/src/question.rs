use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, QueryOrder, Statement, Value};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Rows per INSERT statement; keeps bind parameters well under the
/// Postgres limit of 65535.
pub const INSERT_CHUNK: usize = 1000;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "questions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Json")]
    pub data: Json,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// All rows in display order.
pub async fn fetch_ordered<C: ConnectionTrait>(db: &C) -> Result<Vec<Model>, ModelError> {
    let rows = Entity::find().order_by_asc(Column::Id).all(db).await?;
    Ok(rows)
}

/// Remove every row and restart the identity counter.
///
/// `TRUNCATE` takes an exclusive table lock, so a second writer blocks here
/// until the first transaction commits or rolls back.
pub async fn reset<C: ConnectionTrait>(db: &C) -> Result<(), ModelError> {
    let backend = db.get_database_backend();
    db.execute(Statement::from_string(
        backend,
        "TRUNCATE TABLE questions RESTART IDENTITY".to_string(),
    ))
    .await?;
    Ok(())
}

/// Insert `values` with `id = position + 1`. Returns the number of rows written.
///
/// Each value is bound as serialized text and cast to `json` in SQL. A
/// `serde_json::Value` parameter would be bound as `jsonb`, which sorts
/// object keys and rejects `\u0000` before the cast to `json` happens.
pub async fn insert_ordered<C: ConnectionTrait>(db: &C, values: &[Json]) -> Result<u64, ModelError> {
    let backend = db.get_database_backend();
    let mut written = 0u64;
    for (chunk_idx, chunk) in values.chunks(INSERT_CHUNK).enumerate() {
        let base = chunk_idx * INSERT_CHUNK;
        let mut params: Vec<Value> = Vec::with_capacity(chunk.len() * 2);
        let mut rows = Vec::with_capacity(chunk.len());
        for (i, v) in chunk.iter().enumerate() {
            params.push(((base + i + 1) as i32).into());
            params.push(serde_json::to_string(v)?.into());
            rows.push(format!("(${}, CAST(${} AS json))", 2 * i + 1, 2 * i + 2));
        }
        let sql = insert_sql(&rows);
        written += db.execute(Statement::from_sql_and_values(backend, sql, params)).await?.rows_affected();
    }
    Ok(written)
}

fn insert_sql(rows: &[String]) -> String {
    format!(r#"INSERT INTO "questions" ("id", "data") VALUES {}"#, rows.join(", "))
}
