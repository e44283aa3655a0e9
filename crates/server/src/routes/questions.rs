use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Serialize;
use serde_json::Value;
use service::question::Question;

use crate::errors::ApiError;
use crate::state::AppState;

#[derive(Serialize, Debug)]
pub struct SaveResponse {
    pub success: bool,
    pub message: String,
    pub count: usize,
}

/// GET /api/questions/load
///
/// Always 200; storage failures surface as an empty array.
pub async fn load_questions(State(state): State<AppState>) -> Json<Vec<Question>> {
    Json(state.store.load().await)
}

/// POST /api/questions/save
///
/// Replaces the whole collection. Any JSON value is handed to the store,
/// which rejects non-arrays.
pub async fn save_questions(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SaveResponse>, ApiError> {
    let Json(payload) = payload?;
    let confirmation = state.store.replace_from_value(payload).await?;
    Ok(Json(SaveResponse {
        success: true,
        message: format!("Saved {} questions.", confirmation.count),
        count: confirmation.count,
    }))
}
