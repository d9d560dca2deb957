use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::db;
use crate::error::AppResult;
use crate::AppState;

/// Storage liveness; 503 when the database cannot be reached in time.
pub async fn health(State(state): State<AppState>) -> AppResult<Json<Value>> {
    db::ping(&state.db, state.config.db_timeout_secs).await?;
    Ok(Json(json!({ "status": "connected" })))
}
