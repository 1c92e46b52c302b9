/*
 * Responsibility
 * - GET /health (疎通用、認証なし)
 * - 登録済みの認証 strategy 名も返す
 */
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::state::AppState;

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let mut strategies: Vec<&str> = state.strategies.names().collect();
    strategies.sort_unstable();

    (
        StatusCode::OK,
        Json(json!({"status": "ok", "strategies": strategies})),
    )
}
