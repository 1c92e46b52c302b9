/*
 * Responsibility
 * - GET /confirm, /confirm/{hash}
 * - middleware が認証した主体を引き直して返す (hash の検証はここではしない)
 */
use axum::{Json, extract::State};

use crate::api::v1::dto::account::ConfirmResponse;
use crate::api::v1::extractors::AuthCtxExtractor;
use crate::error::AppError;
use crate::state::AppState;

pub async fn confirm(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
) -> Result<Json<ConfirmResponse>, AppError> {
    let user = state
        .users
        .find_by_id(ctx.user_id)
        .await?
        .ok_or(AppError::not_found("user"))?;

    Ok(Json(ConfirmResponse {
        user: user.into(),
        message: ctx.message().map(str::to_string),
    }))
}
