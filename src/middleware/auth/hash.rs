//! hash 認証 → AuthCtx を extensions に入れる
//!
//! - route param / query / header から hash を取り出し、registry の "hash" strategy で検証する
//! - 成功: AuthCtx を request extensions に格納して handler へ
//! - 拒否: 401 (info.message があればそれを返す)
//! - hash が無い: 400 MISSING_HASH
//! - 検証中の障害: 500

use axum::{
    Router,
    body::Body,
    extract::{FromRequestParts, RawPathParams, State},
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::repos::user_repo::User;
use crate::services::auth::hash::STRATEGY_NAME;
use crate::services::auth::{AuthError, AuthInfo, HttpRequest, OutcomeReporter};
use crate::state::AppState;

/// hash 認証が必要な route に middleware を適用する。
///
/// `route_layer` なので、マッチした route にだけ掛かる (RawPathParams が取れる)。
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.route_layer(middleware::from_fn_with_state(state, hash_middleware))
}

async fn hash_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    // path params が無い route (/confirm) では None
    let path = RawPathParams::from_request_parts(&mut parts, &state).await.ok();
    let attempt = HttpRequest::from_parts(&parts, path.as_ref());

    let Some(outcome) = state.strategies.authenticate(STRATEGY_NAME, &attempt).await else {
        tracing::error!(strategy = STRATEGY_NAME, "strategy is not registered");
        return Err(AppError::Internal);
    };

    let req = outcome.report(Reporter {
        req: Request::from_parts(parts, body),
    })?;

    Ok(next.run(req).await)
}

/// Outcome を HTTP の世界に写す。
struct Reporter {
    req: Request<Body>,
}

impl OutcomeReporter<User> for Reporter {
    type Output = Result<Request<Body>, AppError>;

    fn success(mut self, user: User, info: AuthInfo) -> Self::Output {
        tracing::info!(user_id = %user.id, "hash authentication succeeded");

        // middleware → extractor への受け渡し
        let auth_ctx = AuthCtx::new(user.id).with_info(info);
        self.req.extensions_mut().insert(auth_ctx);
        Ok(self.req)
    }

    fn fail(self, info: AuthInfo) -> Self::Output {
        tracing::warn!(
            path = %self.req.uri().path(),
            reason = info.message.as_deref().unwrap_or("-"),
            "hash authentication rejected"
        );
        Err(AppError::unauthorized(
            info.message.unwrap_or_else(|| "unauthorized".to_string()),
        ))
    }

    fn error(self, cause: AuthError) -> Self::Output {
        if cause.is_missing_credential() {
            tracing::debug!(path = %self.req.uri().path(), "hash is missing");
        } else {
            tracing::error!(error = %cause, "hash verification failed");
        }
        Err(AppError::from(cause))
    }
}
