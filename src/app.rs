/*
 * Responsibility
 * - tracing / panic hook の初期化
 * - Config読み込み → 依存生成 (UserStore, strategy registry) → Router 組み立て
 * - Middleware の適用 (HTTP / CORS / hash 認証)
 * - axum::serve() で起動
 */
use std::{panic, process, sync::Arc};

use anyhow::{Context, Result};
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::config::Config;
use crate::middleware;
use crate::repos::user_repo::{InMemoryUserStore, SharedUserStore};
use crate::services::auth::build_strategies;
use crate::state::AppState;

fn init_tracing() {
    // RUST_LOG 優先。例: RUST_LOG=info,hash_auth=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // stderr が見えない起動方法でも panic を tracing に残す
        tracing::error!(?info, "panic");

        // development は即死させて気づけるようにする
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env().context("failed to load config")?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        token_param = %config.hash.token_param,
        header_field = %config.hash.header_field,
        pass_request = config.hash.pass_request_to_callback,
        "starting API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let users: SharedUserStore = Arc::new(InMemoryUserStore::seeded());
    let state = build_state(&config, users)?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// 起動時に strategy を組み立てる。設定が不正ならここで失敗する
pub fn build_state(config: &Config, users: SharedUserStore) -> Result<AppState> {
    let strategies =
        build_strategies(config, users.clone()).context("failed to build auth strategies")?;
    Ok(AppState::new(strategies, users))
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let app = Router::new()
        .nest("/api/v1", api::v1::routes(state.clone(), config))
        .with_state(state);

    let app = middleware::http::apply(app, config);
    middleware::cors::apply(app, config)
}
