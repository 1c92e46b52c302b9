/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - strategies: 名前で引ける認証 strategy の registry
 *   - users: handler が主体を引き直すための UserStore
 * - Clone 前提で持つ (内部は Arc)
 */
use std::sync::Arc;

use crate::repos::user_repo::{SharedUserStore, User};
use crate::services::auth::{HttpRequest, Strategies};

#[derive(Clone)]
pub struct AppState {
    pub strategies: Arc<Strategies<HttpRequest, User>>,
    pub users: SharedUserStore,
}

impl AppState {
    pub fn new(strategies: Arc<Strategies<HttpRequest, User>>, users: SharedUserStore) -> Self {
        Self { strategies, users }
    }
}
