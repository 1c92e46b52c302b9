/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - /health は認証なし、/confirm 系だけ hash 認証を route_layer で適用する
 * - /confirm/{..} の segment 名は HASH_PARAM (strategy が引く parameter 名) に合わせる
 */
use axum::{Router, routing::get};

use crate::api::v1::handlers::{confirm::confirm, health::health};
use crate::config::Config;
use crate::middleware;
use crate::state::AppState;

pub fn routes(state: AppState, config: &Config) -> Router<AppState> {
    let confirm_routes = Router::new()
        .route("/confirm", get(confirm))
        .route(&confirm_path(config), get(confirm));

    Router::new()
        .route("/health", get(health))
        .merge(middleware::auth::hash::apply(confirm_routes, state))
}

fn confirm_path(config: &Config) -> String {
    let param = config.hash.clone().normalized().token_param;
    format!("/confirm/{{{param}}}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<&str, &str> = pairs.iter().copied().collect();
        Config::from_lookup(|key| vars.get(key).map(|v| v.to_string())).unwrap()
    }

    #[test]
    fn path_segment_follows_token_param() {
        assert_eq!(confirm_path(&config(&[])), "/confirm/{hash}");
        assert_eq!(confirm_path(&config(&[("HASH_PARAM", "link")])), "/confirm/{link}");
        assert_eq!(confirm_path(&config(&[("HASH_PARAM", "")])), "/confirm/{hash}");
    }
}
