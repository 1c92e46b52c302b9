//! CORS policy for browser clients.
//!
//! Policy:
//! - Development: permissive (Allow-Origin: *), WITHOUT credentials.
//! - Production: allowlist origins from Config (comma-separated env var), WITHOUT credentials.
//!
//! The configured hash header (`HASH_HEADER`) is always an allowed request header,
//! so browser clients can send the hash without putting it in the URL.

use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::Config;
use crate::middleware::http::REQUEST_ID_HEADER;

/// Apply CORS policy to the given Router.
///
/// Do not combine wildcard origin (`Any`) with `allow_credentials(true)`.
pub fn apply(router: Router, config: &Config) -> Router {
    let cors = if config.app_env.is_production() {
        // allowlist が空なら何も許可しない (CORS header を出さない)
        let allowed: Vec<HeaderValue> = config
            .cors_allowed_origins
            .iter()
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();

        let allow_origin = AllowOrigin::predicate(move |origin: &HeaderValue, _req| {
            allowed.iter().any(|v| v == origin)
        });

        CorsLayer::new().allow_origin(allow_origin)
    } else {
        CorsLayer::new().allow_origin(Any)
    }
    .allow_methods([Method::GET, Method::OPTIONS])
    .allow_headers(allowed_headers(config))
    .max_age(std::time::Duration::from_secs(60 * 10));

    router.layer(cors)
}

fn allowed_headers(config: &Config) -> Vec<HeaderName> {
    let mut headers = vec![
        header::CONTENT_TYPE,
        header::ACCEPT,
        HeaderName::from_static(REQUEST_ID_HEADER),
    ];
    // Config 側で header 名として検証済み。空なら default の header 名
    let hash_header = config.hash.clone().normalized().header_field;
    if let Ok(name) = HeaderName::from_bytes(hash_header.as_bytes()) {
        headers.push(name);
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn hash_header_is_allowed() {
        let vars = HashMap::from([("HASH_HEADER", "X-Link-Hash")]);
        let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string())).unwrap();

        let headers = allowed_headers(&config);
        assert!(headers.contains(&HeaderName::from_static("x-link-hash")));
        assert!(headers.contains(&header::ACCEPT));
    }
}
