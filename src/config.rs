/*
 * Responsibility
 * - 環境変数の読み込み (PORT, APP_ENV, CORS, timeout, hash strategy の設定)
 * - 設定値のバリデーション (不正なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use axum::http::HeaderName;

use crate::services::auth::HashOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn parse(value: Option<&str>) -> Self {
        match value
            .unwrap_or("development")
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    pub request_timeout: Duration,
    pub request_body_limit_bytes: usize,

    pub hash: HashOptions,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// `lookup` は key → value。テストでは env を触らずに HashMap などを渡す
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = match lookup("PORT") {
            Some(v) => v.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(lookup("APP_ENV").as_deref());

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let request_timeout_seconds: u64 = match lookup("REQUEST_TIMEOUT_SECONDS") {
            Some(v) => v
                .parse()
                .map_err(|_| ConfigError::Invalid("REQUEST_TIMEOUT_SECONDS"))?,
            None => 30,
        };

        let request_body_limit_bytes: usize = match lookup("REQUEST_BODY_LIMIT_BYTES") {
            Some(v) => v
                .parse()
                .map_err(|_| ConfigError::Invalid("REQUEST_BODY_LIMIT_BYTES"))?,
            None => 1024 * 1024,
        };

        let mut hash = HashOptions::default();
        if let Some(param) = lookup("HASH_PARAM") {
            let param = param.trim();
            // /confirm/{..} の route segment 名にもなるので使える文字を絞る
            if !param
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            {
                return Err(ConfigError::Invalid("HASH_PARAM"));
            }
            hash = hash.with_token_param(param);
        }
        if let Some(header) = lookup("HASH_HEADER") {
            let header = header.trim();
            // CORS の allow_headers にも載せるので、header 名として正しいことを起動時に確認
            if !header.is_empty() && HeaderName::from_bytes(header.as_bytes()).is_err() {
                return Err(ConfigError::Invalid("HASH_HEADER"));
            }
            hash = hash.with_header_field(header);
        }
        if let Some(pass) = lookup("HASH_PASS_REQUEST") {
            hash = hash.with_pass_request_to_callback(
                parse_bool(&pass).ok_or(ConfigError::Invalid("HASH_PASS_REQUEST"))?,
            );
        }

        Ok(Self {
            addr,
            app_env,
            cors_allowed_origins,
            request_timeout: Duration::from_secs(request_timeout_seconds),
            request_body_limit_bytes,
            hash,
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.addr.port(), 3000);
        assert_eq!(config.app_env, AppEnv::Development);
        assert!(config.cors_allowed_origins.is_empty());
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.request_body_limit_bytes, 1024 * 1024);
        assert_eq!(config.hash, HashOptions::default());
    }

    #[test]
    fn hash_options_come_from_env() {
        let config = config_from(&[
            ("HASH_PARAM", "link"),
            ("HASH_HEADER", "X-Link-Hash"),
            ("HASH_PASS_REQUEST", "yes"),
        ])
        .unwrap();
        assert_eq!(config.hash.token_param, "link");
        assert_eq!(config.hash.header_field, "X-Link-Hash");
        assert!(config.hash.pass_request_to_callback);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert_eq!(
            config_from(&[("HASH_HEADER", "bad header")]).unwrap_err(),
            ConfigError::Invalid("HASH_HEADER")
        );
        assert_eq!(
            config_from(&[("HASH_PASS_REQUEST", "maybe")]).unwrap_err(),
            ConfigError::Invalid("HASH_PASS_REQUEST")
        );
        assert_eq!(
            config_from(&[("HASH_PARAM", "a/{b}")]).unwrap_err(),
            ConfigError::Invalid("HASH_PARAM")
        );
        assert_eq!(
            config_from(&[("PORT", "http")]).unwrap_err(),
            ConfigError::Invalid("PORT")
        );
    }

    #[test]
    fn production_env_and_origins() {
        let config = config_from(&[
            ("APP_ENV", "PROD"),
            ("CORS_ALLOWED_ORIGINS", "https://a.example, ,https://b.example"),
        ])
        .unwrap();
        assert!(config.app_env.is_production());
        assert_eq!(
            config.cors_allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
    }
}
