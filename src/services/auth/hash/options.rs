//! Options of the hash strategy.

use serde::{Deserialize, Serialize};

pub const STRATEGY_NAME: &str = "hash";
pub const DEFAULT_TOKEN_PARAM: &str = "hash";
pub const DEFAULT_HEADER_FIELD: &str = "X-Auth-Hash";

/// Where the hash is looked up, and which callback shape is expected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashOptions {
    /// Route/query parameter carrying the hash
    #[serde(default = "default_token_param")]
    pub token_param: String,
    /// Header carrying the hash
    #[serde(default = "default_header_field")]
    pub header_field: String,
    /// When `true`, the request is the first argument of the verify callback
    #[serde(default)]
    pub pass_request_to_callback: bool,
}

fn default_token_param() -> String {
    DEFAULT_TOKEN_PARAM.to_string()
}

fn default_header_field() -> String {
    DEFAULT_HEADER_FIELD.to_string()
}

impl Default for HashOptions {
    fn default() -> Self {
        Self {
            token_param: default_token_param(),
            header_field: default_header_field(),
            pass_request_to_callback: false,
        }
    }
}

impl HashOptions {
    pub fn with_token_param(mut self, name: impl Into<String>) -> Self {
        self.token_param = name.into();
        self
    }

    pub fn with_header_field(mut self, name: impl Into<String>) -> Self {
        self.header_field = name.into();
        self
    }

    pub fn with_pass_request_to_callback(mut self, pass: bool) -> Self {
        self.pass_request_to_callback = pass;
        self
    }

    /// Empty names fall back to their defaults.
    pub(crate) fn normalized(mut self) -> Self {
        if self.token_param.is_empty() {
            self.token_param = default_token_param();
        }
        if self.header_field.is_empty() {
            self.header_field = default_header_field();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = HashOptions::default();
        assert_eq!(options.token_param, "hash");
        assert_eq!(options.header_field, "X-Auth-Hash");
        assert!(!options.pass_request_to_callback);
    }

    #[test]
    fn test_empty_names_fall_back_to_defaults() {
        let options = HashOptions::default()
            .with_token_param("")
            .with_header_field("")
            .normalized();
        assert_eq!(options, HashOptions::default());
    }

    #[test]
    fn test_custom_names_survive_normalization() {
        let options = HashOptions::default()
            .with_token_param("link")
            .with_header_field("X-Link")
            .with_pass_request_to_callback(true)
            .normalized();
        assert_eq!(options.token_param, "link");
        assert_eq!(options.header_field, "X-Link");
        assert!(options.pass_request_to_callback);
    }

    #[test]
    fn test_deserialize_partial_options() {
        let json = r#"{ "token_param": "link" }"#;
        let options: HashOptions = serde_json::from_str(json).unwrap();
        assert_eq!(options.token_param, "link");
        assert_eq!(options.header_field, "X-Auth-Hash");
        assert!(!options.pass_request_to_callback);
    }
}
