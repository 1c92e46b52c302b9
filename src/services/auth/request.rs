/*
 * Responsibility
 * - strategy から見える request の読み取り面 (CredentialSource) を定義する
 *   - parameter (route/query)
 *   - 名前付き header accessor
 *   - raw header map
 * - axum の Parts から HttpRequest を組み立てる adapter
 *
 * Notes
 * - どの面も「無い」ことがある (default 実装は None)。最小の request でも抽出は panic しない
 * - request は読むだけで変更しない
 */
use std::collections::HashMap;

use axum::{
    extract::{Query, RawPathParams},
    http::{HeaderMap, Uri, request::Parts},
};

pub trait CredentialSource {
    /// Route or query parameter by name.
    fn param(&self, _name: &str) -> Option<&str> {
        None
    }

    /// Header through the request's accessor (only values it can render as text).
    fn header(&self, _name: &str) -> Option<&str> {
        None
    }

    /// The raw header map, when the request carries one.
    fn raw_headers(&self) -> Option<&HeaderMap> {
        None
    }
}

/// axum request から抜き出した、認証に必要な読み取り専用ビュー
#[derive(Debug, Clone, Default)]
pub struct HttpRequest {
    uri: Uri,
    path_params: HashMap<String, String>,
    query_params: HashMap<String, String>,
    headers: HeaderMap,
}

impl HttpRequest {
    pub fn new(uri: Uri, headers: HeaderMap) -> Self {
        // 壊れた query string は「parameter 無し」として扱う
        let query_params = Query::<HashMap<String, String>>::try_from_uri(&uri)
            .map(|Query(q)| q)
            .unwrap_or_default();

        Self {
            uri,
            path_params: HashMap::new(),
            query_params,
            headers,
        }
    }

    /// Builds the view from request parts; path params are present only after routing.
    pub fn from_parts(parts: &Parts, path: Option<&RawPathParams>) -> Self {
        let req = Self::new(parts.uri.clone(), parts.headers.clone());
        match path {
            Some(params) => req.with_path_params(
                params
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string())),
            ),
            None => req,
        }
    }

    pub fn with_path_params<I>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.path_params.extend(params);
        self
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }
}

impl CredentialSource for HttpRequest {
    // route parameter > query parameter
    fn param(&self, name: &str) -> Option<&str> {
        self.path_params
            .get(name)
            .or_else(|| self.query_params.get(name))
            .map(String::as_str)
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    fn raw_headers(&self) -> Option<&HeaderMap> {
        Some(&self.headers)
    }
}
