/*
 * Responsibility
 * - 1 回の認証試行の結果 (Outcome) と、それを受け取る host 側の契約 (OutcomeReporter)
 * - Outcome は report() で消費され、success / fail / error のどれか 1 つだけが呼ばれる
 */
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::services::auth::error::AuthError;

/// Additional information attached to a success or a rejection
/// (e.g. `{ "message": "Wrong hash" }`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AuthInfo {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            extra: Map::new(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.message.is_none() && self.extra.is_empty()
    }
}

/// 認証試行の終端状態。試行ごとにちょうど 1 つ作られる
#[derive(Debug)]
pub enum Outcome<U> {
    Authenticated { subject: U, info: AuthInfo },
    Rejected { info: AuthInfo },
    Errored { cause: AuthError },
}

impl<U> Outcome<U> {
    /// Hands the outcome to the host framework. Exactly one reporter primitive fires.
    pub fn report<P>(self, reporter: P) -> P::Output
    where
        P: OutcomeReporter<U>,
    {
        match self {
            Outcome::Authenticated { subject, info } => reporter.success(subject, info),
            Outcome::Rejected { info } => reporter.fail(info),
            Outcome::Errored { cause } => reporter.error(cause),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Outcome::Authenticated { .. } => "authenticated",
            Outcome::Rejected { .. } => "rejected",
            Outcome::Errored { .. } => "errored",
        }
    }
}

/// Host 側の success / fail / error。self を消費するので 2 回目は呼べない
pub trait OutcomeReporter<U> {
    type Output;

    fn success(self, subject: U, info: AuthInfo) -> Self::Output;
    fn fail(self, info: AuthInfo) -> Self::Output;
    fn error(self, cause: AuthError) -> Self::Output;
}
