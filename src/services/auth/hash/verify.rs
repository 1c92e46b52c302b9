/*
 * Responsibility
 * - application が渡す verify callback の 2 つの呼び出し形 (Verify)
 *   - (token, done)
 *   - (request, token, done)
 * - callback が結果を返すための completion handle (Done)
 * - callback の (cause, subject, info) を Outcome に振り分ける (triage)
 *
 * Notes
 * - 呼び出し形は構築時に pass_request_to_callback で決める (実行時に引数の数は見ない)
 * - Done は self を消費して送るので、完了は高々 1 回
 */
use std::fmt;
use std::sync::Arc;

use tokio::sync::oneshot;

use crate::services::auth::error::{AuthError, BoxError};
use crate::services::auth::outcome::{AuthInfo, Outcome};

/// Verification callback. The callback may complete `Done` right away or from a
/// spawned task after an external lookup.
pub enum Verify<R: ?Sized, U> {
    Token(Arc<dyn Fn(String, Done<U>) + Send + Sync>),
    WithRequest(Arc<dyn Fn(&R, String, Done<U>) + Send + Sync>),
}

impl<R: ?Sized, U> Verify<R, U> {
    pub fn token<F>(f: F) -> Self
    where
        F: Fn(String, Done<U>) + Send + Sync + 'static,
    {
        Self::Token(Arc::new(f))
    }

    pub fn with_request<F>(f: F) -> Self
    where
        F: Fn(&R, String, Done<U>) + Send + Sync + 'static,
    {
        Self::WithRequest(Arc::new(f))
    }

    pub fn takes_request(&self) -> bool {
        matches!(self, Self::WithRequest(_))
    }

    pub(crate) fn call(&self, req: &R, token: String, done: Done<U>) {
        match self {
            Self::Token(f) => f(token, done),
            Self::WithRequest(f) => f(req, token, done),
        }
    }
}

impl<R: ?Sized, U> Clone for Verify<R, U> {
    fn clone(&self) -> Self {
        match self {
            Self::Token(f) => Self::Token(Arc::clone(f)),
            Self::WithRequest(f) => Self::WithRequest(Arc::clone(f)),
        }
    }
}

impl<R: ?Sized, U> fmt::Debug for Verify<R, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token(_) => f.write_str("Verify::Token(..)"),
            Self::WithRequest(_) => f.write_str("Verify::WithRequest(..)"),
        }
    }
}

/// What the callback reported: `(cause, subject, info)`.
#[derive(Debug)]
pub struct Completion<U> {
    pub cause: Option<BoxError>,
    pub subject: Option<U>,
    pub info: Option<AuthInfo>,
}

impl<U> Completion<U> {
    /// cause があれば他は見ない。subject が無ければ reject
    pub fn triage(self) -> Outcome<U> {
        let info = self.info.unwrap_or_default();
        match (self.cause, self.subject) {
            (Some(cause), _) => Outcome::Errored {
                cause: AuthError::Verification(cause),
            },
            (None, None) => Outcome::Rejected { info },
            (None, Some(subject)) => Outcome::Authenticated { subject, info },
        }
    }
}

/// Single-use completion handle handed to the verify callback.
#[must_use = "the verification attempt only ends when `Done` is fired"]
pub struct Done<U> {
    tx: oneshot::Sender<Completion<U>>,
}

impl<U> Done<U> {
    pub(crate) fn channel() -> (Self, oneshot::Receiver<Completion<U>>) {
        let (tx, rx) = oneshot::channel();
        (Self { tx }, rx)
    }

    pub fn complete(self, cause: Option<BoxError>, subject: Option<U>, info: Option<AuthInfo>) {
        // receiver が居ない = host が試行を捨てた。報告先が無いので何もしない
        let _ = self.tx.send(Completion {
            cause,
            subject,
            info,
        });
    }

    pub fn accept(self, subject: U, info: Option<AuthInfo>) {
        self.complete(None, Some(subject), info);
    }

    pub fn reject(self, info: Option<AuthInfo>) {
        self.complete(None, None, info);
    }

    pub fn error(self, cause: impl Into<BoxError>) {
        self.complete(Some(cause.into()), None, None);
    }

    /// `Ok(Some(subject))` accepts, `Ok(None)` rejects without info, `Err` errors.
    pub fn resolve<E>(self, result: Result<Option<U>, E>)
    where
        E: Into<BoxError>,
    {
        match result {
            Ok(Some(subject)) => self.accept(subject, None),
            Ok(None) => self.reject(None),
            Err(e) => self.error(e),
        }
    }
}

impl<U> fmt::Debug for Done<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Done")
            .field("closed", &self.tx.is_closed())
            .finish()
    }
}
