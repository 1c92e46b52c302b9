/*
 * Responsibility
 * - HashStrategy の構築 (builder) と 1 回の認証試行 (authenticate)
 *   - 抽出: extract_token
 *   - 呼び出し: Verify (pass_request_to_callback で決めた形)
 *   - 振り分け: Completion::triage
 *
 * Notes
 * - retry しない。callback の error は握りつぶさず Errored で返す
 * - timeout/cancel は持たない。必要なら host 側で包む
 */
use std::fmt;

use async_trait::async_trait;

use crate::services::auth::error::{AuthError, BuildError};
use crate::services::auth::hash::extract::{extract_token, fingerprint};
use crate::services::auth::hash::options::{HashOptions, STRATEGY_NAME};
use crate::services::auth::hash::verify::{Done, Verify};
use crate::services::auth::outcome::Outcome;
use crate::services::auth::request::CredentialSource;
use crate::services::auth::strategy::Strategy;

/// Authenticates a request by the hash it carries.
///
/// ```ignore
/// let strategy = HashStrategy::builder()
///     .verify(Verify::token(move |hash, done| {
///         let users = users.clone();
///         tokio::spawn(async move { done.resolve(users.find_by_hash(&hash).await) });
///     }))
///     .build()?;
/// ```
pub struct HashStrategy<R: ?Sized, U> {
    options: HashOptions,
    verify: Verify<R, U>,
}

impl<R: ?Sized, U> fmt::Debug for HashStrategy<R, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashStrategy")
            .field("options", &self.options)
            .field("verify", &self.verify)
            .finish()
    }
}

impl<R: ?Sized, U> HashStrategy<R, U> {
    pub fn builder() -> HashStrategyBuilder<R, U> {
        HashStrategyBuilder::default()
    }

    pub fn new(options: HashOptions, verify: Verify<R, U>) -> Result<Self, BuildError> {
        Self::builder().options(options).verify(verify).build()
    }

    pub fn options(&self) -> &HashOptions {
        &self.options
    }
}

impl<R, U> HashStrategy<R, U>
where
    R: CredentialSource + ?Sized,
{
    /// Extract → dispatch → triage, strictly in that order.
    pub async fn run(&self, req: &R) -> Outcome<U> {
        let Some(token) = extract_token(req, &self.options) else {
            tracing::debug!(strategy = STRATEGY_NAME, "no hash credential in request");
            return Outcome::Errored {
                cause: AuthError::missing(&self.options.token_param, &self.options.header_field),
            };
        };

        tracing::debug!(
            strategy = STRATEGY_NAME,
            credential = %fingerprint(&token),
            "verifying hash credential"
        );

        let (done, rx) = Done::channel();
        self.verify.call(req, token, done);

        let outcome = match rx.await {
            Ok(completion) => completion.triage(),
            Err(_) => Outcome::Errored {
                cause: AuthError::VerificationAbandoned,
            },
        };

        tracing::debug!(strategy = STRATEGY_NAME, outcome = outcome.kind(), "hash attempt finished");
        outcome
    }
}

#[async_trait]
impl<R, U> Strategy<R> for HashStrategy<R, U>
where
    R: CredentialSource + ?Sized + Sync,
    U: Send + 'static,
{
    type Subject = U;

    fn name(&self) -> &str {
        STRATEGY_NAME
    }

    async fn authenticate(&self, req: &R) -> Outcome<U> {
        self.run(req).await
    }
}

pub struct HashStrategyBuilder<R: ?Sized, U> {
    options: HashOptions,
    verify: Option<Verify<R, U>>,
}

impl<R: ?Sized, U> Default for HashStrategyBuilder<R, U> {
    fn default() -> Self {
        Self {
            options: HashOptions::default(),
            verify: None,
        }
    }
}

impl<R: ?Sized, U> HashStrategyBuilder<R, U> {
    pub fn options(mut self, options: HashOptions) -> Self {
        self.options = options;
        self
    }

    pub fn token_param(mut self, name: impl Into<String>) -> Self {
        self.options.token_param = name.into();
        self
    }

    pub fn header_field(mut self, name: impl Into<String>) -> Self {
        self.options.header_field = name.into();
        self
    }

    pub fn pass_request_to_callback(mut self, pass: bool) -> Self {
        self.options.pass_request_to_callback = pass;
        self
    }

    pub fn verify(mut self, verify: Verify<R, U>) -> Self {
        self.verify = Some(verify);
        self
    }

    pub fn build(self) -> Result<HashStrategy<R, U>, BuildError> {
        let verify = self.verify.ok_or(BuildError::MissingVerify)?;

        let pass = self.options.pass_request_to_callback;
        if verify.takes_request() != pass {
            return Err(BuildError::CallbackShape {
                pass_request_to_callback: pass,
            });
        }

        Ok(HashStrategy {
            options: self.options.normalized(),
            verify,
        })
    }
}
