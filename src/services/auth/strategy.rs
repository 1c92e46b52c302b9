/*
 * Responsibility
 * - 認証方式 (strategy) の共通契約: authenticate(request) -> Outcome
 * - 名前で strategy を登録・取得する registry (Strategies)
 *
 * Notes
 * - host (middleware) は registry から名前で引いて authenticate し、Outcome を report する
 */
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::services::auth::outcome::Outcome;

/// A named, pluggable authentication method.
#[async_trait]
pub trait Strategy<R: ?Sized + Sync>: Send + Sync {
    type Subject: Send;

    fn name(&self) -> &str;

    /// Runs one stateless attempt against `req`.
    async fn authenticate(&self, req: &R) -> Outcome<Self::Subject>;
}

pub type SharedStrategy<R, U> = Arc<dyn Strategy<R, Subject = U>>;

/// Name-keyed strategy registry.
pub struct Strategies<R: ?Sized + Sync, U> {
    by_name: HashMap<String, SharedStrategy<R, U>>,
}

impl<R: ?Sized + Sync, U: Send> Strategies<R, U> {
    pub fn new() -> Self {
        Self {
            by_name: HashMap::new(),
        }
    }

    /// Registers under `strategy.name()`; an existing entry with that name is replaced.
    pub fn register(&mut self, strategy: SharedStrategy<R, U>) -> &mut Self {
        let name = strategy.name().to_string();
        if self.by_name.insert(name.clone(), strategy).is_some() {
            tracing::debug!(strategy = %name, "replaced registered strategy");
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&SharedStrategy<R, U>> {
        self.by_name.get(name)
    }

    /// `None` when no strategy is registered under `name`.
    pub async fn authenticate(&self, name: &str, req: &R) -> Option<Outcome<U>> {
        let strategy = self.get(name)?;
        Some(strategy.authenticate(req).await)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys().map(String::as_str)
    }
}

impl<R: ?Sized + Sync, U: Send> Default for Strategies<R, U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ?Sized + Sync, U> fmt::Debug for Strategies<R, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Strategies")
            .field("names", &self.by_name.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::outcome::AuthInfo;

    struct Fixed(&'static str, bool);

    #[async_trait]
    impl Strategy<str> for Fixed {
        type Subject = String;

        fn name(&self) -> &str {
            self.0
        }

        async fn authenticate(&self, req: &str) -> Outcome<String> {
            if self.1 {
                Outcome::Authenticated {
                    subject: req.to_string(),
                    info: AuthInfo::default(),
                }
            } else {
                Outcome::Rejected {
                    info: AuthInfo::default(),
                }
            }
        }
    }

    #[tokio::test]
    async fn authenticate_dispatches_by_name() {
        let mut strategies: Strategies<str, String> = Strategies::new();
        strategies
            .register(Arc::new(Fixed("allow", true)))
            .register(Arc::new(Fixed("deny", false)));

        assert!(matches!(
            strategies.authenticate("allow", "bob").await,
            Some(Outcome::Authenticated { subject, .. }) if subject == "bob"
        ));
        assert!(matches!(
            strategies.authenticate("deny", "bob").await,
            Some(Outcome::Rejected { .. })
        ));
        assert!(strategies.authenticate("unknown", "bob").await.is_none());
    }

    #[tokio::test]
    async fn register_replaces_same_name() {
        let mut strategies: Strategies<str, String> = Strategies::default();
        strategies.register(Arc::new(Fixed("hash", false)));
        strategies.register(Arc::new(Fixed("hash", true)));

        assert_eq!(strategies.names().count(), 1);
        assert!(matches!(
            strategies.authenticate("hash", "joe").await,
            Some(Outcome::Authenticated { .. })
        ));
    }
}
