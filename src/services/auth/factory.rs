/// Factory: build the strategy registry from application `Config`.
///
/// The verify callback confirms a user by hash:
/// - unknown hash -> reject "Unknown hash"
/// - user not `unconfirmed` -> reject "This user already confirmed"
/// - lookup failure -> error
/// - otherwise accept with "Welcome"
use std::sync::Arc;

use crate::config::Config;
use crate::repos::user_repo::{SharedUserStore, User, UserStatus};
use crate::services::auth::error::BuildError;
use crate::services::auth::hash::{Done, HashStrategy, Verify};
use crate::services::auth::outcome::AuthInfo;
use crate::services::auth::request::HttpRequest;
use crate::services::auth::strategy::Strategies;

pub fn build_strategies(
    config: &Config,
    users: SharedUserStore,
) -> Result<Arc<Strategies<HttpRequest, User>>, BuildError> {
    let verify = if config.hash.pass_request_to_callback {
        Verify::with_request(move |req: &HttpRequest, hash, done| {
            let path = req.uri().path().to_string();
            tokio::spawn(confirm(users.clone(), hash, done, Some(path)));
        })
    } else {
        Verify::token(move |hash, done| {
            tokio::spawn(confirm(users.clone(), hash, done, None));
        })
    };

    let hash = HashStrategy::new(config.hash.clone(), verify)?;

    let mut strategies = Strategies::new();
    strategies.register(Arc::new(hash));
    Ok(Arc::new(strategies))
}

async fn confirm(users: SharedUserStore, hash: String, done: Done<User>, path: Option<String>) {
    let user = match users.find_by_hash(&hash).await {
        Ok(user) => user,
        Err(e) => return done.error(e),
    };

    match user {
        None => done.reject(Some(AuthInfo::message("Unknown hash"))),
        Some(user) if user.status != UserStatus::Unconfirmed => {
            done.reject(Some(AuthInfo::message("This user already confirmed")))
        }
        Some(user) => {
            let mut info = AuthInfo::message("Welcome");
            if let Some(path) = path {
                info = info.with("path", path);
            }
            done.accept(user, Some(info));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use async_trait::async_trait;
    use axum::http::{HeaderMap, Uri};
    use uuid::Uuid;

    use crate::repos::error::RepoError;
    use crate::repos::user_repo::{InMemoryUserStore, JOE_ID, UserStore};
    use crate::services::auth::hash::STRATEGY_NAME;
    use crate::services::auth::outcome::Outcome;

    fn config(pass_request: bool) -> Config {
        let vars: HashMap<&str, &str> = if pass_request {
            HashMap::from([("HASH_PASS_REQUEST", "true")])
        } else {
            HashMap::new()
        };
        Config::from_lookup(|key| vars.get(key).map(|v| v.to_string())).unwrap()
    }

    fn request(uri: &'static str) -> HttpRequest {
        HttpRequest::new(Uri::from_static(uri), HeaderMap::new())
    }

    async fn attempt(config: &Config, users: SharedUserStore, uri: &'static str) -> Outcome<User> {
        let strategies = build_strategies(config, users).unwrap();
        strategies
            .authenticate(STRATEGY_NAME, &request(uri))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn unconfirmed_user_is_welcomed() {
        let users: SharedUserStore = Arc::new(InMemoryUserStore::seeded());
        match attempt(&config(false), users, "/confirm?hash=0abc12df345").await {
            Outcome::Authenticated { subject, info } => {
                assert_eq!(subject.id, JOE_ID);
                assert_eq!(info.message.as_deref(), Some("Welcome"));
                assert!(info.extra.get("path").is_none());
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn request_shaped_callback_sees_the_request() {
        let users: SharedUserStore = Arc::new(InMemoryUserStore::seeded());
        match attempt(&config(true), users, "/confirm?hash=0abc12df345").await {
            Outcome::Authenticated { info, .. } => {
                assert_eq!(info.extra.get("path").and_then(|v| v.as_str()), Some("/confirm"));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn confirmed_and_unknown_users_are_rejected() {
        let users: SharedUserStore = Arc::new(InMemoryUserStore::seeded());

        match attempt(&config(false), users.clone(), "/confirm?hash=a123bc45d678").await {
            Outcome::Rejected { info } => {
                assert_eq!(info.message.as_deref(), Some("This user already confirmed"))
            }
            other => panic!("unexpected outcome: {other:?}"),
        }

        match attempt(&config(false), users, "/confirm?hash=ffff").await {
            Outcome::Rejected { info } => assert_eq!(info.message.as_deref(), Some("Unknown hash")),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    struct Unavailable;

    #[async_trait]
    impl UserStore for Unavailable {
        async fn find_by_id(&self, _id: Uuid) -> Result<Option<User>, RepoError> {
            Err(RepoError::Unavailable("down".to_string()))
        }

        async fn find_by_hash(&self, _hash: &str) -> Result<Option<User>, RepoError> {
            Err(RepoError::Unavailable("down".to_string()))
        }
    }

    #[tokio::test]
    async fn lookup_failure_is_an_error() {
        match attempt(&config(false), Arc::new(Unavailable), "/confirm?hash=0abc12df345").await {
            Outcome::Errored { cause } => {
                assert_eq!(cause.to_string(), "user store unavailable: down")
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }
}
