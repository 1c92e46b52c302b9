/*
 * Responsibility
 * - users の lookup (find_by_id / find_by_hash) を UserStore trait として定義する
 * - demo 用の in-memory 実装 (bob / joe) を提供する
 *
 * Notes
 * - hash の発行・ローテーション・永続化はここでは扱わない
 * - password は持たない (hash strategy には不要)
 */
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use crate::repos::error::RepoError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    Offline,
    Unconfirmed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: Uuid,
    pub user_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub hash: String,
    pub status: UserStatus,
}

/// Lookup capability injected into the verify callback and handlers.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError>;

    async fn find_by_hash(&self, hash: &str) -> Result<Option<User>, RepoError>;
}

pub type SharedUserStore = Arc<dyn UserStore>;

#[derive(Debug, Clone, Default)]
pub struct InMemoryUserStore {
    users: Arc<Vec<User>>,
}

pub const BOB_ID: Uuid = Uuid::from_u128(0x0000_0001_0000_4000_8000_0000_0000_0001);
pub const JOE_ID: Uuid = Uuid::from_u128(0x0000_0002_0000_4000_8000_0000_0000_0002);

impl InMemoryUserStore {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(users),
        }
    }

    /// bob は confirm 済み扱い (offline)、joe は未確認
    pub fn seeded() -> Self {
        Self::new(vec![
            User {
                id: BOB_ID,
                user_name: "bob".to_string(),
                email: "bob@example.com".to_string(),
                hash: "a123bc45d678".to_string(),
                status: UserStatus::Offline,
            },
            User {
                id: JOE_ID,
                user_name: "joe".to_string(),
                email: "joe@example.com".to_string(),
                hash: "0abc12df345".to_string(),
                status: UserStatus::Unconfirmed,
            },
        ])
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_hash(&self, hash: &str) -> Result<Option<User>, RepoError> {
        Ok(self.users.iter().find(|u| u.hash == hash).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn finds_seeded_users() {
        let store = InMemoryUserStore::seeded();

        let joe = store.find_by_hash("0abc12df345").await.unwrap().unwrap();
        assert_eq!(joe.user_name, "joe");
        assert_eq!(joe.status, UserStatus::Unconfirmed);

        let bob = store.find_by_id(BOB_ID).await.unwrap().unwrap();
        assert_eq!(bob.hash, "a123bc45d678");
    }

    #[tokio::test]
    async fn unknown_lookups_are_none() {
        let store = InMemoryUserStore::seeded();
        assert!(store.find_by_hash("nope").await.unwrap().is_none());
        assert!(store.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[test]
    fn hash_is_never_serialized() {
        let store = InMemoryUserStore::seeded();
        let json = serde_json::to_value(&store.users[1]).unwrap();
        assert!(json.get("hash").is_none());
        assert_eq!(json["status"], "unconfirmed");
    }

    #[test]
    fn seeded_statuses() {
        let store = InMemoryUserStore::seeded();
        let statuses: Vec<UserStatus> = store.users.iter().map(|u| u.status).collect();
        assert_eq!(statuses, vec![UserStatus::Offline, UserStatus::Unconfirmed]);
        assert_eq!(serde_json::to_value(UserStatus::Offline).unwrap(), "offline");
    }
}
