/*
 * Responsibility
 * - 確認 (confirm) API の response DTO
 * - hash は response に出さない
 */
use serde::Serialize;
use uuid::Uuid;

use crate::repos::user_repo::{User, UserStatus};

#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub id: Uuid,
    pub user_name: String,
    pub email: String,
    pub status: UserStatus,
}

impl From<User> for AccountResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            user_name: user.user_name,
            email: user.email,
            status: user.status,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ConfirmResponse {
    pub user: AccountResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
