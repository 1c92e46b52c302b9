/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - middleware が strategy の成功結果を request extensions に格納し、handler はこの型だけを受け取る
 *
 * Notes
 * - hash の抽出・検証ロジックは middleware/services 側の責務
 */

use uuid::Uuid;

use crate::services::auth::AuthInfo;

/// 認証済みのリクエストに付与されるコンテキスト
///
/// - `user_id` は認証された主体の内部ユーザーID
/// - `info` は verify が success に添えた追加情報 (message など)
#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub user_id: Uuid,
    pub info: AuthInfo,
}

impl AuthCtx {
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            info: AuthInfo::default(),
        }
    }

    pub fn with_info(mut self, info: AuthInfo) -> Self {
        self.info = info;
        self
    }

    pub fn message(&self) -> Option<&str> {
        self.info.message.as_deref()
    }
}
