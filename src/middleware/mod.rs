/*
 * Responsibility
 * - Router に掛ける middleware 群
 *   - http: request-id / trace / body limit / timeout
 *   - cors: ブラウザ向け CORS policy
 *   - auth: 認証 (hash strategy)
 */
pub mod auth;
pub mod cors;
pub mod http;
