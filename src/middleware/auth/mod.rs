/*
 * Responsibility
 * - 認証 middleware (strategy で検証 → AuthCtx を extensions に載せる)
 */
pub mod hash;
