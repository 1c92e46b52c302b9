/*
 * Responsibility
 * - hash strategy (URL/header で渡される hash を bearer credential として検証する)
 * - 抽出順: parameter → header accessor → raw header map
 */
pub mod extract;
pub mod options;
pub mod strategy;
pub mod verify;

pub use extract::extract_token;
pub use options::{DEFAULT_HEADER_FIELD, DEFAULT_TOKEN_PARAM, HashOptions, STRATEGY_NAME};
pub use strategy::{HashStrategy, HashStrategyBuilder};
pub use verify::{Completion, Done, Verify};
