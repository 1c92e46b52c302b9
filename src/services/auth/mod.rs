pub mod error;
pub mod factory;
pub mod hash;
pub mod outcome;
pub mod request;
pub mod strategy;

pub use error::{AuthError, BoxError, BuildError};
pub use factory::build_strategies;
pub use hash::{HashOptions, HashStrategy, Verify};
pub use outcome::{AuthInfo, Outcome, OutcomeReporter};
pub use request::{CredentialSource, HttpRequest};
pub use strategy::{SharedStrategy, Strategies, Strategy};
