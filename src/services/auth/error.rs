/*
 * Responsibility
 * - strategy が報告する error 系の意味を定義する
 * - 構築時の失敗 (BuildError) と、認証試行ごとの失敗 (AuthError) を分ける
 *
 * Notes
 * - 「hash が間違っている」は error ではなく Outcome::Rejected で表す
 * - verify callback が返した cause は解釈せずにそのまま運ぶ
 */
use thiserror::Error;

/// Boxed cause surfaced by a verification callback (e.g. a failed user lookup).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// 認証試行が error として終わった理由
#[derive(Debug, Error)]
pub enum AuthError {
    /// request のどこにも credential が無かった (callback は呼ばれていない)
    #[error("missing hash credential (param `{param}`, header `{header}`)")]
    MissingCredential { param: String, header: String },

    /// callback 自身が報告した cause。Display/source は元のエラーのまま
    #[error(transparent)]
    Verification(BoxError),

    /// callback が completion handle を発火せずに drop した
    #[error("verification callback dropped its completion handle")]
    VerificationAbandoned,
}

impl AuthError {
    pub fn missing(param: &str, header: &str) -> Self {
        Self::MissingCredential {
            param: param.to_string(),
            header: header.to_string(),
        }
    }

    pub fn is_missing_credential(&self) -> bool {
        matches!(self, Self::MissingCredential { .. })
    }
}

/// Strategy construction faults. Construction must fail instead of falling back
/// to a verifier that accepts nothing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("hash authentication strategy requires a verify callback")]
    MissingVerify,

    #[error(
        "verify callback shape does not match pass_request_to_callback={pass_request_to_callback}"
    )]
    CallbackShape { pass_request_to_callback: bool },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn missing_credential_names_the_searched_locations() {
        let err = AuthError::missing("link", "X-Link");
        assert!(err.is_missing_credential());
        assert_eq!(
            err.to_string(),
            "missing hash credential (param `link`, header `X-Link`)"
        );
    }

    #[test]
    fn verification_error_is_transparent() {
        let cause: BoxError = Box::new(io::Error::other("boom"));
        let err = AuthError::Verification(cause);
        assert_eq!(err.to_string(), "boom");
        assert!(!err.is_missing_credential());
    }
}
