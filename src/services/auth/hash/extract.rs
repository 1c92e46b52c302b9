//! Credential extraction: parameter → header accessor → raw header map.
//!
//! First nonempty value wins; sources are never merged. A request without any
//! of the three surfaces simply yields `None`.

use sha2::{Digest, Sha256};

use crate::services::auth::hash::options::HashOptions;
use crate::services::auth::request::CredentialSource;

pub fn extract_token<R>(req: &R, options: &HashOptions) -> Option<String>
where
    R: CredentialSource + ?Sized,
{
    req.param(&options.token_param)
        .and_then(non_empty)
        .or_else(|| req.header(&options.header_field).and_then(non_empty))
        .or_else(|| from_raw_headers(req, &options.header_field))
        .map(str::to_owned)
}

fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}

// Raw values only need to be UTF-8; every value of a repeated header is tried in order.
fn from_raw_headers<'r, R>(req: &'r R, name: &str) -> Option<&'r str>
where
    R: CredentialSource + ?Sized,
{
    req.raw_headers()?
        .get_all(name)
        .iter()
        .find_map(|v| std::str::from_utf8(v.as_bytes()).ok().and_then(non_empty))
}

/// Short SHA-256 fingerprint of a credential, for logs. Never log the raw hash.
pub fn fingerprint(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    let hex = format!("{:x}", digest);
    hex[..12].to_string()
}
