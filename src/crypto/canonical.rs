//! Canonical string construction for callback authentication.
//!
//! The authenticated string has a fixed shape, regardless of the order the
//! fields arrived in:
//! ```text
//! <path>?partnerid=<partnerid>&url=<url>&useragent=<useragent>&ip=<ip><salt>
//! ```
//! Field values are the decoded query values, not re-encoded.

use crate::protocol::models::VerificationRequest;

/// Build the canonical string that a callback's `hv` digest covers.
///
/// # Arguments
/// * `path` - Callback endpoint path, including the leading `/`
/// * `request` - Decoded request fields
/// * `salt` - Shared secret appended without a separator
pub fn build_canonical_string(path: &str, request: &VerificationRequest, salt: &str) -> String {
    format!(
        "{}?partnerid={}&url={}&useragent={}&ip={}{}",
        path, request.partner_id, request.url, request.user_agent, request.ip, salt
    )
}
