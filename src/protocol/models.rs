//! Typed request fields extracted from decoded query parameters.

use crate::crypto::canonical::build_canonical_string;
use crate::crypto::digest::sha256_hex;
use crate::errors::RequiredField;
use crate::protocol::query::{QueryParams, AUTH_FIELD};
use crate::VerimockError;
use url::form_urlencoded;

/// Decoded fields of a verification callback.
///
/// The `hv` digest is not part of this struct; it is taken from the raw
/// query text, see [`crate::protocol::query::trailing_auth_value`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationRequest {
    /// Content URL being verified.
    pub url: String,

    /// Client IP address, textual form.
    pub ip: String,

    /// Partner identifier.
    pub partner_id: String,

    /// Client user agent.
    pub user_agent: String,
}

impl VerificationRequest {
    /// Extract required fields, checking `url`, `ip`, `partnerid`, `useragent` in that order.
    pub fn from_params(params: &QueryParams) -> Result<Self, VerimockError> {
        let url = params.require(RequiredField::Url)?;
        let ip = params.require(RequiredField::IpAddress)?;
        let partner_id = params.require(RequiredField::PartnerId)?;
        let user_agent = params.require(RequiredField::UserAgent)?;

        Ok(Self {
            url: url.to_string(),
            ip: ip.to_string(),
            partner_id: partner_id.to_string(),
            user_agent: user_agent.to_string(),
        })
    }

    /// Digest a client must send as `hv` for this request.
    pub fn expected_digest(&self, path: &str, salt: &str) -> String {
        sha256_hex(build_canonical_string(path, self, salt).as_bytes())
    }

    /// Build a raw query string a client could send to the callback endpoint.
    ///
    /// Fields are emitted in the vendor's preferred order
    /// (`partnerid`, `url`, `useragent`, `ip`) with `hv` last, and values are
    /// form-urlencoded.
    pub fn signed_query(&self, path: &str, salt: &str) -> String {
        let digest = self.expected_digest(path, salt);
        form_urlencoded::Serializer::new(String::new())
            .append_pair(RequiredField::PartnerId.key(), &self.partner_id)
            .append_pair(RequiredField::Url.key(), &self.url)
            .append_pair(RequiredField::UserAgent.key(), &self.user_agent)
            .append_pair(RequiredField::IpAddress.key(), &self.ip)
            .append_pair(AUTH_FIELD, &digest)
            .finish()
    }
}

/// Input to the digest helper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestInput {
    /// Arbitrary caller data.
    pub data: String,

    /// Salt appended to `data`.
    pub salt: String,
}

impl DigestInput {
    /// Extract `data` then `salt`; both must be non-empty.
    pub fn from_params(params: &QueryParams) -> Result<Self, VerimockError> {
        let data = params.require(RequiredField::Data)?;
        let salt = params.require(RequiredField::Salt)?;

        Ok(Self {
            data: data.to_string(),
            salt: salt.to_string(),
        })
    }
}
