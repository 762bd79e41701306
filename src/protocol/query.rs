//! Query string parsing.
//!
//! Two views of the same query string are needed:
//! - a positional view of the raw, undecoded text (for the `hv` location rule)
//! - a decoded key/value view (for field presence and values)
//!
//! The positional check never goes through the decoded view, since decoding
//! loses the original field order guarantees.

use crate::errors::RequiredField;
use crate::VerimockError;
use url::form_urlencoded;

/// Key of the authentication digest field.
pub const AUTH_FIELD: &str = "hv";

/// Extract the `hv` value from the last raw segment of a query string.
///
/// The query is split on `&` and only the final segment is inspected. Its
/// key (text before the first `=`) must be exactly `hv`. The returned value
/// is the raw text up to any further `=`, with no percent-decoding applied.
///
/// # Returns
/// * `Ok(value)` - The raw digest text (may be empty for a bare `hv`)
/// * `Err(MissingOrMisplacedAuthField)` - The last segment is not `hv`
pub fn trailing_auth_value(raw_query: &str) -> Result<&str, VerimockError> {
    let last = raw_query.rsplit('&').next().unwrap_or_default();
    let mut parts = last.split('=');

    if parts.next() != Some(AUTH_FIELD) {
        return Err(VerimockError::MissingOrMisplacedAuthField);
    }

    Ok(parts.next().unwrap_or_default())
}

/// Decoded query parameters in arrival order.
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Parse a raw query string using form-urlencoded rules.
    ///
    /// `+` decodes to a space and percent escapes are decoded. Decoded bytes
    /// that are not valid UTF-8 become U+FFFD.
    pub fn parse(raw_query: &str) -> Self {
        let pairs = form_urlencoded::parse(raw_query.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        Self { pairs }
    }

    /// First value for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Value for a required field; absent and empty are both rejected.
    pub fn require(&self, field: RequiredField) -> Result<&str, VerimockError> {
        match self.get(field.key()) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(VerimockError::MissingField { field }),
        }
    }

    /// Number of decoded pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether no pairs were decoded.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
