//! Verimock error types.

use std::fmt;
use thiserror::Error;

/// Query parameters that a handler requires to be present and non-empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    /// Content URL being verified (`url`).
    Url,
    /// Client IP address (`ip`).
    IpAddress,
    /// Partner identifier (`partnerid`).
    PartnerId,
    /// Client user agent (`useragent`).
    UserAgent,
    /// Digest helper input (`data`).
    Data,
    /// Digest helper salt (`salt`).
    Salt,
}

impl RequiredField {
    /// Query-string key for this field.
    pub fn key(self) -> &'static str {
        match self {
            Self::Url => "url",
            Self::IpAddress => "ip",
            Self::PartnerId => "partnerid",
            Self::UserAgent => "useragent",
            Self::Data => "data",
            Self::Salt => "salt",
        }
    }

    /// Human label used in rejection messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Url => "url",
            Self::IpAddress => "IP Address",
            Self::PartnerId => "Partner ID",
            Self::UserAgent => "User agent",
            Self::Data => "data",
            Self::Salt => "salt",
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Errors produced while validating requests or starting the service.
#[derive(Debug, Error)]
pub enum VerimockError {
    /// The last raw query segment is not the `hv` field.
    #[error("hv param not present in correct location")]
    MissingOrMisplacedAuthField,

    /// A required parameter is absent or empty.
    #[error("{field} param not present")]
    MissingField {
        /// The field that was missing.
        field: RequiredField,
    },

    /// The presented `hv` digest does not match the canonical request digest.
    #[error("Incorrect parameter value for: hv")]
    AuthenticationFailed,

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// I/O failure while loading fixtures or binding the listener.
    #[error("I/O error: {0}")]
    Io(String),
}

impl VerimockError {
    /// Whether this error was caused by client input (rendered as HTTP 400).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MissingOrMisplacedAuthField
                | Self::MissingField { .. }
                | Self::AuthenticationFailed
        )
    }
}
