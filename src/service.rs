//! Verification service - the request validation core of Verimock.
//!
//! The `VerificationService` is transport-agnostic: it takes the raw query
//! string of a request and either returns the response body or the error
//! that explains the rejection. The HTTP layer only maps these to responses.

use crate::config::VerimockConfig;
use crate::crypto::canonical::build_canonical_string;
use crate::crypto::digest::{salted_digest, verify_hex_digest};
use crate::protocol::models::{DigestInput, VerificationRequest};
use crate::protocol::query::{trailing_auth_value, QueryParams};
use crate::VerimockError;
use tracing::debug;

/// Stateless request validator for both endpoints.
///
/// Holds only read-only configuration, so one instance can be shared across
/// any number of concurrent requests.
#[derive(Debug, Clone)]
pub struct VerificationService {
    config: VerimockConfig,
}

impl VerificationService {
    /// Create a service with the given configuration.
    ///
    /// # Errors
    /// Returns `ConfigError` if configuration validation fails.
    pub fn new(config: VerimockConfig) -> Result<Self, VerimockError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Validate a callback request and look up its canned verdict.
    ///
    /// Steps, each short-circuiting:
    /// 1. The last raw query segment must be `hv`
    /// 2. `url`, `ip`, `partnerid`, `useragent` must be present
    /// 3. `hv` must equal the digest of the canonical request string
    /// 4. Verdict lookup by exact `url`
    ///
    /// # Returns
    /// * `Ok(Some(codes))` - Authenticated, URL has canned verdicts
    /// * `Ok(None)` - Authenticated, no verdicts for this URL
    ///
    /// # Errors
    /// - `MissingOrMisplacedAuthField` - `hv` is not the last field
    /// - `MissingField` - A required field is absent or empty
    /// - `AuthenticationFailed` - `hv` does not match
    pub fn verify_callback(&self, raw_query: Option<&str>) -> Result<Option<&str>, VerimockError> {
        let raw_query = raw_query.unwrap_or_default();

        let presented = trailing_auth_value(raw_query)?;

        let params = QueryParams::parse(raw_query);
        let request = VerificationRequest::from_params(&params)?;

        let canonical =
            build_canonical_string(&self.config.callback_path, &request, &self.config.salt);
        verify_hex_digest(&canonical, presented)?;

        let verdict = self.config.verdicts.lookup(&request.url);
        debug!(
            url = %request.url,
            partner_id = %request.partner_id,
            known = verdict.is_some(),
            "callback authenticated"
        );
        Ok(verdict)
    }

    /// Compute the digest helper output for a `data`/`salt` query.
    ///
    /// # Errors
    /// - `MissingField` - `data` or `salt` is absent or empty
    pub fn compute_hash(&self, raw_query: Option<&str>) -> Result<String, VerimockError> {
        let params = QueryParams::parse(raw_query.unwrap_or_default());
        let input = DigestInput::from_params(&params)?;
        Ok(salted_digest(&input.data, &input.salt))
    }

    /// Build a signed callback query for the given fields.
    ///
    /// Uses this service's salt and callback path, so the result always
    /// passes [`Self::verify_callback`].
    pub fn sign_callback(&self, request: &VerificationRequest) -> String {
        request.signed_query(&self.config.callback_path, &self.config.salt)
    }

    /// Get the current configuration.
    pub fn config(&self) -> &VerimockConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::digest::sha256_hex;
    use crate::errors::RequiredField;
    use crate::verdicts::VerdictTable;

    const KNOWN_URL: &str = "https://www.wattpad.com/story/5095707-after";

    fn service() -> VerificationService {
        VerificationService::new(VerimockConfig::default()).unwrap()
    }

    fn known_request() -> VerificationRequest {
        VerificationRequest {
            url: KNOWN_URL.to_string(),
            ip: "1.2.3.4".to_string(),
            partner_id: "p1".to_string(),
            user_agent: "UA".to_string(),
        }
    }

    fn known_digest() -> String {
        sha256_hex(
            format!(
                "/dv-iqc?partnerid=p1&url={}&useragent=UA&ip=1.2.3.40123456789",
                KNOWN_URL
            )
            .as_bytes(),
        )
    }

    #[test]
    fn test_service_creation_invalid_config() {
        let config = VerimockConfig {
            salt: String::new(),
            ..Default::default()
        };
        assert!(matches!(
            VerificationService::new(config),
            Err(VerimockError::ConfigError(_))
        ));
    }

    #[test]
    fn test_known_url_returns_codes() {
        let query = format!(
            "partnerid=p1&url=https%3A%2F%2Fwww.wattpad.com%2Fstory%2F5095707-after&useragent=UA&ip=1.2.3.4&hv={}",
            known_digest()
        );
        let svc = service();
        let result = svc.verify_callback(Some(&query)).unwrap();
        assert_eq!(result, Some("80023001,80312001,80013001"));
    }

    #[test]
    fn test_field_order_does_not_matter_except_hv() {
        let query = format!(
            "ip=1.2.3.4&useragent=UA&url=https%3A%2F%2Fwww.wattpad.com%2Fstory%2F5095707-after&partnerid=p1&hv={}",
            known_digest()
        );
        let svc = service();
        let result = svc.verify_callback(Some(&query)).unwrap();
        assert_eq!(result, Some("80023001,80312001,80013001"));
    }

    #[test]
    fn test_hv_not_last_rejected_even_with_valid_digest() {
        let query = format!(
            "partnerid=p1&url=https%3A%2F%2Fwww.wattpad.com%2Fstory%2F5095707-after&useragent=UA&hv={}&ip=1.2.3.4",
            known_digest()
        );
        let svc = service();
        let result = svc.verify_callback(Some(&query));
        assert!(matches!(
            result,
            Err(VerimockError::MissingOrMisplacedAuthField)
        ));
    }

    #[test]
    fn test_missing_query_rejected() {
        let svc = service();
        let result = svc.verify_callback(None);
        assert!(matches!(
            result,
            Err(VerimockError::MissingOrMisplacedAuthField)
        ));
    }

    #[test]
    fn test_location_checked_before_presence() {
        let svc = service();
        let result = svc.verify_callback(Some("url=&ip="));
        assert!(matches!(
            result,
            Err(VerimockError::MissingOrMisplacedAuthField)
        ));
    }

    #[test]
    fn test_presence_checked_before_digest() {
        let svc = service();
        let result = svc.verify_callback(Some("url=u&ip=1.2.3.4&partnerid=p1&hv=bad"));
        assert!(matches!(
            result,
            Err(VerimockError::MissingField {
                field: RequiredField::UserAgent
            })
        ));
    }

    #[test]
    fn test_wrong_digest_rejected() {
        let query = format!(
            "partnerid=p2&url=https%3A%2F%2Fwww.wattpad.com%2Fstory%2F5095707-after&useragent=UA&ip=1.2.3.4&hv={}",
            known_digest()
        );
        let svc = service();
        let result = svc.verify_callback(Some(&query));
        assert!(matches!(result, Err(VerimockError::AuthenticationFailed)));
    }

    #[test]
    fn test_uppercase_digest_rejected() {
        let query = format!(
            "partnerid=p1&url=https%3A%2F%2Fwww.wattpad.com%2Fstory%2F5095707-after&useragent=UA&ip=1.2.3.4&hv={}",
            known_digest().to_uppercase()
        );
        let svc = service();
        let result = svc.verify_callback(Some(&query));
        assert!(matches!(result, Err(VerimockError::AuthenticationFailed)));
    }

    #[test]
    fn test_invalid_utf8_values_are_digested_as_replacement_char() {
        let svc = service();
        let raw_byte = sha256_hex(
            b"/dv-iqc?partnerid=p1&url=\xFF&useragent=UA&ip=1.2.3.40123456789",
        );
        let query = format!("partnerid=p1&url=%FF&useragent=UA&ip=1.2.3.4&hv={}", raw_byte);
        assert!(matches!(
            svc.verify_callback(Some(&query)),
            Err(VerimockError::AuthenticationFailed)
        ));

        let replaced = sha256_hex(
            "/dv-iqc?partnerid=p1&url=\u{FFFD}&useragent=UA&ip=1.2.3.40123456789".as_bytes(),
        );
        let query = format!("partnerid=p1&url=%FF&useragent=UA&ip=1.2.3.4&hv={}", replaced);
        assert_eq!(svc.verify_callback(Some(&query)).unwrap(), None);
    }

    #[test]
    fn test_unknown_url_is_not_an_error() {
        let svc = service();
        let request = VerificationRequest {
            url: "https://example.com/unknown".to_string(),
            ..known_request()
        };
        let query = svc.sign_callback(&request);
        assert_eq!(svc.verify_callback(Some(&query)).unwrap(), None);
    }

    #[test]
    fn test_idempotent() {
        let svc = service();
        let query = svc.sign_callback(&known_request());
        let first = svc.verify_callback(Some(&query)).unwrap();
        let second = svc.verify_callback(Some(&query)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_injected_salt_and_verdicts() {
        let config = VerimockConfig {
            salt: "fixture-salt".to_string(),
            verdicts: VerdictTable::from_entries([("https://example.com/x", "1,2")]),
            ..Default::default()
        };
        let svc = VerificationService::new(config).unwrap();
        let request = VerificationRequest {
            url: "https://example.com/x".to_string(),
            ..known_request()
        };
        let query = svc.sign_callback(&request);
        assert_eq!(svc.verify_callback(Some(&query)).unwrap(), Some("1,2"));

        // A query signed with the default salt no longer authenticates
        let stale = request.signed_query("/dv-iqc", "0123456789");
        assert!(matches!(
            svc.verify_callback(Some(&stale)),
            Err(VerimockError::AuthenticationFailed)
        ));
    }

    #[test]
    fn test_compute_hash() {
        let digest = service().compute_hash(Some("data=foo&salt=bar")).unwrap();
        assert_eq!(digest, sha256_hex(b"foobar"));
    }

    #[test]
    fn test_compute_hash_decodes_params() {
        let digest = service().compute_hash(Some("data=a+b&salt=%26")).unwrap();
        assert_eq!(digest, sha256_hex(b"a b&"));
    }

    #[test]
    fn test_compute_hash_missing_fields() {
        let svc = service();
        assert!(matches!(
            svc.compute_hash(None),
            Err(VerimockError::MissingField {
                field: RequiredField::Data
            })
        ));
        assert!(matches!(
            svc.compute_hash(Some("data=foo")),
            Err(VerimockError::MissingField {
                field: RequiredField::Salt
            })
        ));
    }

    #[test]
    fn test_hash_helper_reproduces_callback_digest() {
        let svc = service();
        let data = format!(
            "/dv-iqc?partnerid=p1&url={}&useragent=UA&ip=1.2.3.4",
            KNOWN_URL
        );
        let query = format!(
            "data={}&salt=0123456789",
            url::form_urlencoded::byte_serialize(data.as_bytes()).collect::<String>()
        );
        assert_eq!(svc.compute_hash(Some(&query)).unwrap(), known_digest());
    }

    #[test]
    fn test_config_accessor() {
        assert_eq!(service().config().callback_path, "/dv-iqc");
    }
}
