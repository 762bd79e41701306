//! # Verimock
//!
//! **Mock ad-verification callback server for integration testing.**
//!
//! Verimock stands in for a third-party ad-verification vendor so client
//! integrations can be exercised without calling the real service. It
//! authenticates each callback with a salted SHA-256 digest and answers
//! with canned verdict codes for a small table of known URLs.
//!
//! ## Endpoints
//!
//! - **Callback** (`/dv-iqc`) — checks that `hv` is the last raw query field,
//!   that `url`, `ip`, `partnerid` and `useragent` are present, and that `hv`
//!   equals the digest of the canonical request string
//! - **Digest helper** (`/hash`) — returns `sha256(data + salt)` as lowercase hex
//!
//! ## Quickstart
//!
//! ```
//! use verimock::{VerificationRequest, VerificationService, VerimockConfig};
//!
//! fn main() -> Result<(), verimock::VerimockError> {
//!     let service = VerificationService::new(VerimockConfig::default())?;
//!
//!     let request = VerificationRequest {
//!         url: "https://www.wattpad.com/story/5095707-after".to_string(),
//!         ip: "1.2.3.4".to_string(),
//!         partner_id: "p1".to_string(),
//!         user_agent: "UA".to_string(),
//!     };
//!     let query = service.sign_callback(&request);
//!
//!     let verdict = service.verify_callback(Some(&query))?;
//!     assert_eq!(verdict, Some("80023001,80312001,80013001"));
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! - `salt` — shared secret appended to every digested string
//! - `callback_path` / `hash_path` — endpoint paths; the callback path is
//!   part of the authenticated string
//! - `verdicts` — canned verdict codes keyed by exact URL
//!
//! See [`VerimockConfig`] for full documentation.

#![deny(warnings)]
#![deny(missing_docs)]

// Core modules
pub mod config;
pub mod errors;

// Crypto layer
pub mod crypto;

// Protocol layer
pub mod protocol;

// Canned responses
pub mod verdicts;

// Service (main public API)
pub mod service;

// HTTP layer
pub mod server;

// Re-exports for public API
pub use config::VerimockConfig;
pub use errors::{RequiredField, VerimockError};
pub use protocol::models::{DigestInput, VerificationRequest};
pub use service::VerificationService;
pub use verdicts::VerdictTable;
