//! Digest scheme shared by the callback and hash handlers.

pub mod canonical;
pub mod digest;
