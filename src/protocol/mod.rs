//! Wire-level request handling: raw query inspection and typed request fields.

pub mod models;
pub mod query;
