//! Cache error taxonomy.
//!
//! The cache is pure in-memory bookkeeping, so the only failure mode is a
//! caller passing an unresolved tenant id. That is a programmer error at the
//! call site: propagate it to request-level handling, do not retry.

use thiserror::Error;

/// Errors surfaced by the response cache.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CacheError {
    /// The tenant id was empty or whitespace-only. Tenant isolation depends
    /// on every key carrying a real tenant id, so this is never ignorable.
    #[error("tenant id must be non-empty")]
    InvalidTenant,
}
