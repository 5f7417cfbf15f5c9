//! Normalized per-tenant response cache for Arabic-language chatbots.
//!
//! Multi-tenant chatbot backends pay for every model call; many incoming
//! questions are rephrasings the platform has already answered. This crate
//! canonicalizes Arabic orthographic variation (hamza-bearing alefs, alef
//! maqsura, taa marbuta, stray punctuation) and serves prior answers from a
//! bounded in-process store, keyed per tenant so answers never leak across
//! businesses.
//!
//! ```
//! use radd::{CacheConfig, NormalizedResponseCache};
//!
//! let cache: NormalizedResponseCache<String> =
//!     NormalizedResponseCache::new(CacheConfig::default());
//!
//! assert!(cache.lookup("biz1", "أهلا")?.is_none());
//! // ... expensive model call happens here ...
//! cache.store("biz1", "أهلا", "اهلاً وسهلاً بك".to_string())?;
//!
//! // A bare-alef rephrasing hits the same entry.
//! assert!(cache.lookup("biz1", "اهلا")?.is_some());
//! # Ok::<(), radd::CacheError>(())
//! ```
//!
//! Matching is exact after normalization; there is no fuzzy or semantic
//! lookup. The store is process-local and empty after a restart.

pub mod cache;
pub mod config;
pub mod error;
pub mod normalize;

pub use cache::{system_clock, CacheStats, Clock, NormalizedResponseCache};
pub use config::CacheConfig;
pub use error::CacheError;
pub use normalize::normalize;
