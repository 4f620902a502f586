//! Caching infrastructure

mod synthesis_cache;

pub use synthesis_cache::{cache_key, SynthesisCache, SynthesisCacheConfig};
