//! Content-addressed synthesis cache
//!
//! Two layers: a moka in-memory front for hot entries and a durable
//! one-file-per-key directory underneath. Entries are immutable once
//! written and never expire; the only removal path is a manual full clear.
//! Writes are idempotent, so concurrent synthesis of the same key is safe
//! (last writer wins with identical bytes).

use std::path::PathBuf;
use std::sync::Arc;

use application::ports::CacheStats;
use moka::future::Cache;
use tokio::io;
use tracing::{debug, instrument};

/// Audio file extension for durable entries
const AUDIO_EXT: &str = "mp3";

/// Compute the cache key for one synthesis request.
///
/// blake3 over normalized text, language code and speed mode, separated by
/// an ASCII unit separator so field boundaries cannot collide.
#[must_use]
pub fn cache_key(normalized_text: &str, language: &str, speed: &str) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(normalized_text.as_bytes());
    hasher.update(&[0x1f]);
    hasher.update(language.as_bytes());
    hasher.update(&[0x1f]);
    hasher.update(speed.as_bytes());
    hasher.finalize().to_hex().to_string()
}

/// Configuration for the synthesis cache
#[derive(Debug, Clone)]
pub struct SynthesisCacheConfig {
    /// Durable store directory
    pub dir: PathBuf,
    /// In-memory front capacity in megabytes
    pub max_capacity_mb: u64,
}

/// Durable, content-addressed audio cache
pub struct SynthesisCache {
    memory: Cache<String, Arc<Vec<u8>>>,
    dir: PathBuf,
}

impl std::fmt::Debug for SynthesisCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SynthesisCache")
            .field("dir", &self.dir)
            .field("memory_entries", &self.memory.entry_count())
            .finish()
    }
}

impl SynthesisCache {
    /// Open (and create if needed) the cache directory.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the directory cannot be created.
    pub async fn open(config: SynthesisCacheConfig) -> io::Result<Self> {
        tokio::fs::create_dir_all(&config.dir).await?;

        let memory = Cache::builder()
            .max_capacity(config.max_capacity_mb * 1024 * 1024)
            .weigher(|_key: &String, value: &Arc<Vec<u8>>| {
                value.len().try_into().unwrap_or(u32::MAX)
            })
            .build();

        Ok(Self {
            memory,
            dir: config.dir,
        })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.{AUDIO_EXT}"))
    }

    /// Look up cached audio, warming the memory front on a disk hit
    #[instrument(skip(self))]
    pub async fn get(&self, key: &str) -> Option<Vec<u8>> {
        if let Some(audio) = self.memory.get(key).await {
            debug!("Memory cache hit");
            return Some(audio.as_ref().clone());
        }

        match tokio::fs::read(self.path_for(key)).await {
            Ok(audio) => {
                debug!(size = audio.len(), "Durable cache hit");
                self.memory
                    .insert(key.to_string(), Arc::new(audio.clone()))
                    .await;
                Some(audio)
            },
            Err(_) => None,
        }
    }

    /// Store audio under a key in both layers.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the durable write fails; the memory front
    /// is only updated after the durable write succeeds.
    #[instrument(skip(self, audio), fields(size = audio.len()))]
    pub async fn insert(&self, key: &str, audio: &[u8]) -> io::Result<()> {
        tokio::fs::write(self.path_for(key), audio).await?;
        self.memory
            .insert(key.to_string(), Arc::new(audio.to_vec()))
            .await;
        debug!("Cached synthesis result");
        Ok(())
    }

    /// Count entries and bytes in the durable store.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the directory cannot be read.
    pub async fn stats(&self) -> io::Result<CacheStats> {
        let mut entries = 0_u64;
        let mut total_bytes = 0_u64;

        let mut dir = tokio::fs::read_dir(&self.dir).await?;
        while let Some(file) = dir.next_entry().await? {
            let path = file.path();
            if path.extension().is_some_and(|ext| ext == AUDIO_EXT) {
                entries += 1;
                total_bytes += file.metadata().await?.len();
            }
        }

        Ok(CacheStats {
            entries,
            total_bytes,
        })
    }

    /// Remove every entry from both layers, returning how many durable
    /// entries were removed.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when a durable entry cannot be removed.
    pub async fn clear(&self) -> io::Result<u64> {
        let mut removed = 0_u64;

        let mut dir = tokio::fs::read_dir(&self.dir).await?;
        while let Some(file) = dir.next_entry().await? {
            let path = file.path();
            if path.extension().is_some_and(|ext| ext == AUDIO_EXT) {
                tokio::fs::remove_file(&path).await?;
                removed += 1;
            }
        }

        self.memory.invalidate_all();
        debug!(removed, "Synthesis cache cleared");
        Ok(removed)
    }
}
