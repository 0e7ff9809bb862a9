//! In-memory cache of synthesized audio with a time-to-live and a hard entry cap.
//! Key: md5 of (voice | whitespace-normalized text), hex encoded. The key is also
//! the public id served under `/media/tts/:id`.
//!
//! Reads never refresh an entry's position, so eviction always drops the oldest insertion.

use axum::body::Bytes;
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq)]
pub struct CachedAudio {
    pub audio: Bytes,
    pub content_type: String,
    pub voice: String,
}

struct CacheEntry {
    audio: CachedAudio,
    inserted_at: Instant,
}

pub struct AudioCache {
    inner: Mutex<LruCache<String, CacheEntry>>,
    ttl: Duration,
}

impl AudioCache {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Mutex::new(LruCache::new(capacity)),
            ttl,
        }
    }

    /// Compute the cache key for a voice/text pair.
    pub fn compute_key(voice: &str, text: &str) -> String {
        let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
        let mut context = md5::Context::new();
        context.consume(voice.trim().to_lowercase().as_bytes());
        context.consume(b"|");
        context.consume(normalized.as_bytes());
        format!("{:x}", context.compute())
    }

    /// Look up cached audio. Returns None if absent or expired.
    pub fn get(&self, key: &str) -> Option<CachedAudio> {
        self.get_at(key, Instant::now())
    }

    pub fn insert(&self, key: String, audio: CachedAudio) {
        self.insert_at(key, audio, Instant::now());
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().cap().get()
    }

    fn get_at(&self, key: &str, now: Instant) -> Option<CachedAudio> {
        let mut cache = self.inner.lock();
        let entry = cache.peek(key)?;
        if now.saturating_duration_since(entry.inserted_at) < self.ttl {
            return Some(entry.audio.clone());
        }

        cache.pop(key);
        tracing::debug!(key = %key, "Expired TTS cache entry dropped");
        None
    }

    fn insert_at(&self, key: String, audio: CachedAudio, now: Instant) {
        let mut cache = self.inner.lock();
        let entry = CacheEntry {
            audio,
            inserted_at: now,
        };
        if let Some((evicted, _)) = cache.push(key.clone(), entry) {
            if evicted != key {
                tracing::debug!(evicted = %evicted, "TTS cache full, oldest entry evicted");
            }
        }
    }
}
