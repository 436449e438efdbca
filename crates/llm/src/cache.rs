//! Response Cache
//!
//! Content-hash filesystem cache for provider responses. Identical
//! (model, system prompt, user prompt) triples within the TTL replay the
//! stored text instead of spending another remote call.
//!
//! The cache is an explicit component with its own directory and lifecycle;
//! it is composed with a provider via `CachingProvider` rather than consulted
//! ambiently.

use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::provider::LlmProvider;
use super::types::{GenerationOptions, LlmResponse, LlmResult};

/// Default entry lifetime
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// A single persisted cache entry.
#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    text: String,
    model: String,
    provider: String,
    input_tokens: u64,
    output_tokens: u64,
    /// Seconds since the Unix epoch at write time
    timestamp: u64,
}

/// Filesystem-backed response cache keyed by a prompt content hash.
pub struct ResponseCache {
    dir: PathBuf,
    ttl: Duration,
}

impl ResponseCache {
    /// Create a cache rooted at `dir` with the given TTL.
    pub fn new(dir: PathBuf, ttl: Duration) -> Self {
        Self { dir, ttl }
    }

    /// Deterministic cache key for a (model, system, user) triple.
    fn cache_key(model: &str, system_prompt: &str, user_prompt: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(model.as_bytes());
        hasher.update(b"::");
        hasher.update(system_prompt.as_bytes());
        hasher.update(b"::");
        hasher.update(user_prompt.as_bytes());
        let digest = hasher.finalize();
        // 16 hex chars is plenty for a local cache
        digest.iter().take(8).map(|b| format!("{:02x}", b)).collect()
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    fn now_secs() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }

    /// Look up an unexpired entry. Expired or unreadable entries are removed.
    pub fn get(
        &self,
        model: &str,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Option<LlmResponse> {
        let key = Self::cache_key(model, system_prompt, user_prompt);
        let path = self.entry_path(&key);

        let raw = std::fs::read_to_string(&path).ok()?;
        let entry: CacheEntry = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(key = %key, error = %e, "cache read error, evicting entry");
                let _ = std::fs::remove_file(&path);
                return None;
            }
        };

        let age = Duration::from_secs(Self::now_secs().saturating_sub(entry.timestamp));
        if age > self.ttl {
            debug!(key = %key, age_secs = age.as_secs(), "cache entry expired");
            let _ = std::fs::remove_file(&path);
            return None;
        }

        info!(key = %key, "cache hit");
        Some(LlmResponse {
            text: entry.text,
            model: entry.model,
            provider: entry.provider,
            input_tokens: entry.input_tokens,
            output_tokens: entry.output_tokens,
            // A replay spends nothing and takes no remote round-trip.
            cost_usd: 0.0,
            latency_ms: 0.0,
        })
    }

    /// Store a response. Write failures are logged, never propagated.
    pub fn put(&self, system_prompt: &str, user_prompt: &str, response: &LlmResponse) {
        let entry = CacheEntry {
            text: response.text.clone(),
            model: response.model.clone(),
            provider: response.provider.clone(),
            input_tokens: response.input_tokens,
            output_tokens: response.output_tokens,
            timestamp: Self::now_secs(),
        };

        let key = Self::cache_key(&response.model, system_prompt, user_prompt);
        if let Err(e) = std::fs::create_dir_all(&self.dir) {
            warn!(error = %e, "cache write error");
            return;
        }
        match serde_json::to_string_pretty(&entry) {
            Ok(json) => {
                if let Err(e) = std::fs::write(self.entry_path(&key), json) {
                    warn!(key = %key, error = %e, "cache write error");
                } else {
                    debug!(key = %key, "cached response");
                }
            }
            Err(e) => warn!(error = %e, "cache serialization error"),
        }
    }

    /// Remove every entry. Returns the number of entries cleared.
    pub fn clear(&self) -> usize {
        let mut count = 0;
        if let Ok(entries) = std::fs::read_dir(&self.dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "json")
                    && std::fs::remove_file(&path).is_ok()
                {
                    count += 1;
                }
            }
        }
        info!(count, "cleared cache entries");
        count
    }
}

/// Decorator that consults a `ResponseCache` before delegating to the
/// wrapped provider.
pub struct CachingProvider {
    inner: Arc<dyn LlmProvider>,
    cache: ResponseCache,
}

impl CachingProvider {
    /// Wrap a provider with the given cache.
    pub fn new(inner: Arc<dyn LlmProvider>, cache: ResponseCache) -> Self {
        Self { inner, cache }
    }
}

#[async_trait]
impl LlmProvider for CachingProvider {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn model(&self) -> &str {
        self.inner.model()
    }

    async fn generate(
        &self,
        system_prompt: &str,
        user_input: &str,
        options: &GenerationOptions,
    ) -> LlmResult<LlmResponse> {
        if let Some(hit) = self.cache.get(self.inner.model(), system_prompt, user_input) {
            return Ok(hit);
        }

        let response = self.inner.generate(system_prompt, user_input, options).await?;
        self.cache.put(system_prompt, user_input, &response);
        Ok(response)
    }
}
