use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};

use crate::clock::Clock;
use crate::ratelimit::TokenBucket;

/// Fixed parameters for every bucket the registry creates.
#[derive(Debug, Clone)]
pub struct RateLimiterConfig {
    /// Maximum burst size per client.
    pub capacity: f64,
    /// Tokens restored per second.
    pub refill_per_sec: f64,
    /// Entries idle longer than this are removed by the sweep; the sweep
    /// also runs on this period.
    pub idle_timeout: Duration,
}

#[derive(Debug)]
struct BucketEntry {
    bucket: TokenBucket,
    last_access: DateTime<Utc>,
}

/// Per-client admission control, keyed by remote address.
///
/// Buckets are created lazily on first sight of a key and evicted once idle
/// beyond `idle_timeout`. The map is guarded by a reader/writer lock so the
/// hot path (existing key) takes only a read lock; each entry carries its own
/// mutex so refill-and-spend is atomic per key and two concurrent requests
/// can never both spend the last token.
pub struct RateLimiterRegistry {
    entries: RwLock<HashMap<String, Arc<Mutex<BucketEntry>>>>,
    config: RateLimiterConfig,
    clock: Arc<dyn Clock>,
}

impl RateLimiterRegistry {
    pub fn new(config: RateLimiterConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            config,
            clock,
        }
    }

    pub fn config(&self) -> &RateLimiterConfig {
        &self.config
    }

    /// Admission decision for `key`. Never errors; a denied request is a
    /// normal outcome the caller surfaces as 429.
    pub fn allow(&self, key: &str) -> bool {
        let entry = self.get_or_create(key);
        let mut entry = entry.lock();

        let now = self.clock.now_utc();
        // last_access is monotonically non-decreasing for the entry lifetime
        if now > entry.last_access {
            entry.last_access = now;
        }

        entry.bucket.allow(now)
    }

    /// Returns the entry for `key`, creating it if absent. Touching the
    /// entry's `last_access` happens under the entry lock in `allow`; creation
    /// itself stamps the current instant.
    fn get_or_create(&self, key: &str) -> Arc<Mutex<BucketEntry>> {
        if let Some(entry) = self.entries.read().get(key) {
            return Arc::clone(entry);
        }

        let now = self.clock.now_utc();
        let mut entries = self.entries.write();
        // Another writer may have raced us between the read and write lock
        Arc::clone(entries.entry(key.to_string()).or_insert_with(|| {
            Arc::new(Mutex::new(BucketEntry {
                bucket: TokenBucket::new(self.config.capacity, self.config.refill_per_sec, now),
                last_access: now,
            }))
        }))
    }

    /// Removes every entry idle longer than the configured threshold.
    /// Returns the number of evicted entries.
    pub fn sweep(&self) -> usize {
        let now = self.clock.now_utc();
        let idle = chrono::Duration::from_std(self.config.idle_timeout)
            .unwrap_or_else(|_| chrono::Duration::minutes(10));

        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, entry| now - entry.lock().last_access <= idle);
        before - entries.len()
    }

    /// Number of tracked clients.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

/// Handle to the background eviction task. Dropping the handle leaves the
/// task running for the process lifetime; `stop` shuts it down cleanly.
pub struct SweeperHandle {
    shutdown: tokio::sync::watch::Sender<bool>,
    task: tokio::task::JoinHandle<()>,
}

impl SweeperHandle {
    pub fn stop(self) -> tokio::task::JoinHandle<()> {
        let _ = self.shutdown.send(true);
        self.task
    }
}

/// Spawns the periodic idle-entry sweep. The period equals the idle timeout:
/// an entry survives at most two periods past its last access.
pub fn spawn_sweeper(registry: Arc<RateLimiterRegistry>) -> SweeperHandle {
    let (shutdown, mut rx) = tokio::sync::watch::channel(false);
    let period = registry.config.idle_timeout;

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // interval fires immediately; skip the first tick
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let evicted = registry.sweep();
                    if evicted > 0 {
                        tracing::debug!("rate limiter sweep evicted {} idle clients", evicted);
                    }
                }
                _ = rx.changed() => break,
            }
        }
    });

    SweeperHandle { shutdown, task }
}
