use chrono::{DateTime, Utc};

/// Token-bucket rate limiter primitive.
///
/// Holds a fractional token count bounded in `[0, capacity]`. Tokens refill
/// continuously at `refill_per_sec`; each admitted call spends one token.
/// Callers pass the current instant explicitly so the bucket itself never
/// reads the clock.
#[derive(Debug, Clone)]
pub struct TokenBucket {
    capacity: f64,
    refill_per_sec: f64,
    tokens: f64,
    last_refill: DateTime<Utc>,
}

impl TokenBucket {
    /// Creates a full bucket.
    pub fn new(capacity: f64, refill_per_sec: f64, now: DateTime<Utc>) -> Self {
        Self {
            capacity,
            refill_per_sec,
            tokens: capacity,
            last_refill: now,
        }
    }

    /// Refills proportionally to elapsed time, then admits iff at least one
    /// whole token is available. Exactly 1.0 tokens admits.
    pub fn allow(&mut self, now: DateTime<Utc>) -> bool {
        self.refill(now);

        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    /// Current token count, after refilling to `now`. Exposed for tests and
    /// introspection; does not spend a token.
    pub fn tokens(&mut self, now: DateTime<Utc>) -> f64 {
        self.refill(now);
        self.tokens
    }

    fn refill(&mut self, now: DateTime<Utc>) {
        // Clamp at zero so a clock moving backward never drains the bucket.
        let elapsed_ms = (now - self.last_refill).num_milliseconds().max(0);
        let elapsed_secs = elapsed_ms as f64 / 1000.0;

        self.tokens = (self.tokens + elapsed_secs * self.refill_per_sec).min(self.capacity);
        if now > self.last_refill {
            self.last_refill = now;
        }
    }
}
