use std::collections::HashMap;
use std::sync::Mutex;
use time::{OffsetDateTime, Duration};
use tracing::{warn, error};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RateLimitError {
    #[error("Too many votes. Please try again in {0} minutes.")]
    Exceeded(i64),
    #[error("Internal rate limit error")]
    Unavailable,
}

#[derive(Debug)]
struct Window {
    attempts: u32,
    opened_at: OffsetDateTime,
}

/// Fixed-window attempt counter keyed by caller.
#[derive(Debug)]
pub struct RateLimiter {
    windows: Mutex<HashMap<String, Window>>,
    max_attempts: u32,
    window: Duration,
}

impl RateLimiter {
    pub fn new(max_attempts: u32, window_minutes: i64) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            max_attempts,
            window: Duration::minutes(window_minutes),
        }
    }

    pub fn check(&self, key: &str) -> Result<(), RateLimitError> {
        self.check_at(key, OffsetDateTime::now_utc())
    }

    pub fn check_at(&self, key: &str, now: OffsetDateTime) -> Result<(), RateLimitError> {
        let mut windows = self.windows.lock().map_err(|e| {
            error!("Failed to acquire rate limit lock: {}", e);
            RateLimitError::Unavailable
        })?;

        windows.retain(|_, w| now - w.opened_at <= self.window * 2);

        let window = windows.entry(key.to_string()).or_insert(Window { attempts: 0, opened_at: now });
        if now - window.opened_at > self.window {
            *window = Window { attempts: 0, opened_at: now };
        }

        if window.attempts >= self.max_attempts {
            let wait = (window.opened_at + self.window - now).whole_minutes().max(1);
            warn!("Rate limit triggered for key {}", key);
            return Err(RateLimitError::Exceeded(wait));
        }

        window.attempts += 1;
        Ok(())
    }
}
