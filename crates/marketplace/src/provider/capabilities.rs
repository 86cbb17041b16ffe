//! Rate limiting configuration for marketplace providers.

use std::time::Duration;

/// Rate limiting configuration for a marketplace.
///
/// Controls how aggressively we can call a marketplace to avoid
/// hitting their limits and getting blocked. The inventory worker uses
/// `min_delay` as its fixed inter-request pause.
#[derive(Clone, Debug)]
pub struct RateLimit {
    /// Maximum requests allowed per minute.
    pub requests_per_minute: u32,

    /// Minimum delay between sequential per-item requests.
    pub min_delay: Duration,
}

impl Default for RateLimit {
    fn default() -> Self {
        Self {
            requests_per_minute: 60,
            min_delay: Duration::from_millis(1000),
        }
    }
}
