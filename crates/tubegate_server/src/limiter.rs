//! Per-client request limiting using governor.

use crate::RateLimitConfig;
use governor::clock::{Clock, DefaultClock};
use governor::state::keyed::DefaultKeyedStateStore;
use governor::{Quota, RateLimiter as GovernorRateLimiter};
use std::num::NonZeroU32;
use std::time::Duration;
use tubegate_error::ConfigError;

type KeyedRateLimiter = GovernorRateLimiter<String, DefaultKeyedStateStore<String>, DefaultClock>;

/// GCRA limiter keyed by client address.
pub struct ClientLimiter {
    limiter: KeyedRateLimiter,
}

impl std::fmt::Debug for ClientLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientLimiter")
            .field("tracked", &self.tracked())
            .finish()
    }
}

impl ClientLimiter {
    /// Build from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the rate or burst is zero.
    pub fn new(config: &RateLimitConfig) -> Result<Self, ConfigError> {
        let rate = NonZeroU32::new(config.requests_per_second)
            .ok_or_else(|| ConfigError::new("rate_limit requests_per_second must be greater than zero"))?;
        let burst = NonZeroU32::new(config.burst)
            .ok_or_else(|| ConfigError::new("rate_limit burst must be greater than zero"))?;
        let quota = Quota::per_second(rate).allow_burst(burst);
        Ok(Self {
            limiter: GovernorRateLimiter::keyed(quota),
        })
    }

    /// Admit one request from `client`, or say how long it must wait.
    pub fn check(&self, client: &str) -> Result<(), Duration> {
        self.limiter
            .check_key(&client.to_string())
            .map_err(|not_until| not_until.wait_time_from(DefaultClock::default().now()))
    }

    /// Forget clients whose state has fully replenished.
    pub fn retain_recent(&self) {
        self.limiter.retain_recent();
    }

    /// Number of clients currently tracked.
    pub fn tracked(&self) -> usize {
        self.limiter.len()
    }
}
