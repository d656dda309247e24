use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

type DirectLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Fixed-interval pacing shared by every outbound call, so steady-state spacing between
/// upstream requests lives in one place.
#[derive(Clone)]
pub struct RequestPacer {
    limiter: Arc<DirectLimiter>,
    interval: Duration,
}

impl RequestPacer {
    pub fn new(requests_per_second: f64) -> Self {
        let interval = interval_for(requests_per_second);
        let quota = Quota::with_period(interval)
            .unwrap_or_else(|| Quota::per_second(NonZeroU32::MIN))
            .allow_burst(NonZeroU32::MIN);

        RequestPacer {
            limiter: Arc::new(RateLimiter::direct(quota)),
            interval,
        }
    }

    pub async fn wait(&self) {
        self.limiter.until_ready().await;
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

fn interval_for(requests_per_second: f64) -> Duration {
    if !requests_per_second.is_finite() || requests_per_second <= 0.0 {
        return Duration::from_secs(1);
    }
    Duration::from_secs_f64(1.0 / requests_per_second).max(Duration::from_millis(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn interval_is_inverse_of_rate() {
        assert_eq!(interval_for(0.5), Duration::from_secs(2));
        assert_eq!(interval_for(4.0), Duration::from_millis(250));
        assert_eq!(interval_for(0.0), Duration::from_secs(1));
        assert_eq!(interval_for(f64::NAN), Duration::from_secs(1));
    }

    #[tokio::test]
    async fn second_request_waits_for_the_interval() {
        let pacer = RequestPacer::new(20.0);
        let start = Instant::now();
        pacer.wait().await;
        pacer.wait().await;
        pacer.wait().await;
        // first permit is free, the next two are spaced by 50ms each
        assert!(start.elapsed() >= Duration::from_millis(90));
        assert_eq!(pacer.interval(), Duration::from_millis(50));
    }
}
