use governor::clock::{Clock, DefaultClock};
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::thread;

pub type Limiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

pub fn per_second(rate: NonZeroU32) -> Limiter {
    Arc::new(RateLimiter::direct(Quota::per_second(rate)))
}

/// One polyline line per second, matching the public geocoder's usage policy.
pub fn line_limiter() -> Limiter {
    per_second(NonZeroU32::MIN)
}

/// Blocks the current thread until the limiter lets one cell through.
pub fn wait(limiter: &Limiter) {
    let clock = DefaultClock::default();
    while let Err(not_until) = limiter.check() {
        thread::sleep(not_until.wait_time_from(clock.now()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn first_cell_passes_immediately() {
        let limiter = line_limiter();
        let started = Instant::now();
        wait(&limiter);
        assert!(started.elapsed() < Duration::from_millis(200));
    }

    #[test]
    fn second_cell_is_delayed() {
        let limiter = line_limiter();
        wait(&limiter);
        let started = Instant::now();
        wait(&limiter);
        assert!(started.elapsed() >= Duration::from_millis(500));
    }
}
