// src/crawl/pacing.rs
// =============================================================================
// Rate limiting for the concurrent crawl.
//
// When several fetches run at once, "sleep after each page" no longer means
// much. Instead every request waits for its turn: request starts are spaced
// at least `interval` apart. The next free slot lives behind an async mutex,
// and the waiter keeps the lock while sleeping so turns are handed out one by
// one, in the order the requests asked for them.
// =============================================================================

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{sleep_until, Instant};

// About 30 years; large enough to never fire, small enough to add safely
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

#[derive(Debug)]
pub struct RequestPacer {
    interval: Duration,
    next_slot: Mutex<Option<Instant>>,
}

impl RequestPacer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_slot: Mutex::new(None),
        }
    }

    // Waits until this caller may start a request
    //
    // The first request never waits. A zero interval never waits.
    pub async fn wait_turn(&self) {
        if self.interval.is_zero() {
            return;
        }

        let mut next_slot = self.next_slot.lock().await;

        if let Some(slot) = *next_slot {
            if slot > Instant::now() {
                sleep_until(slot).await;
            }
        }

        let now = Instant::now();
        *next_slot = Some(now.checked_add(self.interval).unwrap_or_else(|| far_future(now)));
    }
}

// A slot no crawl will live to see, for intervals too large to add to now
fn far_future(now: Instant) -> Instant {
    now + FAR_FUTURE
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why tokio::sync::Mutex and not std::sync::Mutex?
//    - We hold the lock across an .await (the sleep)
//    - A std guard must not be held across .await points
//    - The tokio mutex is built for exactly this
//
// 2. Why tokio::time::Instant?
//    - It follows tokio's clock, which tests can pause and fast-forward
//    - That lets the tests check exact timings without really sleeping
// -----------------------------------------------------------------------------
