//! Repeating callbacks scoped to a page.
//!
//! A `Ticker` fires its callback every period until it is cancelled or
//! dropped. Cancelling clears the browser interval at once, and the gate
//! flag stops a tick that was already queued from running.

#[cfg(test)]
#[path = "ticker_test.rs"]
mod ticker_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

#[cfg(feature = "csr")]
type Timer = gloo_timers::callback::Interval;

/// Nothing schedules ticks outside the browser.
#[cfg(not(feature = "csr"))]
type Timer = std::convert::Infallible;

pub struct Ticker {
    active: Arc<AtomicBool>,
    timer: Option<Timer>,
}

impl Ticker {
    /// Call `tick` every `period` (at least one millisecond).
    pub fn every(period: Duration, tick: impl Fn() + 'static) -> Self {
        let mut ticker = Self {
            active: Arc::new(AtomicBool::new(true)),
            timer: None,
        };
        ticker.timer = start_timer(period, ticker.gate(tick));
        ticker
    }

    /// Wrap `tick` so it does nothing once this ticker is cancelled.
    pub fn gate<F: Fn() + 'static>(&self, tick: F) -> impl Fn() + 'static + use<F> {
        let active = Arc::clone(&self.active);
        move || {
            if active.load(Ordering::Relaxed) {
                tick();
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Relaxed)
    }

    /// Stop ticking. Later calls are no-ops.
    pub fn cancel(&mut self) {
        if self.active.swap(false, Ordering::Relaxed) {
            log::debug!("ticker cancelled");
        }
        self.timer = None;
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(feature = "csr")]
fn start_timer(period: Duration, tick: impl Fn() + 'static) -> Option<Timer> {
    let millis = u32::try_from(period.as_millis()).unwrap_or(u32::MAX).max(1);
    Some(gloo_timers::callback::Interval::new(millis, tick))
}

#[cfg(not(feature = "csr"))]
fn start_timer(_period: Duration, _tick: impl Fn() + 'static) -> Option<Timer> {
    None
}
