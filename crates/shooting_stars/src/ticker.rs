//! The clock that decides when the next tick is due.

/// The number of microseconds in a second.
pub const ONE_MICROSECOND: u64 = 1_000_000;

/// Paces ticks to a target rate.
pub(crate) struct Ticker {
    /// The time between ticks.
    interval: std::time::Duration,
    /// The time at which the previous tick happened.
    last_tick: tokio::time::Instant,
}

impl Ticker {
    /// Instantiate. The frame rate must be at least 1.
    pub fn new(frame_rate: u32) -> Self {
        let target = ONE_MICROSECOND.wrapping_div(u64::from(frame_rate.max(1)));
        Self {
            interval: std::time::Duration::from_micros(target),
            last_tick: tokio::time::Instant::now(),
        }
    }

    /// The time between ticks.
    pub const fn interval(&self) -> std::time::Duration {
        self.interval
    }

    /// Sleep until the next tick is due.
    pub async fn sleep_until_next_tick(&mut self) {
        if let Some(wait) = self.interval.checked_sub(self.last_tick.elapsed()) {
            tokio::time::sleep(wait).await;
        }
        self.last_tick = tokio::time::Instant::now();
    }
}
