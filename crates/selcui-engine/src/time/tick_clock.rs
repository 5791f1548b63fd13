use std::time::Duration;

/// Length of one game tick (20 per second).
pub const TICK_DURATION: Duration = Duration::from_millis(50);

/// Upper bound on ticks reported by one advance.
const MAX_CATCH_UP: u32 = 10;

/// Result of advancing a [`TickClock`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TickStep {
    /// Whole ticks that elapsed.
    pub ticks: u32,
    /// Fraction of the next tick already elapsed, in `[0, 1)`.
    pub partial: f32,
}

/// Fixed-rate tick accumulator driven by frame deltas.
#[derive(Debug, Clone, Default)]
pub struct TickClock {
    accumulated: Duration,
    total_ticks: u64,
}

impl TickClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, dt: Duration) -> TickStep {
        self.accumulated += dt;

        let mut ticks = 0;
        while self.accumulated >= TICK_DURATION {
            self.accumulated -= TICK_DURATION;
            ticks += 1;
        }
        if ticks > MAX_CATCH_UP {
            log::debug!("dropping {} game ticks after a stall", ticks - MAX_CATCH_UP);
            ticks = MAX_CATCH_UP;
        }
        self.total_ticks += u64::from(ticks);

        TickStep { ticks, partial: self.partial() }
    }

    #[inline]
    pub fn partial(&self) -> f32 {
        self.accumulated.as_secs_f32() / TICK_DURATION.as_secs_f32()
    }

    #[inline]
    pub fn total_ticks(&self) -> u64 {
        self.total_ticks
    }
}
