use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Clamped time since the previous tick.
    pub dt: Duration,

    pub now: Instant,

    pub frame_index: u64,
}

impl FrameTime {
    #[inline]
    pub fn dt_secs(&self) -> f32 {
        self.dt.as_secs_f32()
    }
}

/// Produces `FrameTime` snapshots.
///
/// Delta time is clamped so a debugger pause or a minimised window does
/// not turn into a burst of game ticks.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self { last: Instant::now(), frame_index: 0, dt_min, dt_max }
    }

    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    /// [`tick`](Self::tick) with an explicit timestamp.
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);
        self.last = now;

        let ft = FrameTime { dt, now, frame_index: self.frame_index };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dt_is_clamped_and_frames_counted() {
        let start = Instant::now();
        let mut clock = FrameClock::with_clamps(Duration::from_millis(1), Duration::from_millis(100));
        clock.last = start;

        let a = clock.tick_at(start);
        assert_eq!(a.dt, Duration::from_millis(1));
        assert_eq!(a.frame_index, 0);

        let b = clock.tick_at(start + Duration::from_secs(5));
        assert_eq!(b.dt, Duration::from_millis(100));
        assert_eq!(b.frame_index, 1);
    }
}
