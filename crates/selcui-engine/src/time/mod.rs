//! Time subsystem.
//!
//! - one `FrameClock` per window; `tick()` once per presented frame
//! - one `TickClock` per session; turns frame deltas into fixed game ticks
//!   plus the interpolation fraction the overlay draws with

mod frame_clock;
mod tick_clock;

pub use frame_clock::{FrameClock, FrameTime};
pub use tick_clock::{TickClock, TickStep, TICK_DURATION};
