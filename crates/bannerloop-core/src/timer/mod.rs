//! Repeating timer used to drive autoscroll
//!
//! The engine owns exactly one timer instance. Ticks are delivered back to
//! the engine by the host (`Carousel::on_autoscroll_tick`) and carry the
//! generation of the arming that produced them, so a tick that was already
//! queued when the timer got cancelled or restarted is recognised as stale.

mod manual;
mod tokio_timer;

use std::time::Duration;

pub use manual::ManualTimer;
pub use tokio_timer::TokioTimer;

/// A single timer firing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerTick {
    pub generation: u64,
}

/// Start/cancel contract of the autoscroll timer
pub trait RepeatingTimer {
    /// Arm the timer. If it is already armed, the countdown restarts from now.
    fn start(&mut self, interval: Duration);

    /// Disarm the timer. Calling this on a disarmed timer does nothing.
    fn cancel(&mut self);

    fn is_armed(&self) -> bool;

    /// Whether `tick` was produced by the current arming
    fn is_current(&self, tick: TimerTick) -> bool;
}
