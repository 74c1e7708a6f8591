//! Arbitration between user drags and the autoscroll timer
//!
//! Only one driver moves the viewport: a drag start cancels the timer, a
//! release re-arms it (when an interval is configured) and locks out new
//! drags for a short cooldown.

use tokio::time::Instant;
use tracing::{debug, trace};

use super::Carousel;
use crate::timer::{RepeatingTimer, TimerTick};
use crate::Result;

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct DragState {
    active: bool,
    locked_until: Option<Instant>,
}

impl<T: Clone, R: RepeatingTimer> Carousel<T, R> {
    /// A drag began. Returns `false` if it was dropped by the release cooldown.
    pub fn on_drag_started(&mut self) -> bool {
        if self.shut_down {
            trace!("Drag after shutdown ignored");
            return false;
        }

        let now = Instant::now();
        if let Some(until) = self.drag.locked_until {
            if now < until {
                debug!(
                    remaining_ms = (until - now).as_millis(),
                    "Drag dropped during cooldown"
                );
                return false;
            }
        }

        self.timer.cancel();
        self.drag = DragState {
            active: true,
            locked_until: None,
        };
        debug!("Drag started, autoscroll paused");
        true
    }

    /// A drag ended with the given content displacement (positive = forward)
    pub fn on_drag_released(&mut self, displacement: f64) -> Result<()> {
        if !self.drag.active {
            trace!(displacement, "Release without an accepted drag ignored");
            return Ok(());
        }

        self.drag = DragState {
            active: false,
            locked_until: Some(Instant::now() + self.config.drag_cooldown()),
        };

        let threshold = self.config.drag_threshold.abs();
        let step = if displacement > threshold {
            1
        } else if displacement < -threshold {
            -1
        } else {
            0
        };
        debug!(displacement, threshold, step, "Drag released");

        let moved = match step {
            0 => Ok(()),
            step => self.set_index(self.selected + step, true).map(|_| ()),
        };
        self.rearm_autoscroll();
        moved
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.drag.active
    }

    /// Change the autoscroll interval; `0` disables autoscroll
    pub fn configure_autoscroll(&mut self, interval_ms: u64) {
        self.config.autoscroll_interval_ms = interval_ms;
        debug!(interval_ms, "Autoscroll configured");
        self.rearm_autoscroll();
    }

    /// Advance one item on an autoscroll tick
    ///
    /// Ticks from a cancelled or restarted arming are dropped. Returns whether
    /// the tick moved the carousel.
    pub fn on_autoscroll_tick(&mut self, tick: TimerTick) -> Result<bool> {
        if !self.timer.is_current(tick) {
            trace!(generation = tick.generation, "Stale autoscroll tick dropped");
            return Ok(false);
        }

        // next interval counts from this tick
        self.rearm_autoscroll();
        self.set_index(self.selected + 1, true)?;
        Ok(true)
    }

    /// Start the timer if autoscroll applies right now, cancel it otherwise
    pub(crate) fn rearm_autoscroll(&mut self) {
        match self.autoscroll_interval() {
            Some(interval) if !self.drag.active && !self.shut_down && self.padded.is_some() => {
                self.timer.start(interval);
                trace!(interval_ms = interval.as_millis(), "Autoscroll armed");
            }
            _ => self.timer.cancel(),
        }
    }
}
