use std::time::Duration;

use super::{RepeatingTimer, TimerTick};

/// Timer advanced by the host's own clock
///
/// Useful for hosts that already run a frame loop: call [`ManualTimer::advance`]
/// with the frame delta and forward any returned tick to the engine.
#[derive(Debug, Clone, Default)]
pub struct ManualTimer {
    interval: Option<Duration>,
    elapsed: Duration,
    generation: u64,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward. Returns at most one tick per call.
    pub fn advance(&mut self, by: Duration) -> Option<TimerTick> {
        let interval = self.interval?;
        self.elapsed += by;
        if self.elapsed >= interval {
            // several missed intervals still yield one tick
            let carry = self.elapsed.as_nanos() % interval.as_nanos();
            self.elapsed = Duration::from_nanos(carry as u64);
            Some(TimerTick {
                generation: self.generation,
            })
        } else {
            None
        }
    }

    /// Time left until the next tick, if armed
    pub fn remaining(&self) -> Option<Duration> {
        self.interval.map(|i| i.saturating_sub(self.elapsed))
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl RepeatingTimer for ManualTimer {
    fn start(&mut self, interval: Duration) {
        self.generation += 1;
        self.elapsed = Duration::ZERO;
        self.interval = (!interval.is_zero()).then_some(interval);
    }

    fn cancel(&mut self) {
        self.interval = None;
        self.elapsed = Duration::ZERO;
    }

    fn is_armed(&self) -> bool {
        self.interval.is_some()
    }

    fn is_current(&self, tick: TimerTick) -> bool {
        self.interval.is_some() && tick.generation == self.generation
    }
}
