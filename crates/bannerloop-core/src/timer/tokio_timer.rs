use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, warn};

use super::{RepeatingTimer, TimerTick};

/// Timer backed by a spawned tokio task
///
/// Ticks are sent over an unbounded channel; the host forwards them to the
/// engine. `start` must be called from within a tokio runtime.
#[derive(Debug)]
pub struct TokioTimer {
    tx: mpsc::UnboundedSender<TimerTick>,
    generation: u64,
    task: Option<JoinHandle<()>>,
}

impl TokioTimer {
    pub fn new(tx: mpsc::UnboundedSender<TimerTick>) -> Self {
        Self {
            tx,
            generation: 0,
            task: None,
        }
    }

    /// Create a timer together with the receiving end of its tick channel
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<TimerTick>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

impl RepeatingTimer for TokioTimer {
    fn start(&mut self, interval: Duration) {
        self.cancel();

        if interval.is_zero() {
            warn!("Refusing to start timer with zero interval");
            return;
        }

        self.generation += 1;
        let generation = self.generation;
        let tx = self.tx.clone();

        self.task = Some(tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if tx.send(TimerTick { generation }).is_err() {
                    debug!(generation, "Timer receiver dropped, stopping");
                    break;
                }
            }
        }));

        debug!(generation, interval_ms = interval.as_millis(), "Timer armed");
    }

    fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!(generation = self.generation, "Timer cancelled");
        }
    }

    fn is_armed(&self) -> bool {
        self.task.is_some()
    }

    fn is_current(&self, tick: TimerTick) -> bool {
        self.task.is_some() && tick.generation == self.generation
    }
}

impl Drop for TokioTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_interval() {
        let (mut timer, mut rx) = TokioTimer::channel();
        timer.start(Duration::from_millis(3000));

        tokio::time::sleep(Duration::from_millis(2999)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(2)).await;
        let tick = rx.try_recv().unwrap();
        assert!(timer.is_current(tick));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_ticks() {
        let (mut timer, mut rx) = TokioTimer::channel();
        timer.start(Duration::from_millis(100));
        timer.cancel();
        timer.cancel();

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(rx.try_recv().is_err());
        assert!(!timer.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_invalidates_queued_tick() {
        let (mut timer, mut rx) = TokioTimer::channel();
        timer.start(Duration::from_millis(100));
        tokio::time::sleep(Duration::from_millis(101)).await;
        let stale = rx.try_recv().unwrap();

        timer.start(Duration::from_millis(100));
        assert!(!timer.is_current(stale));

        tokio::time::sleep(Duration::from_millis(101)).await;
        let fresh = rx.try_recv().unwrap();
        assert!(timer.is_current(fresh));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_interval_is_not_armed() {
        let (mut timer, _rx) = TokioTimer::channel();
        timer.start(Duration::ZERO);
        assert!(!timer.is_armed());
    }
}
