//! Circular carousel engine
//!
//! Owns the padded sequence and the logical selection, turns host input
//! (settle, drag, continuous offset, autoscroll ticks) into typed
//! [`CarouselEvent`]s. All operations are synchronous and expected to run on
//! one thread; only the autoscroll timer fires on its own schedule.
//!
//! The logical index lives in `[-1, N]`. `-1` and `N` are virtual positions
//! on the sentinel slots next to the real range and are resolved to `N-1`
//! and `0` by a non-animated jump once the viewport settles.

mod events;
mod input;
mod navigation;
mod progress;

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::config::CarouselConfig;
use crate::sequence::PaddedSequence;
use crate::timer::RepeatingTimer;
use crate::Result;

pub use events::CarouselEvent;
pub use progress::{ProgressAnchors, ProgressReport, ProgressSkip};

use input::DragState;
use progress::Bracket;

/// Whether a commanded viewport move is still in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Settling { padded_target: usize, animate: bool },
}

/// Carousel engine for one widget instance
#[derive(Debug)]
pub struct Carousel<T, R: RepeatingTimer> {
    config: CarouselConfig,
    timer: R,
    padded: Option<PaddedSequence<T>>,
    selected: i64,
    prev_selected: i64,
    /// Last real selection announced through `SelectionChanged`
    reported_selection: Option<usize>,
    phase: Phase,
    anchors: Option<ProgressAnchors>,
    bracket: Option<Bracket>,
    drag: DragState,
    /// Set by `shutdown`; the timer stays cancelled from then on
    shut_down: bool,
    event_tx: Option<mpsc::UnboundedSender<CarouselEvent>>,
}

impl<T: Clone, R: RepeatingTimer> Carousel<T, R> {
    /// Create an engine with no items; call [`Carousel::supply_items`] next
    pub fn new(config: CarouselConfig, timer: R) -> Self {
        Self {
            config,
            timer,
            padded: None,
            selected: 0,
            prev_selected: 0,
            reported_selection: None,
            phase: Phase::Idle,
            anchors: None,
            bracket: None,
            drag: DragState::default(),
            shut_down: false,
            event_tx: None,
        }
    }

    /// Set the event sender the presentation layer listens on
    pub fn with_event_sender(mut self, tx: mpsc::UnboundedSender<CarouselEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    /// Replace the real items
    ///
    /// Rebuilds the padded sequence, forgets measured anchors and clamps the
    /// retained index into the new range. On error the previous state is
    /// left untouched.
    pub fn supply_items(&mut self, items: Vec<T>) -> Result<()> {
        let padded = match PaddedSequence::build(&items) {
            Ok(padded) => padded,
            Err(e) => {
                warn!(count = items.len(), "Rejected carousel items: {}", e);
                return Err(e);
            }
        };

        let real_len = padded.real_len() as i64;
        let first_supply = self.padded.is_none();
        self.padded = Some(padded);
        self.anchors = None;
        self.bracket = None;
        self.reported_selection = None;

        let start = if first_supply {
            self.selected = 0;
            self.prev_selected = 0;
            0
        } else {
            self.selected.clamp(-1, real_len)
        };

        debug!(real_len, start, first_supply, "Carousel items supplied");
        self.set_index(start, false)?;
        self.rearm_autoscroll();
        Ok(())
    }

    /// Stop the widget: cancel autoscroll, drop the pending move and detach
    /// the event sender
    ///
    /// Final. Later drags are refused and nothing re-arms the timer.
    pub fn shutdown(&mut self) {
        self.shut_down = true;
        self.timer.cancel();
        self.phase = Phase::Idle;
        self.drag = DragState::default();
        self.event_tx = None;
        debug!("Carousel shut down");
    }

    /// Logical index, possibly virtual (`-1` or `N`)
    #[inline]
    pub fn selected_index(&self) -> i64 {
        self.selected
    }

    #[inline]
    pub fn prev_selected_index(&self) -> i64 {
        self.prev_selected
    }

    /// Real item the logical index resolves to
    pub fn real_selected_index(&self) -> Option<usize> {
        self.resolve(self.selected)
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn padded(&self) -> Option<&PaddedSequence<T>> {
        self.padded.as_ref()
    }

    pub fn real_len(&self) -> Option<usize> {
        self.padded.as_ref().map(PaddedSequence::real_len)
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn timer(&self) -> &R {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut R {
        &mut self.timer
    }

    /// Configured autoscroll interval, `None` when disabled
    pub fn autoscroll_interval(&self) -> Option<Duration> {
        match self.config.autoscroll_interval_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }

    /// Map a logical index onto the real item it stands for
    fn resolve(&self, logical: i64) -> Option<usize> {
        let n = self.real_len()? as i64;
        let index = match logical.clamp(-1, n) {
            -1 => n - 1,
            l if l == n => 0,
            l => l,
        };
        Some(index as usize)
    }

    /// Send an event to the host (if event channel is configured)
    fn send_event(&self, event: CarouselEvent) {
        if let Some(ref tx) = self.event_tx {
            if tx.send(event).is_err() {
                warn!("Failed to send carousel event: receiver dropped");
            }
        }
    }
}

impl<T, R: RepeatingTimer> Drop for Carousel<T, R> {
    fn drop(&mut self) {
        self.timer.cancel();
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use tokio::sync::mpsc;

    use super::*;
    use crate::timer::ManualTimer;

    pub type TestCarousel = Carousel<&'static str, ManualTimer>;

    pub fn letters() -> Vec<&'static str> {
        vec!["a", "b", "c", "d", "e"]
    }

    /// Engine with five items and autoscroll disabled
    pub fn carousel() -> (TestCarousel, mpsc::UnboundedReceiver<CarouselEvent>) {
        carousel_with(CarouselConfig {
            autoscroll_interval_ms: 0,
            ..Default::default()
        })
    }

    pub fn carousel_with(
        config: CarouselConfig,
    ) -> (TestCarousel, mpsc::UnboundedReceiver<CarouselEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut carousel = Carousel::new(config, ManualTimer::new()).with_event_sender(tx);
        carousel.supply_items(letters()).unwrap();
        (carousel, rx)
    }

    pub fn drain(rx: &mut mpsc::UnboundedReceiver<CarouselEvent>) -> Vec<CarouselEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    pub fn scrolls(events: &[CarouselEvent]) -> Vec<(usize, bool)> {
        events
            .iter()
            .filter_map(|e| match e {
                CarouselEvent::ScrollTo {
                    padded_index,
                    animate,
                } => Some((*padded_index, *animate)),
                _ => None,
            })
            .collect()
    }
}
