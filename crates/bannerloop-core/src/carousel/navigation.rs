use tracing::{debug, warn};

use super::{Carousel, CarouselEvent, Phase};
use crate::sequence::SENTINELS_PER_SIDE;
use crate::timer::RepeatingTimer;
use crate::{Error, Result};

impl<T: Clone, R: RepeatingTimer> Carousel<T, R> {
    /// Move to a logical index
    ///
    /// The request is clamped into `[-1, N]` and overrides any move still in
    /// flight. Returns the padded slot the viewport is told to center.
    pub fn set_index(&mut self, requested: i64, animate: bool) -> Result<usize> {
        let Some(real_len) = self.real_len() else {
            warn!(requested, "Ignoring index change: carousel has no items");
            return Err(Error::NoItems);
        };

        let clamped = requested.clamp(-1, real_len as i64);
        self.prev_selected = self.selected;
        self.selected = clamped;

        let padded_target = (clamped + SENTINELS_PER_SIDE as i64) as usize;
        self.phase = Phase::Settling {
            padded_target,
            animate,
        };

        debug!(
            requested,
            selected = self.selected,
            previous = self.prev_selected,
            padded_target,
            animate,
            "Carousel index changed"
        );

        self.send_event(CarouselEvent::ScrollTo {
            padded_index: padded_target,
            animate,
        });
        self.report_selection();

        Ok(padded_target)
    }

    /// The viewport finished the last commanded move
    ///
    /// A virtual index is resolved with a non-animated jump to the real slot
    /// showing the same item; otherwise the engine goes idle.
    pub fn on_settled(&mut self) -> Result<()> {
        let real_len = self.real_len().ok_or(Error::NoItems)? as i64;

        match self.selected {
            -1 => {
                debug!("Settled on leading sentinel, jumping to last item");
                self.set_index(real_len - 1, false)?;
            }
            s if s == real_len => {
                debug!("Settled on trailing sentinel, jumping to first item");
                self.set_index(0, false)?;
            }
            _ => self.phase = Phase::Idle,
        }

        Ok(())
    }

    /// Translate a tap on a rendered slot into the real item it shows
    pub fn item_tapped(&mut self, padded_slot: usize) -> Result<usize> {
        let padded = self.padded.as_ref().ok_or(Error::NoItems)?;
        let real_index = padded.real_index_of(padded_slot)?;
        self.send_event(CarouselEvent::ItemTapped { real_index });
        Ok(real_index)
    }

    /// Announce the real selection if it changed since the last announcement
    fn report_selection(&mut self) {
        let (Some(current), Some(previous)) =
            (self.resolve(self.selected), self.resolve(self.prev_selected))
        else {
            return;
        };

        if self.reported_selection == Some(current) {
            return;
        }

        self.reported_selection = Some(current);
        self.send_event(CarouselEvent::SelectionChanged { current, previous });
    }
}
