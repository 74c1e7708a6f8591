use std::time::Instant;

use bannerloop_core::{CarouselEvent, ProgressAnchors};
use tracing::trace;

use crate::animation::OffsetAnimator;
use crate::config::ViewportConfig;

/// State of the viewport after one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportFrame {
    pub offset: f64,
    /// The offset changed since the previous frame
    pub moved: bool,
    /// The last commanded move finished during this frame
    pub settled: bool,
}

/// Horizontal strip of equally spaced slots
///
/// Slot `p` is centered when the offset equals `p * slot_extent`.
#[derive(Debug, Clone)]
pub struct SimulatedViewport {
    animator: OffsetAnimator,
    slot_extent: f64,
    pending_settle: bool,
    last_offset: f64,
}

impl SimulatedViewport {
    pub fn new(config: ViewportConfig) -> Self {
        Self {
            slot_extent: config.slot_extent,
            animator: OffsetAnimator::new(config),
            pending_settle: false,
            last_offset: 0.0,
        }
    }

    #[inline]
    pub fn offset_for_slot(&self, slot: usize) -> f64 {
        slot as f64 * self.slot_extent
    }

    /// Anchor coordinates the engine needs for progress reports
    pub fn anchors(&self, real_len: usize) -> ProgressAnchors {
        ProgressAnchors::for_uniform_slots(self.slot_extent, real_len)
    }

    /// React to an engine event. Returns whether the viewport was commanded.
    pub fn apply(&mut self, event: &CarouselEvent) -> bool {
        self.apply_at(event, Instant::now())
    }

    pub fn apply_at(&mut self, event: &CarouselEvent, now: Instant) -> bool {
        match *event {
            CarouselEvent::ScrollTo {
                padded_index,
                animate,
            } => {
                self.scroll_to_slot(padded_index, animate, now);
                true
            }
            _ => false,
        }
    }

    /// Center `slot`, animated or as an instant jump
    pub fn scroll_to_slot(&mut self, slot: usize, animate: bool, now: Instant) {
        let target = self.offset_for_slot(slot);
        if animate {
            self.animator.scroll_to(target, now);
        } else {
            self.animator.set_offset(target);
        }
        self.pending_settle = true;
        trace!(slot, animate, target, "Viewport commanded");
    }

    /// Follow a finger: shift the offset without settling
    pub fn nudge(&mut self, delta: f64) {
        self.animator.nudge(delta);
    }

    pub fn update(&mut self) -> ViewportFrame {
        self.update_at(Instant::now())
    }

    /// Advance the animation; `settled` is reported once per commanded move
    pub fn update_at(&mut self, now: Instant) -> ViewportFrame {
        let offset = self.animator.update_at(now);
        let moved = offset != self.last_offset;
        self.last_offset = offset;

        let settled = self.pending_settle && !self.animator.is_animating();
        if settled {
            self.pending_settle = false;
        }

        ViewportFrame {
            offset,
            moved,
            settled,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use bannerloop_core::EasingType;

    fn viewport() -> SimulatedViewport {
        SimulatedViewport::new(ViewportConfig {
            slot_extent: 100.0,
            animation_duration_ms: 100,
            easing: EasingType::Linear,
            ..Default::default()
        })
    }

    #[test]
    fn test_instant_jump_settles_next_frame() {
        let mut vp = viewport();
        let now = Instant::now();
        assert!(vp.apply_at(
            &CarouselEvent::ScrollTo {
                padded_index: 2,
                animate: false
            },
            now
        ));

        let frame = vp.update_at(now);
        assert_eq!(frame.offset, 200.0);
        assert!(frame.moved);
        assert!(frame.settled);

        let frame = vp.update_at(now);
        assert!(!frame.moved);
        assert!(!frame.settled);
    }

    #[test]
    fn test_animated_move_settles_once_at_end() {
        let mut vp = viewport();
        let start = Instant::now();
        vp.scroll_to_slot(2, false, start);
        vp.update_at(start);

        vp.scroll_to_slot(3, true, start);
        let frame = vp.update_at(start + Duration::from_millis(40));
        assert!((frame.offset - 240.0).abs() < 0.001);
        assert!(!frame.settled);

        let frame = vp.update_at(start + Duration::from_millis(100));
        assert_eq!(frame.offset, 300.0);
        assert!(frame.settled);
    }

    #[test]
    fn test_anchors_match_slot_geometry() {
        let vp = viewport();
        let anchors = vp.anchors(5);
        assert_eq!(anchors.left, vp.offset_for_slot(1));
        assert_eq!(anchors.right, vp.offset_for_slot(7));
    }

    #[test]
    fn test_ignores_non_scroll_events() {
        let mut vp = viewport();
        assert!(!vp.apply(&CarouselEvent::ItemTapped { real_index: 1 }));
        assert!(!vp.update().settled);
    }
}
