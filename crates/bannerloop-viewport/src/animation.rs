//! Offset animation controller
//!
//! Moves the viewport offset towards a target slot over a fixed duration.
//! The host samples it once per frame with an explicit instant.

use std::time::{Duration, Instant};

use bannerloop_core::EasingType;

use crate::config::{ViewportConfig, ViewportConfigExt};

/// Fraction of the move covered at linear time fraction `t`
fn eased(easing: EasingType, t: f64) -> f64 {
    match easing {
        EasingType::Linear => t,
        // 1 - (1-t)^3
        EasingType::EaseOut => 1.0 - (1.0 - t).powi(3),
    }
}

#[derive(Debug, Clone)]
struct ActiveAnimation {
    start: Instant,
    from: f64,
    to: f64,
    duration: Duration,
    easing: EasingType,
}

impl ActiveAnimation {
    /// Offset at `now`, or `None` once the move is over
    fn sample(&self, now: Instant) -> Option<f64> {
        let elapsed = now.saturating_duration_since(self.start);
        if elapsed >= self.duration {
            return None;
        }
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        Some(self.from + (self.to - self.from) * eased(self.easing, t))
    }
}

/// Offset animation controller
///
/// Call `scroll_to()` to begin an animation, then `update_at()` each frame
/// to get the current interpolated offset.
#[derive(Debug, Clone)]
pub struct OffsetAnimator {
    animation: Option<ActiveAnimation>,
    config: ViewportConfig,
    /// Current offset (always up-to-date)
    current: f64,
}

impl OffsetAnimator {
    pub fn new(config: ViewportConfig) -> Self {
        Self {
            animation: None,
            config,
            current: 0.0,
        }
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    #[inline]
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Set offset immediately (no animation)
    pub fn set_offset(&mut self, offset: f64) {
        self.animation = None;
        self.current = offset;
    }

    /// Shift the offset by `delta`, abandoning any running animation
    pub fn nudge(&mut self, delta: f64) {
        self.set_offset(self.current + delta);
    }

    /// Start an animation from the current offset to `target`
    ///
    /// Jumps immediately when animation is disabled or already at target.
    /// A running animation is replaced, starting from where it is now.
    pub fn scroll_to(&mut self, target: f64, now: Instant) {
        if !self.config.is_smooth() || self.current == target {
            self.set_offset(target);
            return;
        }

        self.animation = Some(ActiveAnimation {
            start: now,
            from: self.current,
            to: target,
            duration: self.config.animation_duration(),
            easing: self.config.easing,
        });
    }

    /// Advance the animation to `now` and return the current offset
    pub fn update_at(&mut self, now: Instant) -> f64 {
        if let Some(anim) = self.animation.take() {
            match anim.sample(now) {
                Some(offset) => {
                    self.current = offset;
                    self.animation = Some(anim);
                }
                None => self.current = anim.to,
            }
        }

        self.current
    }
}
