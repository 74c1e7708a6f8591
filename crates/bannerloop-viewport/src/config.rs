//! Configuration helpers for the simulated viewport

use std::time::Duration;

pub use bannerloop_core::ViewportConfig;

/// Extension trait for ViewportConfig with utility methods
pub trait ViewportConfigExt {
    /// Get animation duration as Duration
    fn animation_duration(&self) -> Duration;

    /// Get frame duration while animating
    fn frame_duration(&self) -> Duration;

    /// Check if animated moves are effectively enabled
    fn is_smooth(&self) -> bool;
}

impl ViewportConfigExt for ViewportConfig {
    #[inline]
    fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    #[inline]
    fn frame_duration(&self) -> Duration {
        if self.animation_fps == 0 {
            Duration::from_millis(16) // ~60fps fallback
        } else {
            Duration::from_millis(1000 / self.animation_fps as u64)
        }
    }

    #[inline]
    fn is_smooth(&self) -> bool {
        self.smooth_enabled && self.animation_duration_ms > 0
    }
}
