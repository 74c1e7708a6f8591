//! Presentation-side stand-in for the carousel engine
//!
//! A horizontal strip of equally sized slots with an animated scroll offset.
//! It obeys `ScrollTo` instructions, reports the continuous offset while
//! moving and signals exactly once when each move has settled.
//!
//! - `config` - Configuration helpers (types re-exported from bannerloop-core)
//! - `animation` - Eased offset animator
//! - `viewport` - Slot geometry and settle tracking

pub mod animation;
pub mod config;
pub mod viewport;

pub use animation::OffsetAnimator;
pub use bannerloop_core::EasingType;
pub use config::{ViewportConfig, ViewportConfigExt};
pub use viewport::{SimulatedViewport, ViewportFrame};
