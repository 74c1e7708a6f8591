pub mod carousel;
pub mod config;
pub mod error;
pub mod sequence;
pub mod timer;

pub use carousel::{Carousel, CarouselEvent, Phase, ProgressAnchors, ProgressReport, ProgressSkip};
pub use config::{AppConfig, CarouselConfig, EasingType, ViewportConfig};
pub use error::{Error, Result};
pub use sequence::PaddedSequence;
pub use timer::{ManualTimer, RepeatingTimer, TimerTick, TokioTimer};
