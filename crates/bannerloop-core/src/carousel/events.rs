use serde::Serialize;

use super::ProgressReport;

/// Output of the engine, consumed by the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CarouselEvent {
    /// Move the viewport so that `padded_index` is centered, then call
    /// `Carousel::on_settled`
    ScrollTo { padded_index: usize, animate: bool },
    /// The centered real item changed
    SelectionChanged { current: usize, previous: usize },
    /// Page-indicator interpolation between two adjacent real items
    ProgressChanged(ProgressReport),
    /// A rendered slot was tapped; sentinels are translated to their real item
    ItemTapped { real_index: usize },
}
