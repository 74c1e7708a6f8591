//! Continuous progress between adjacent real items, for page indicators
//!
//! Offsets are mapped onto a coordinate where the left anchor (center of the
//! leading sentinel showing the last item) is `0.0` and each real item step
//! is `1.0`, so real item `r` sits at `r + 1`.

use serde::Serialize;
use tracing::{debug, trace, warn};

use super::{Carousel, CarouselEvent};
use crate::timer::RepeatingTimer;

/// Viewport-center coordinates of padded slot 1 and padded slot N+2
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressAnchors {
    pub left: f64,
    pub right: f64,
}

impl ProgressAnchors {
    pub fn new(left: f64, right: f64) -> Self {
        Self { left, right }
    }

    /// Anchors for a strip where slot `p` is centered at offset `p * slot_extent`
    pub fn for_uniform_slots(slot_extent: f64, real_len: usize) -> Self {
        Self {
            left: slot_extent,
            right: slot_extent * (real_len + 2) as f64,
        }
    }

    /// Distance between two consecutive real item centers
    pub fn spacing(&self, real_len: usize) -> Option<f64> {
        let spacing = (self.right - self.left) / (real_len + 1) as f64;
        (spacing.is_finite() && spacing > 0.0).then_some(spacing)
    }
}

/// Two adjacent real items and how far the viewport is between them
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressReport {
    pub first_item: usize,
    pub first_weight: f64,
    pub second_item: usize,
    pub second_weight: f64,
}

/// Why an offset produced no report
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProgressSkip {
    NoItems,
    UnmeasuredAnchors,
    /// Centered exactly on an item before any pair was bracketed
    NoBracket,
    /// The offset left the retained pair; the next offset recovers
    OutOfBracket { weight: f64 },
}

/// Retained pair of adjacent items the viewport is between
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Bracket {
    first: usize,
    second: usize,
    /// Unwrapped position of `second` (`N` for the trailing wrap)
    second_position: i64,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Map an offset onto a progress report, updating the retained bracket
pub(crate) fn interpolate(
    offset: f64,
    anchors: ProgressAnchors,
    real_len: usize,
    bracket: &mut Option<Bracket>,
) -> Result<ProgressReport, ProgressSkip> {
    let spacing = anchors
        .spacing(real_len)
        .ok_or(ProgressSkip::UnmeasuredAnchors)?;
    let raw = round2((offset - anchors.left) / spacing);

    let candidate_first = raw.floor() as i64 - 1;
    let candidate_second = raw.ceil() as i64 - 1;
    let n = real_len as i64;

    if candidate_first != candidate_second {
        // sentinel slots past either anchor show the real items modulo N
        *bracket = Some(Bracket {
            first: candidate_first.rem_euclid(n) as usize,
            second: candidate_second.rem_euclid(n) as usize,
            second_position: candidate_second,
        });
    }

    let current = bracket.ok_or(ProgressSkip::NoBracket)?;
    let second_weight = round2(raw - current.second_position as f64);
    if !(0.0..=1.0).contains(&second_weight) {
        return Err(ProgressSkip::OutOfBracket {
            weight: second_weight,
        });
    }

    Ok(ProgressReport {
        first_item: current.first,
        first_weight: 1.0 - second_weight,
        second_item: current.second,
        second_weight,
    })
}

impl<T: Clone, R: RepeatingTimer> Carousel<T, R> {
    /// Record the measured anchor coordinates
    ///
    /// The first valid measurement after items are supplied is cached; later
    /// ones are ignored until the items change. Returns whether it was stored.
    pub fn measure_anchors(&mut self, anchors: ProgressAnchors) -> bool {
        let Some(real_len) = self.real_len() else {
            return false;
        };
        if self.anchors.is_some() {
            return false;
        }
        if anchors.spacing(real_len).is_none() {
            warn!(
                left = anchors.left,
                right = anchors.right,
                "Ignoring degenerate progress anchors"
            );
            return false;
        }

        debug!(left = anchors.left, right = anchors.right, "Progress anchors measured");
        self.anchors = Some(anchors);
        true
    }

    pub fn anchors(&self) -> Option<ProgressAnchors> {
        self.anchors
    }

    /// Feed the viewport's continuous offset
    ///
    /// Emits and returns a report when the offset lies inside the bracketed
    /// pair; otherwise the tick is dropped.
    pub fn on_continuous_offset(&mut self, offset: f64) -> Option<ProgressReport> {
        match self.progress_for(offset) {
            Ok(report) => {
                self.send_event(CarouselEvent::ProgressChanged(report));
                Some(report)
            }
            Err(skip) => {
                trace!(offset, reason = ?skip, "No progress report");
                None
            }
        }
    }

    fn progress_for(&mut self, offset: f64) -> Result<ProgressReport, ProgressSkip> {
        let real_len = self.real_len().ok_or(ProgressSkip::NoItems)?;
        let anchors = self.anchors.ok_or(ProgressSkip::UnmeasuredAnchors)?;
        if !offset.is_finite() {
            return Err(ProgressSkip::OutOfBracket { weight: f64::NAN });
        }
        interpolate(offset, anchors, real_len, &mut self.bracket)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    const EPS: f64 = 1e-9;

    fn anchors() -> ProgressAnchors {
        // N = 5, slot p centered at p * 100
        ProgressAnchors::for_uniform_slots(100.0, 5)
    }

    fn report(offset: f64, bracket: &mut Option<Bracket>) -> Result<ProgressReport, ProgressSkip> {
        interpolate(offset, anchors(), 5, bracket)
    }

    #[test]
    fn test_spacing() {
        assert!((anchors().spacing(5).unwrap() - 100.0).abs() < EPS);
        assert_eq!(ProgressAnchors::new(10.0, 10.0).spacing(5), None);
        assert_eq!(ProgressAnchors::new(50.0, 10.0).spacing(5), None);
    }

    #[test]
    fn test_between_two_real_items() {
        let mut bracket = None;
        // real 1 at slot 3 (300), real 2 at slot 4 (400)
        let r = report(330.0, &mut bracket).unwrap();
        assert_eq!((r.first_item, r.second_item), (1, 2));
        assert!((r.second_weight - 0.3).abs() < EPS);
        assert!((r.first_weight - 0.7).abs() < EPS);
    }

    #[test]
    fn test_weights_sum_to_one() {
        let mut bracket = None;
        let mut offset = 101.0;
        while offset < 700.0 {
            if let Ok(r) = report(offset, &mut bracket) {
                assert!((r.first_weight + r.second_weight - 1.0).abs() < EPS, "offset {offset}");
                assert!((0.0..=1.0).contains(&r.second_weight));
            }
            offset += 7.0;
        }
    }

    #[test]
    fn test_leading_wrap_pairs_last_and_first() {
        let mut bracket = None;
        // between slot 1 (clone of e) and slot 2 (a)
        let r = report(140.0, &mut bracket).unwrap();
        assert_eq!((r.first_item, r.second_item), (4, 0));
        assert!((r.second_weight - 0.4).abs() < EPS);
    }

    #[test]
    fn test_trailing_wrap_pairs_last_and_first() {
        let mut bracket = None;
        // between slot 6 (e) and slot 7 (clone of a)
        let r = report(625.0, &mut bracket).unwrap();
        assert_eq!((r.first_item, r.second_item), (4, 0));
        assert!((r.second_weight - 0.25).abs() < EPS);
    }

    #[test]
    fn test_offsets_past_the_anchors_pair_sentinel_items() {
        let mut bracket = None;
        // between slot 7 (clone of a) and slot 8 (clone of b)
        let r = report(750.0, &mut bracket).unwrap();
        assert_eq!((r.first_item, r.second_item), (0, 1));
        assert!((r.second_weight - 0.5).abs() < EPS);

        let mut bracket = None;
        // between slot 0 (clone of d) and slot 1 (clone of e)
        let r = report(50.0, &mut bracket).unwrap();
        assert_eq!((r.first_item, r.second_item), (3, 4));
        assert!((r.second_weight - 0.5).abs() < EPS);
    }

    #[test]
    fn test_centered_offset_keeps_previous_pair() {
        let mut bracket = None;
        report(350.0, &mut bracket).unwrap();

        // exactly on real 2
        let r = report(400.0, &mut bracket).unwrap();
        assert_eq!((r.first_item, r.second_item), (1, 2));
        assert!((r.second_weight - 1.0).abs() < EPS);

        let mut bracket = None;
        report(450.0, &mut bracket).unwrap();
        let r = report(400.0, &mut bracket).unwrap();
        assert_eq!((r.first_item, r.second_item), (2, 3));
        assert!((r.first_weight - 1.0).abs() < EPS);
    }

    #[test]
    fn test_centered_without_bracket_is_skipped() {
        let mut bracket = None;
        assert_eq!(report(400.0, &mut bracket), Err(ProgressSkip::NoBracket));
    }

    #[test]
    fn test_jump_outside_bracket_is_skipped_then_recovers() {
        let mut bracket = None;
        report(350.0, &mut bracket).unwrap();

        // centered on real 4, two steps past the retained pair
        assert!(matches!(
            report(600.0, &mut bracket),
            Err(ProgressSkip::OutOfBracket { .. })
        ));
        assert!(matches!(
            report(200.0, &mut bracket),
            Err(ProgressSkip::OutOfBracket { .. })
        ));

        let r = report(610.0, &mut bracket).unwrap();
        assert_eq!((r.first_item, r.second_item), (4, 0));
    }

    #[test]
    fn test_rounding_hides_float_noise() {
        let mut bracket = None;
        let a = report(330.0000001, &mut bracket).unwrap();
        let b = report(329.9999999, &mut bracket).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_engine_requires_measured_anchors() {
        let (mut carousel, mut rx) = carousel();
        drain(&mut rx);

        assert!(carousel.on_continuous_offset(330.0).is_none());
        assert!(carousel.measure_anchors(anchors()));
        assert!(!carousel.measure_anchors(ProgressAnchors::for_uniform_slots(200.0, 5)));

        let r = carousel.on_continuous_offset(330.0).unwrap();
        assert_eq!(drain(&mut rx), vec![CarouselEvent::ProgressChanged(r)]);
    }

    #[test]
    fn test_engine_rejects_degenerate_anchors() {
        let (mut carousel, _rx) = carousel();
        assert!(!carousel.measure_anchors(ProgressAnchors::new(100.0, 100.0)));
        assert!(carousel.anchors().is_none());
        assert!(carousel.measure_anchors(anchors()));
    }

    #[test]
    fn test_engine_drops_non_finite_offset() {
        let (mut carousel, _rx) = carousel();
        carousel.measure_anchors(anchors());
        assert!(carousel.on_continuous_offset(f64::NAN).is_none());
        assert!(carousel.on_continuous_offset(330.0).is_some());
    }
}
