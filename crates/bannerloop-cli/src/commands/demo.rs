use std::collections::VecDeque;
use std::time::Duration;

use anyhow::{anyhow, Result};
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info};

use bannerloop_core::{AppConfig, Carousel, CarouselEvent, Phase, TokioTimer};
use bannerloop_viewport::{SimulatedViewport, ViewportConfigExt};

/// How long a scripted finger stays down before release
const DRAG_HOLD_MS: u64 = 120;

/// A drag injected at a fixed time after start
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptedDrag {
    pub at_ms: u64,
    pub displacement: f64,
}

/// Parse `AT_MS:DISPLACEMENT`, e.g. `1000:120` or `4500:-80`
pub fn parse_drag(value: &str) -> std::result::Result<ScriptedDrag, String> {
    let (at, displacement) = value
        .split_once(':')
        .ok_or_else(|| format!("expected AT_MS:DISPLACEMENT, got '{}'", value))?;
    let at_ms = at
        .trim()
        .parse()
        .map_err(|e| format!("invalid drag time '{}': {}", at, e))?;
    let displacement = displacement
        .trim()
        .parse()
        .map_err(|e| format!("invalid drag displacement '{}': {}", displacement, e))?;
    Ok(ScriptedDrag {
        at_ms,
        displacement,
    })
}

pub struct DemoOptions {
    pub items: Vec<String>,
    pub seconds: u64,
    pub autoscroll_ms: Option<u64>,
    pub drags: Vec<ScriptedDrag>,
    pub json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum DragAction {
    Start(f64),
    Release(f64),
}

/// Finger movement of one scripted drag, spread over the frames it is held
#[derive(Debug, Clone, Copy, PartialEq)]
struct DragFollow {
    remaining: f64,
    per_frame: f64,
}

impl DragFollow {
    fn new(displacement: f64, frame: Duration) -> Self {
        let frames = (DRAG_HOLD_MS / (frame.as_millis() as u64).max(1)).max(1);
        Self {
            remaining: displacement,
            per_frame: displacement / frames as f64,
        }
    }

    /// Offset delta for the next frame; never moves past the scripted total
    fn step(&mut self) -> f64 {
        let delta = if self.per_frame.abs() >= self.remaining.abs() {
            self.remaining
        } else {
            self.per_frame
        };
        self.remaining -= delta;
        delta
    }
}

/// Scripted drags expanded into timed start/release actions
struct DragScript {
    steps: VecDeque<(Instant, DragAction)>,
}

impl DragScript {
    fn new(drags: &[ScriptedDrag], origin: Instant) -> Self {
        let mut steps: Vec<(Instant, DragAction)> = drags
            .iter()
            .flat_map(|drag| {
                let down = origin + Duration::from_millis(drag.at_ms);
                let up = down + Duration::from_millis(DRAG_HOLD_MS);
                [
                    (down, DragAction::Start(drag.displacement)),
                    (up, DragAction::Release(drag.displacement)),
                ]
            })
            .collect();
        steps.sort_by_key(|(at, _)| *at);
        Self {
            steps: steps.into(),
        }
    }

    /// Wait for the next action; pends forever once the script is done
    async fn next(&mut self) -> DragAction {
        loop {
            match self.steps.front().copied() {
                Some((at, _)) => {
                    sleep_until(at).await;
                    if let Some((_, action)) = self.steps.pop_front() {
                        return action;
                    }
                }
                None => std::future::pending::<()>().await,
            }
        }
    }
}

#[derive(Serialize)]
struct EventLine<'a> {
    at_ms: u128,
    #[serde(flatten)]
    event: &'a CarouselEvent,
}

fn item_name(items: &[String], index: usize) -> &str {
    items.get(index).map(String::as_str).unwrap_or("?")
}

/// Human readable rendering of an engine event
fn describe(event: &CarouselEvent, items: &[String]) -> String {
    match *event {
        CarouselEvent::ScrollTo {
            padded_index,
            animate,
        } => format!(
            "scroll_to  slot {}{}",
            padded_index,
            if animate { " (animated)" } else { "" }
        ),
        CarouselEvent::SelectionChanged { current, previous } => format!(
            "selection  {} [{}] <- {} [{}]",
            item_name(items, current),
            current,
            item_name(items, previous),
            previous
        ),
        CarouselEvent::ProgressChanged(report) => format!(
            "progress   {} {:.2} | {} {:.2}",
            item_name(items, report.first_item),
            report.first_weight,
            item_name(items, report.second_item),
            report.second_weight
        ),
        CarouselEvent::ItemTapped { real_index } => {
            format!("tapped     {} [{}]", item_name(items, real_index), real_index)
        }
    }
}

fn print_event(event: &CarouselEvent, options: &DemoOptions, origin: Instant) -> Result<()> {
    let at_ms = origin.elapsed().as_millis();
    if options.json {
        println!("{}", serde_json::to_string(&EventLine { at_ms, event })?);
    } else {
        println!("[{:>6}ms] {}", at_ms, describe(event, &options.items));
    }
    Ok(())
}

pub async fn run(config: &AppConfig, options: DemoOptions) -> Result<()> {
    let mut carousel_config = config.carousel.clone();
    if let Some(ms) = options.autoscroll_ms {
        carousel_config.autoscroll_interval_ms = ms;
    }

    let (timer, mut tick_rx) = TokioTimer::channel();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let mut carousel = Carousel::new(carousel_config, timer).with_event_sender(event_tx);
    let mut viewport = SimulatedViewport::new(config.viewport.clone());

    carousel
        .supply_items(options.items.clone())
        .map_err(|e| anyhow!("Cannot run carousel: {}", e))?;
    carousel.measure_anchors(viewport.anchors(options.items.len()));

    info!(
        items = options.items.len(),
        seconds = options.seconds,
        autoscroll_ms = carousel.config().autoscroll_interval_ms,
        drags = options.drags.len(),
        "Starting carousel demo"
    );

    let origin = Instant::now();
    let deadline = sleep_until(origin + Duration::from_secs(options.seconds));
    tokio::pin!(deadline);
    let mut frames = tokio::time::interval(config.viewport.frame_duration());
    let mut script = DragScript::new(&options.drags, origin);
    let mut follow: Option<DragFollow> = None;

    loop {
        while let Ok(event) = event_rx.try_recv() {
            viewport.apply(&event);
            print_event(&event, &options, origin)?;
        }

        tokio::select! {
            _ = &mut deadline => break,

            Some(tick) = tick_rx.recv() => {
                carousel.on_autoscroll_tick(tick)?;
            }

            _ = frames.tick() => {
                if let Some(delta) = follow.as_mut().map(DragFollow::step) {
                    if delta != 0.0 {
                        viewport.nudge(delta);
                    }
                }
                let frame = viewport.update();
                if frame.moved {
                    carousel.on_continuous_offset(frame.offset);
                }
                if frame.settled {
                    carousel.on_settled()?;
                }
            }

            action = script.next() => match action {
                DragAction::Start(displacement) => {
                    if carousel.on_drag_started() {
                        let frame = config.viewport.frame_duration();
                        follow = Some(DragFollow::new(displacement, frame));
                    } else {
                        debug!("Scripted drag dropped by cooldown");
                    }
                }
                DragAction::Release(displacement) => {
                    let drag_accepted = follow.is_some();
                    if let Some(rest) = follow.take().map(|f| f.remaining) {
                        if rest != 0.0 {
                            viewport.nudge(rest);
                        }
                    }
                    carousel.on_drag_released(displacement)?;
                    if drag_accepted && carousel.phase() == Phase::Idle {
                        // below threshold: snap back to the current item
                        if let (Some(padded), Some(real)) =
                            (carousel.padded(), carousel.real_selected_index())
                        {
                            let slot = padded.slot_of(real);
                            viewport.scroll_to_slot(slot, true, std::time::Instant::now());
                        }
                    }
                }
            },
        }
    }

    carousel.shutdown();
    info!("Carousel demo finished");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bannerloop_core::ProgressReport;

    fn items() -> Vec<String> {
        ["a", "b", "c"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_drag() {
        assert_eq!(
            parse_drag("1000:120").unwrap(),
            ScriptedDrag {
                at_ms: 1000,
                displacement: 120.0
            }
        );
        assert_eq!(parse_drag(" 50 : -80.5").unwrap().displacement, -80.5);
        assert!(parse_drag("1000").is_err());
        assert!(parse_drag("soon:10").is_err());
    }

    #[test]
    fn test_describe_events() {
        let items = items();
        assert_eq!(
            describe(
                &CarouselEvent::SelectionChanged {
                    current: 2,
                    previous: 1
                },
                &items
            ),
            "selection  c [2] <- b [1]"
        );
        assert_eq!(
            describe(
                &CarouselEvent::ProgressChanged(ProgressReport {
                    first_item: 2,
                    first_weight: 0.75,
                    second_item: 0,
                    second_weight: 0.25,
                }),
                &items
            ),
            "progress   c 0.75 | a 0.25"
        );
    }

    #[test]
    fn test_event_line_json() {
        let event = CarouselEvent::ScrollTo {
            padded_index: 3,
            animate: true,
        };
        let line = serde_json::to_value(EventLine {
            at_ms: 42,
            event: &event,
        })
        .unwrap();
        assert_eq!(line["event"], "scroll_to");
        assert_eq!(line["padded_index"], 3);
        assert_eq!(line["at_ms"], 42);
    }

    #[test]
    fn test_drag_follow_spreads_over_hold() {
        let mut follow = DragFollow::new(-120.0, Duration::from_millis(16));
        let steps: Vec<f64> = (0..7).map(|_| follow.step()).collect();

        assert!(steps.iter().all(|d| *d < 0.0 && *d > -20.0));
        assert!((steps.iter().sum::<f64>() + 120.0).abs() < 1e-9);
        assert!(follow.step().abs() < 1e-9);
    }

    #[test]
    fn test_drag_follow_slow_frames() {
        let mut follow = DragFollow::new(80.0, Duration::from_millis(500));
        assert_eq!(follow.step(), 80.0);
        assert_eq!(follow.step(), 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drag_script_orders_actions() {
        let origin = Instant::now();
        let mut script = DragScript::new(
            &[
                ScriptedDrag {
                    at_ms: 2000,
                    displacement: -60.0,
                },
                ScriptedDrag {
                    at_ms: 500,
                    displacement: 90.0,
                },
            ],
            origin,
        );

        assert_eq!(script.next().await, DragAction::Start(90.0));
        assert_eq!(origin.elapsed(), Duration::from_millis(500));
        assert_eq!(script.next().await, DragAction::Release(90.0));
        assert_eq!(script.next().await, DragAction::Start(-60.0));
        assert_eq!(script.next().await, DragAction::Release(-60.0));
        assert!(script.steps.is_empty());
    }
}
