//! Scrubbed and sequenced timelines.
//!
//! `card_frame` samples the services card timeline at a scroll fraction.
//! Each card owns one unit of timeline length; within it the card enters,
//! holds and exits, except that the first card starts entered and the last
//! card never exits.

use crate::easing::{Ease, lerp};
use crate::visual::{Tween, VisualState};

const ENTER_Y: f64 = 40.0;
const EXIT_Y: f64 = -30.0;
const OFF_SCALE: f64 = 0.96;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardPhase {
    /// Not reached yet.
    Waiting,
    Entering,
    Holding,
    Exiting,
    /// Scrolled past.
    Gone,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardFrame {
    pub phase: CardPhase,
    pub opacity: f64,
    pub y: f64,
    pub scale: f64,
}

impl CardFrame {
    fn waiting() -> Self {
        Self {
            phase: CardPhase::Waiting,
            opacity: 0.0,
            y: ENTER_Y,
            scale: OFF_SCALE,
        }
    }

    fn holding() -> Self {
        Self {
            phase: CardPhase::Holding,
            opacity: 1.0,
            y: 0.0,
            scale: 1.0,
        }
    }

    fn gone() -> Self {
        Self {
            phase: CardPhase::Gone,
            opacity: 0.0,
            y: EXIT_Y,
            scale: OFF_SCALE,
        }
    }

    fn entering(t: f64) -> Self {
        let eased = Ease::Power2Out.apply(t);
        Self {
            phase: CardPhase::Entering,
            opacity: eased,
            y: lerp(ENTER_Y, 0.0, eased),
            scale: lerp(OFF_SCALE, 1.0, eased),
        }
    }

    fn exiting(t: f64) -> Self {
        let eased = Ease::Power2In.apply(t);
        Self {
            phase: CardPhase::Exiting,
            opacity: 1.0 - eased,
            y: lerp(0.0, EXIT_Y, eased),
            scale: lerp(1.0, OFF_SCALE, eased),
        }
    }

    /// Cards carry the `active` class only while fully entered.
    pub fn is_active(&self) -> bool {
        self.phase == CardPhase::Holding
    }

    pub fn visual(&self) -> VisualState {
        VisualState::default()
            .opacity(self.opacity)
            .y(self.y)
            .scale(self.scale)
    }
}

/// Enter / hold / exit split of one card's unit segment.
fn segment_split(index: usize, count: usize) -> (f64, f64, f64) {
    match (index, count) {
        (_, 1) => (0.0, 1.0, 0.0),
        (0, _) => (0.0, 0.6, 0.4),
        (i, n) if i == n - 1 => (0.4, 0.6, 0.0),
        _ => (0.3, 0.4, 0.3),
    }
}

/// Samples card `index` of `count` at scroll fraction `progress`.
pub fn card_frame(index: usize, count: usize, progress: f64) -> CardFrame {
    if count == 0 {
        return CardFrame::waiting();
    }
    let index = index.min(count - 1);
    let progress = if progress.is_nan() { 0.0 } else { progress.clamp(0.0, 1.0) };
    let position = progress * count as f64 - index as f64;
    let (enter, hold, exit) = segment_split(index, count);

    if position < 0.0 {
        return if enter > 0.0 { CardFrame::waiting() } else { CardFrame::holding() };
    }
    if position < enter {
        return CardFrame::entering(position / enter);
    }
    if position < enter + hold || exit == 0.0 {
        return CardFrame::holding();
    }
    if position < enter + hold + exit {
        return CardFrame::exiting((position - enter - hold) / exit);
    }
    CardFrame::gone()
}

/// One entry of a sequenced (non-scrubbed) timeline. Every step tweens its
/// targets from `from` to [`sequence_settled`].
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceStep {
    pub selector: &'static str,
    pub from: VisualState,
    pub duration: f64,
    /// Delay between consecutive targets of the step.
    pub stagger: f64,
    pub ease: Ease,
    /// How far this step starts before the timeline's current end.
    pub overlap: f64,
}

pub fn sequence_settled() -> VisualState {
    VisualState::default().y(0.0).opacity(1.0)
}

impl SequenceStep {
    /// The step's tween when it starts `start` seconds into the timeline.
    pub fn tween(&self, start: f64) -> Tween {
        Tween::new(sequence_settled(), self.duration)
            .delay(start)
            .stagger(self.stagger)
            .ease(self.ease)
    }
}

/// A page-load timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    pub name: &'static str,
    /// Seconds before the first step starts.
    pub delay: f64,
    pub steps: Vec<SequenceStep>,
}

impl Sequence {
    /// Start time of each step given how many targets it found on the page:
    /// the running timeline end minus the step's overlap, never before the
    /// sequence delay. A step with no targets takes no time.
    pub fn start_times(&self, target_counts: &[usize]) -> Vec<f64> {
        let mut end = self.delay;
        self.steps
            .iter()
            .zip(target_counts.iter().copied().chain(std::iter::repeat(0)))
            .map(|(step, count)| {
                let start = (end - step.overlap).max(self.delay);
                if count > 0 {
                    end = end.max(step.tween(start).total_duration(count));
                }
                start
            })
            .collect()
    }
}

fn intro_step(
    selector: &'static str,
    from: VisualState,
    duration: f64,
    overlap: f64,
    ease: Ease,
) -> SequenceStep {
    SequenceStep {
        selector,
        from,
        duration,
        stagger: 0.0,
        ease,
        overlap,
    }
}

/// The page-load hero intro.
pub fn hero_intro() -> Sequence {
    let from = |y| VisualState::default().y(y).opacity(0.0);
    Sequence {
        name: "hero",
        delay: 0.0,
        steps: vec![
            intro_step(".main-header", from(-30.0), 1.0, 0.0, Ease::Power3Out),
            intro_step(".hero-title", from(50.0), 0.8, 0.6, Ease::Power3Out),
            intro_step(".hero-description", from(30.0), 0.6, 0.5, Ease::Power3Out),
            intro_step(".hero-buttons", from(20.0), 0.5, 0.4, Ease::Power3Out),
        ],
    }
}

pub const BLOG_DETAIL_DELAY: f64 = 0.1;

/// The blog article page: the article rises first, then the sidebar
/// widgets follow one after another.
pub fn blog_detail_intro() -> Sequence {
    let from = VisualState::default().y(20.0).opacity(0.0);
    Sequence {
        name: "blog detail",
        delay: BLOG_DETAIL_DELAY,
        steps: vec![
            intro_step(".blog-detail-article", from.clone(), 0.8, 0.0, Ease::Power2Out),
            SequenceStep {
                stagger: 0.15,
                ..intro_step(".sidebar-widget, .author-card", from, 0.8, 0.6, Ease::Power2Out)
            },
        ],
    }
}
