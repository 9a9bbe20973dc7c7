//! Scroll-triggered reveal model.
//!
//! Every reveal variant on the site is one of the [`RevealPreset`]s played
//! under a [`TriggerPolicy`]. [`RevealTracker`] holds the per-element state
//! that decides whether a threshold crossing plays, reverses or is ignored.

use crate::easing::Ease;
use crate::visual::VisualState;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default trigger line: element top crosses 85% of the viewport height.
pub const DEFAULT_THRESHOLD: f64 = 0.85;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TriggerPolicy {
    /// Play once on the first crossing, never rearm.
    #[default]
    OneShot,
    /// Play forward on crossing down, in reverse on crossing back up.
    Reversible,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RevealPreset {
    FadeUp,
    FadeDown,
    SlideLeft,
    SlideRight,
    ScaleUp,
    ClipCenter,
    ClipTop,
    RotateIn,
    BlurIn,
    SplitReveal,
    WordReveal,
    ElasticPop,
}

impl RevealPreset {
    /// Pre-animation state the tween starts from.
    pub fn hidden(self) -> VisualState {
        let base = VisualState::default().opacity(0.0);
        match self {
            RevealPreset::FadeUp => base.y(50.0),
            RevealPreset::FadeDown => base.y(-50.0),
            RevealPreset::SlideLeft => base.x(-80.0),
            RevealPreset::SlideRight => base.x(80.0),
            RevealPreset::ScaleUp => base.scale(0.85),
            RevealPreset::ClipCenter => base.clip_path("inset(0 50% 0 50%)"),
            RevealPreset::ClipTop => base.clip_path("inset(0% 0% 100% 0%)"),
            RevealPreset::RotateIn => base.rotation(-15.0).scale(0.9),
            RevealPreset::BlurIn => base.filter("blur(10px)").y(30.0),
            RevealPreset::SplitReveal => {
                base.clip_path("polygon(50% 0%, 50% 0%, 50% 100%, 50% 100%)")
            }
            RevealPreset::WordReveal => base.y_percent(100.0),
            RevealPreset::ElasticPop => base.scale(0.0),
        }
    }

    /// Resting state; also the baseline applied at registration.
    pub fn settled(self) -> VisualState {
        let base = VisualState::default().opacity(1.0);
        match self {
            RevealPreset::FadeUp | RevealPreset::FadeDown => base.y(0.0),
            RevealPreset::SlideLeft | RevealPreset::SlideRight => base.x(0.0),
            RevealPreset::ScaleUp | RevealPreset::ElasticPop => base.scale(1.0),
            RevealPreset::ClipCenter => base.clip_path("inset(0 0% 0 0%)"),
            RevealPreset::ClipTop => base.clip_path("inset(0% 0% 0% 0%)"),
            RevealPreset::RotateIn => base.rotation(0.0).scale(1.0),
            RevealPreset::BlurIn => base.filter("blur(0px)").y(0.0),
            RevealPreset::SplitReveal => {
                base.clip_path("polygon(0% 0%, 100% 0%, 100% 100%, 0% 100%)")
            }
            RevealPreset::WordReveal => base.y_percent(0.0),
        }
    }

    pub fn default_duration(self) -> f64 {
        match self {
            RevealPreset::FadeUp | RevealPreset::FadeDown => 0.8,
            RevealPreset::SlideLeft
            | RevealPreset::SlideRight
            | RevealPreset::ScaleUp
            | RevealPreset::BlurIn => 0.9,
            RevealPreset::ClipCenter
            | RevealPreset::ClipTop
            | RevealPreset::RotateIn
            | RevealPreset::ElasticPop => 1.0,
            RevealPreset::SplitReveal => 1.1,
            RevealPreset::WordReveal => 0.6,
        }
    }

    pub fn default_ease(self) -> Ease {
        match self {
            RevealPreset::ScaleUp => Ease::BackOut(1.4),
            RevealPreset::RotateIn => Ease::BackOut(1.7),
            RevealPreset::ClipCenter | RevealPreset::ClipTop => Ease::ExpoOut,
            RevealPreset::BlurIn => Ease::Power2Out,
            RevealPreset::WordReveal => Ease::Power4Out,
            RevealPreset::ElasticPop => Ease::ElasticOut { amplitude: 1.0, period: 0.6 },
            _ => Ease::Power3Out,
        }
    }

    /// Presets that animate the element's word spans rather than the element.
    pub fn splits_words(self) -> bool {
        self == RevealPreset::WordReveal
    }
}

/// Per-binding overrides; unset fields fall back to the preset defaults.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RevealOptions {
    pub duration: Option<f64>,
    pub delay: Option<f64>,
    pub stagger: Option<f64>,
    pub ease: Option<Ease>,
    /// Trigger start such as `"top 90%"`; see [`parse_start`].
    pub start: Option<&'static str>,
    pub policy: Option<TriggerPolicy>,
}

impl RevealOptions {
    pub const fn new() -> Self {
        Self {
            duration: None,
            delay: None,
            stagger: None,
            ease: None,
            start: None,
            policy: None,
        }
    }

    pub const fn duration(mut self, duration: f64) -> Self {
        self.duration = Some(duration);
        self
    }

    pub const fn delay(mut self, delay: f64) -> Self {
        self.delay = Some(delay);
        self
    }

    pub const fn stagger(mut self, stagger: f64) -> Self {
        self.stagger = Some(stagger);
        self
    }

    pub const fn start(mut self, start: &'static str) -> Self {
        self.start = Some(start);
        self
    }
}

/// Fully resolved animation for one element of a binding.
#[derive(Debug, Clone, PartialEq)]
pub struct RevealSpec {
    pub preset: RevealPreset,
    pub duration: f64,
    pub delay: f64,
    /// Inner stagger, only meaningful for word splits.
    pub stagger: f64,
    pub ease: Ease,
    pub threshold: f64,
    pub policy: TriggerPolicy,
}

impl RevealSpec {
    /// Resolves options for the element at `index` of its batch.
    ///
    /// A batch-level stagger becomes a per-element delay
    /// (`delay + stagger * index`); word splits keep it as the inner stagger.
    pub fn resolve(
        preset: RevealPreset,
        options: &RevealOptions,
        index: usize,
        default_threshold: f64,
        default_policy: TriggerPolicy,
    ) -> Self {
        let base_delay = options.delay.unwrap_or(0.0);
        let stagger = options.stagger.unwrap_or(0.0);
        let (delay, inner_stagger) = if preset.splits_words() {
            (base_delay, options.stagger.unwrap_or(0.03))
        } else {
            (base_delay + stagger * index as f64, 0.0)
        };
        Self {
            preset,
            duration: options.duration.unwrap_or_else(|| preset.default_duration()),
            delay,
            stagger: inner_stagger,
            ease: options.ease.unwrap_or_else(|| preset.default_ease()),
            threshold: options.start.and_then(parse_start).unwrap_or(default_threshold),
            policy: options.policy.unwrap_or(default_policy),
        }
    }
}

/// Parses a trigger start such as `"top 85%"` into a viewport fraction.
pub fn parse_start(start: &str) -> Option<f64> {
    let mut parts = start.split_whitespace();
    if parts.next()? != "top" {
        return None;
    }
    let position = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    let fraction = match position {
        "top" => 0.0,
        "center" => 0.5,
        "bottom" => 1.0,
        percent => percent.strip_suffix('%')?.parse::<f64>().ok()? / 100.0,
    };
    fraction.is_finite().then_some(fraction)
}

/// Whether an element whose top edge sits at `element_top` (viewport
/// coordinates) has crossed the trigger line.
pub fn has_crossed(element_top: f64, viewport_height: f64, threshold: f64) -> bool {
    element_top < viewport_height * threshold
}

/// Observer root margin equivalent to a trigger line at `threshold`.
pub fn root_margin(threshold: f64) -> String {
    let inset = ((1.0 - threshold.clamp(0.0, 1.0)) * 100.0).round();
    format!("0px 0px -{inset}% 0px")
}

/// What the caller must do after a crossing report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealAction {
    /// Tween hidden → settled.
    PlayForward,
    /// Tween settled → hidden.
    PlayReverse,
    /// Nothing changes on screen.
    Hold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ElementState {
    /// Baseline applied, waiting below the trigger line.
    Armed,
    /// Shown; one-shot elements stay here forever.
    Shown,
    /// Reversible element sent back to hidden.
    Reversed,
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    policy: TriggerPolicy,
    state: ElementState,
}

/// Per-element reveal state keyed by a caller-chosen id.
#[derive(Debug, Default)]
pub struct RevealTracker {
    entries: HashMap<u64, Entry>,
}

impl RevealTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms element `id`. Returns `false` if it was already registered, in
    /// which case the earlier registration stays in charge.
    ///
    /// `crossed_now` is the synchronous position check taken right after
    /// the settled baseline is applied. An element already past its line
    /// counts as shown and will never animate in from hidden.
    pub fn register(&mut self, id: u64, policy: TriggerPolicy, crossed_now: bool) -> bool {
        if self.entries.contains_key(&id) {
            return false;
        }
        let state = if crossed_now {
            ElementState::Shown
        } else {
            ElementState::Armed
        };
        self.entries.insert(id, Entry { policy, state });
        true
    }

    /// Reports the element's current side of the trigger line.
    pub fn on_crossing(&mut self, id: u64, crossed: bool) -> RevealAction {
        let Some(entry) = self.entries.get_mut(&id) else {
            return RevealAction::Hold;
        };
        match (entry.policy, entry.state, crossed) {
            (_, ElementState::Armed, true) | (_, ElementState::Reversed, true) => {
                entry.state = ElementState::Shown;
                RevealAction::PlayForward
            }
            (TriggerPolicy::Reversible, ElementState::Shown, false) => {
                entry.state = ElementState::Reversed;
                RevealAction::PlayReverse
            }
            _ => RevealAction::Hold,
        }
    }

    /// One-shot elements that have played no longer need observing.
    pub fn is_finished(&self, id: u64) -> bool {
        self.entries.get(&id).is_some_and(|entry| {
            entry.policy == TriggerPolicy::OneShot && entry.state == ElementState::Shown
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Splits element text into the words wrapped by a word reveal.
pub fn split_words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Marks the blog article page.
pub const BLOG_DETAIL: &str = "#blog-detail";

/// Article text that animates with its container on the blog article page
/// and is kept out of the generic fallbacks.
pub const BLOG_DETAIL_TEXT: &str = ".blog-detail-section p, .blog-detail-section h1, \
    .blog-detail-section h2, .blog-detail-section h3, .blog-detail-section h4, \
    .blog-detail-section h5, .blog-detail-section h6, .blog-detail-section ul li, \
    .blog-detail-section span";

/// A selector bound to a preset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealBinding {
    pub selector: &'static str,
    pub preset: RevealPreset,
    pub options: RevealOptions,
    /// The binding is skipped on pages containing this selector.
    pub unless_present: Option<&'static str>,
}

impl RevealBinding {
    const fn unless_present(mut self, selector: &'static str) -> Self {
        self.unless_present = Some(selector);
        self
    }

    /// Whether the binding applies, given which selectors the page contains.
    pub fn applies(&self, page_has: impl Fn(&str) -> bool) -> bool {
        !self.unless_present.is_some_and(page_has)
    }
}

const fn bind(
    selector: &'static str,
    preset: RevealPreset,
    options: RevealOptions,
) -> RevealBinding {
    RevealBinding {
        selector,
        preset,
        options,
        unless_present: None,
    }
}

const O: RevealOptions = RevealOptions::new();

/// Page bindings in priority order; the first binding to claim an element
/// wins, so specific sections come before the generic fallbacks.
pub const REVEAL_BINDINGS: &[RevealBinding] = &[
    // home
    bind(".section-overlap .dashboard-header", RevealPreset::FadeUp, O.duration(0.8)),
    bind(".section-overlap .inner-card", RevealPreset::FadeUp, O.stagger(0.15).delay(0.2)),
    bind(".services-section .section-title", RevealPreset::SlideLeft, O.duration(0.9)),
    bind(".service-card-new", RevealPreset::ScaleUp, O.stagger(0.12).duration(0.8)),
    bind(".why-korat-title", RevealPreset::SlideRight, O.duration(0.9)),
    bind("#why-korat .feature-item", RevealPreset::FadeUp, O.stagger(0.1)),
    bind(".process-section .process-header", RevealPreset::FadeDown, O.duration(0.5)),
    bind(".process-step-card", RevealPreset::RotateIn, O.stagger(0.05).duration(0.5)),
    bind(".faq-title", RevealPreset::BlurIn, O.duration(0.4)),
    bind(".faq-item", RevealPreset::FadeUp, O.stagger(0.04).delay(0.1).duration(0.4)),
    bind(".cta-section h2", RevealPreset::ScaleUp, O.duration(1.0)),
    bind(".cta-section p", RevealPreset::FadeUp, O.delay(0.2)),
    bind(".cta-section .btn", RevealPreset::ElasticPop, O.delay(0.4)),
    // about
    bind(".about-title-anim", RevealPreset::WordReveal, O.stagger(0.03)),
    bind("#who-we-are h2", RevealPreset::ClipTop, O.duration(1.0)),
    bind("#who-we-are p", RevealPreset::FadeUp, O.stagger(0.2).delay(0.3)),
    bind("#our-mission .col-lg-4", RevealPreset::ElasticPop, O.stagger(0.2).duration(1.0)),
    bind(".bg-warning-subtle", RevealPreset::SlideLeft, O.stagger(0.15)),
    bind("#approach h2", RevealPreset::FadeDown, O.duration(0.8)),
    bind("#approach ul li", RevealPreset::FadeUp, O.stagger(0.1)),
    bind("#connect-cta .inner-card", RevealPreset::SplitReveal, O.duration(1.2)),
    // contact
    bind("#contact-form h2", RevealPreset::SlideRight, O.duration(0.9)),
    bind(".form-group", RevealPreset::FadeUp, O.stagger(0.1)),
    bind(".contact-info-card", RevealPreset::ScaleUp, O.stagger(0.15).duration(0.9)),
    bind("#map-section", RevealPreset::ClipCenter, O.duration(1.1)),
    // service pages
    bind("#land-hero .hero-content", RevealPreset::BlurIn, O.duration(1.0)),
    bind("#land-dev-hero .hero-content", RevealPreset::BlurIn, O.duration(1.0)),
    bind("#nri-hero .hero-content", RevealPreset::BlurIn, O.duration(1.0)),
    bind(".intro-section h2", RevealPreset::RotateIn, O.duration(0.9)),
    bind(".intro-section p", RevealPreset::FadeUp, O.delay(0.2)),
    bind(".image-wrapper", RevealPreset::SplitReveal, O.duration(1.1)),
    bind(".features-list li", RevealPreset::SlideLeft, O.stagger(0.08)),
    bind(".benefits-section h3", RevealPreset::FadeDown, O.duration(0.8)),
    bind(".benefit-card", RevealPreset::ScaleUp, O.stagger(0.12)),
    bind(".stat-card", RevealPreset::ElasticPop, O.stagger(0.15).duration(1.0)),
    bind(".content-row", RevealPreset::FadeUp, O.duration(0.6)),
    bind(".related-posts-section .blog-card", RevealPreset::FadeUp, O.stagger(0.15)),
    bind(
        ".nri-pref-grid .reveal-content",
        RevealPreset::FadeUp,
        O.duration(0.6).stagger(0.1).start("top 90%"),
    ),
    // generic fallbacks
    bind("section h2:not([class*=\"anim-\"])", RevealPreset::FadeUp, O.duration(0.8)),
    bind("section .text-uppercase.small:not(.animated)", RevealPreset::FadeUp, O.duration(0.5)),
    bind("section span.text-teal:not(.animated)", RevealPreset::FadeUp, O.duration(0.5)),
    bind("section span.text-primary-teal:not(.animated)", RevealPreset::FadeUp, O.duration(0.5)),
    bind(".hero-description:not(.animated)", RevealPreset::FadeUp, O.duration(0.6).delay(0.2)),
    bind(".hero-content p:not(.animated)", RevealPreset::FadeUp, O.duration(0.6).delay(0.2)),
    bind("section p.lead:not(.animated)", RevealPreset::FadeUp, O.duration(0.6).delay(0.1)),
    bind("section .section-description:not(.animated)", RevealPreset::FadeUp, O.duration(0.6)),
    bind(".feature-card p:not(.animated)", RevealPreset::FadeUp, O.duration(0.5).delay(0.1)),
    bind(".feature-card-text:not(.animated)", RevealPreset::FadeUp, O.duration(0.5).delay(0.1)),
    bind("section small:not(.animated)", RevealPreset::FadeUp, O.duration(0.4)),
    bind(".text-muted:not(.animated)", RevealPreset::FadeUp, O.duration(0.5)),
    bind(".stat-item p:not(.animated)", RevealPreset::FadeUp, O.duration(0.4).delay(0.1)),
    bind(".bottom-stat-item p:not(.animated)", RevealPreset::FadeUp, O.duration(0.4).delay(0.1)),
    bind("section ul li:not(.animated)", RevealPreset::FadeUp, O.stagger(0.05).duration(0.5)),
    bind("section .story-text:not(.animated)", RevealPreset::FadeUp, O.stagger(0.1).duration(0.6)),
    bind("section .content-text:not(.animated)", RevealPreset::FadeUp, O.duration(0.6)),
    bind(".reveal-scale-up", RevealPreset::ScaleUp, O.duration(0.9)),
    bind(".reveal-content", RevealPreset::FadeUp, O.duration(0.7)),
    bind(".card", RevealPreset::FadeUp, O.stagger(0.1)),
    bind("section .btn:not(.menu-link-large)", RevealPreset::ScaleUp, O.delay(0.3).duration(0.6)),
    bind(".main-footer", RevealPreset::FadeUp, O.start("top 95%").duration(0.8))
        .unless_present(BLOG_DETAIL),
];

/// Section-level trigger revealing a header and then a staggered card group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchReveal {
    pub section: &'static str,
    pub header: &'static str,
    pub cards: &'static str,
    pub start: &'static str,
    pub header_from: f64,
    pub cards_from: f64,
    pub duration: f64,
    pub stagger: f64,
    /// Cards start this long before the header finishes.
    pub overlap: f64,
}

impl BatchReveal {
    pub fn threshold(&self, default_threshold: f64) -> f64 {
        parse_start(self.start).unwrap_or(default_threshold)
    }

    pub fn cards_delay(&self, has_header: bool) -> f64 {
        if has_header {
            (self.duration - self.overlap).max(0.0)
        } else {
            0.0
        }
    }
}

pub const WHY_CHOOSE_US: BatchReveal = BatchReveal {
    section: "#why-choose-us",
    header: ".why-choose-header",
    cards: ".why-choose-card-anim",
    start: "top 75%",
    header_from: 30.0,
    cards_from: 50.0,
    duration: 0.8,
    stagger: 0.1,
    overlap: 0.6,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_past_threshold_at_load_never_animates_in() {
        let mut tracker = RevealTracker::new();
        assert!(tracker.register(1, TriggerPolicy::OneShot, true));
        assert_eq!(tracker.on_crossing(1, true), RevealAction::Hold);
        assert!(tracker.is_finished(1));
    }

    #[test]
    fn one_shot_plays_exactly_once() {
        let mut tracker = RevealTracker::new();
        tracker.register(7, TriggerPolicy::OneShot, false);
        assert_eq!(tracker.on_crossing(7, false), RevealAction::Hold);
        assert_eq!(tracker.on_crossing(7, true), RevealAction::PlayForward);
        assert_eq!(tracker.on_crossing(7, false), RevealAction::Hold);
        assert_eq!(tracker.on_crossing(7, true), RevealAction::Hold);
        assert!(tracker.is_finished(7));
    }

    #[test]
    fn reversible_follows_the_line_both_ways() {
        let mut tracker = RevealTracker::new();
        tracker.register(3, TriggerPolicy::Reversible, false);
        assert_eq!(tracker.on_crossing(3, true), RevealAction::PlayForward);
        assert_eq!(tracker.on_crossing(3, true), RevealAction::Hold);
        assert_eq!(tracker.on_crossing(3, false), RevealAction::PlayReverse);
        assert_eq!(tracker.on_crossing(3, true), RevealAction::PlayForward);
        assert!(!tracker.is_finished(3));
    }

    #[test]
    fn duplicate_registration_is_refused() {
        let mut tracker = RevealTracker::new();
        assert!(tracker.register(9, TriggerPolicy::Reversible, false));
        assert!(!tracker.register(9, TriggerPolicy::OneShot, true));
        assert_eq!(tracker.len(), 1);
        // the first registration's policy still applies
        tracker.on_crossing(9, true);
        assert_eq!(tracker.on_crossing(9, false), RevealAction::PlayReverse);
    }

    #[test]
    fn unknown_element_holds() {
        let mut tracker = RevealTracker::new();
        assert_eq!(tracker.on_crossing(42, true), RevealAction::Hold);
    }

    #[test]
    fn stagger_becomes_per_element_delay() {
        let options = RevealOptions::new().stagger(0.15).delay(0.2);
        let third = RevealSpec::resolve(
            RevealPreset::FadeUp,
            &options,
            2,
            DEFAULT_THRESHOLD,
            TriggerPolicy::OneShot,
        );
        assert!((third.delay - 0.5).abs() < 1e-9);
        assert_eq!(third.stagger, 0.0);
        assert_eq!(third.duration, 0.8);
        assert_eq!(third.threshold, DEFAULT_THRESHOLD);
    }

    #[test]
    fn word_reveal_keeps_inner_stagger() {
        let spec = RevealSpec::resolve(
            RevealPreset::WordReveal,
            &RevealOptions::new(),
            4,
            DEFAULT_THRESHOLD,
            TriggerPolicy::Reversible,
        );
        assert_eq!(spec.delay, 0.0);
        assert_eq!(spec.stagger, 0.03);
        assert_eq!(spec.policy, TriggerPolicy::Reversible);
    }

    #[test]
    fn settled_state_is_fully_opaque_for_every_preset() {
        let presets = [
            RevealPreset::FadeUp,
            RevealPreset::FadeDown,
            RevealPreset::SlideLeft,
            RevealPreset::SlideRight,
            RevealPreset::ScaleUp,
            RevealPreset::ClipCenter,
            RevealPreset::ClipTop,
            RevealPreset::RotateIn,
            RevealPreset::BlurIn,
            RevealPreset::SplitReveal,
            RevealPreset::WordReveal,
            RevealPreset::ElasticPop,
        ];
        for preset in presets {
            assert_eq!(preset.settled().opacity, Some(1.0), "{preset:?}");
            assert_eq!(preset.hidden().opacity, Some(0.0), "{preset:?}");
        }
    }

    #[test]
    fn start_strings() {
        assert_eq!(parse_start("top 85%"), Some(0.85));
        assert_eq!(parse_start("top 75%"), Some(0.75));
        assert_eq!(parse_start("top top"), Some(0.0));
        assert_eq!(parse_start("bottom 85%"), None);
        assert_eq!(parse_start("top"), None);
        assert_eq!(parse_start("top 85"), None);
    }

    #[test]
    fn crossing_and_margin() {
        assert!(has_crossed(700.0, 1000.0, 0.85));
        assert!(!has_crossed(900.0, 1000.0, 0.85));
        assert!(has_crossed(-400.0, 1000.0, 0.85));
        assert_eq!(root_margin(0.85), "0px 0px -15% 0px");
        assert_eq!(root_margin(0.95), "0px 0px -5% 0px");
    }

    #[test]
    fn batch_cards_overlap_header() {
        assert!((WHY_CHOOSE_US.cards_delay(true) - 0.2).abs() < 1e-9);
        assert_eq!(WHY_CHOOSE_US.cards_delay(false), 0.0);
        assert_eq!(WHY_CHOOSE_US.threshold(DEFAULT_THRESHOLD), 0.75);
    }

    #[test]
    fn binding_start_strings_set_the_threshold() {
        let options = RevealOptions::new().start("top 95%");
        let spec = RevealSpec::resolve(
            RevealPreset::FadeUp,
            &options,
            0,
            DEFAULT_THRESHOLD,
            TriggerPolicy::OneShot,
        );
        assert_eq!(spec.threshold, 0.95);

        let unreadable = RevealOptions::new().start("bottom 10%");
        let spec = RevealSpec::resolve(
            RevealPreset::FadeUp,
            &unreadable,
            0,
            DEFAULT_THRESHOLD,
            TriggerPolicy::OneShot,
        );
        assert_eq!(spec.threshold, DEFAULT_THRESHOLD);
    }

    #[test]
    fn footer_is_left_alone_on_blog_articles() {
        let footer = REVEAL_BINDINGS
            .iter()
            .find(|binding| binding.selector == ".main-footer")
            .unwrap();
        assert!(footer.applies(|_| false));
        assert!(!footer.applies(|selector| selector == BLOG_DETAIL));
        assert!(
            REVEAL_BINDINGS
                .iter()
                .filter(|binding| binding.selector != ".main-footer")
                .all(|binding| binding.applies(|_| true))
        );
    }

    #[test]
    fn fallbacks_cover_every_text_style() {
        for selector in [
            "section span.text-primary-teal:not(.animated)",
            ".hero-description:not(.animated)",
            ".feature-card-text:not(.animated)",
            ".bottom-stat-item p:not(.animated)",
            "section .content-text:not(.animated)",
        ] {
            assert!(
                REVEAL_BINDINGS.iter().any(|binding| binding.selector == selector),
                "{selector}"
            );
        }
        assert!(BLOG_DETAIL_TEXT.contains(".blog-detail-section h6"));
        assert!(BLOG_DETAIL_TEXT.contains(".blog-detail-section ul li"));
    }

    #[test]
    fn split_words_drops_extra_whitespace() {
        assert_eq!(split_words("  Building   your future "), vec!["Building", "your", "future"]);
    }

    #[test]
    fn specific_bindings_precede_fallbacks() {
        let position = |selector: &str| {
            REVEAL_BINDINGS
                .iter()
                .position(|binding| binding.selector == selector)
                .unwrap()
        };
        assert!(position(".faq-item") < position(".card"));
        assert!(position(".nri-pref-grid .reveal-content") < position(".reveal-content"));
    }
}
