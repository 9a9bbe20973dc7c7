//! Scroll-triggered reveals.
//!
//! Registration happens synchronously at startup: every claimed element gets
//! its settled state applied first, then its side of the trigger line is
//! read, and only then is it handed to an `IntersectionObserver`. Crossing
//! reports flow through a relay into a single loop that owns the
//! [`RevealTracker`], so one-shot and reversible elements share one path.

use crate::dataflow::{Relay, relay};
use crate::dom;
use crate::engine::SharedAnimator;
use crate::guard::FeatureAbsent;
use futures::StreamExt;
use shared::reveal::{
    BLOG_DETAIL, BLOG_DETAIL_TEXT, REVEAL_BINDINGS, WHY_CHOOSE_US, has_crossed, root_margin,
    split_words,
};
use shared::{
    Ease, RevealAction, RevealBinding, RevealSpec, RevealTracker, TriggerPolicy, Tween, VisualState,
};
use std::collections::HashMap;
use web_sys::{Document, Element, HtmlElement, IntersectionObserver, Window};
use zoon::{Task, TaskHandle};

const REVEAL_ID_ATTRIBUTE: &str = "data-reveal-id";
const SPLIT_MARKER: &str = "data-splitted";

/// One tween of a reveal; a trigger plays one or more stages together.
struct RevealStage {
    targets: Vec<HtmlElement>,
    hidden: VisualState,
    tween: Tween,
}

impl RevealStage {
    fn from_spec(targets: Vec<HtmlElement>, spec: &RevealSpec) -> Self {
        let (hidden, tween) = stage_tweens(spec);
        Self {
            targets,
            hidden,
            tween,
        }
    }
}

/// Hidden state and forward tween for a resolved element spec.
fn stage_tweens(spec: &RevealSpec) -> (VisualState, Tween) {
    let tween = Tween::new(spec.preset.settled(), spec.duration)
        .delay(spec.delay)
        .stagger(spec.stagger)
        .ease(spec.ease);
    (spec.preset.hidden(), tween)
}

struct RevealTarget {
    trigger: HtmlElement,
    threshold_key: u64,
    stages: Vec<RevealStage>,
}

impl RevealTarget {
    fn play_forward(&self, animator: &SharedAnimator) {
        for stage in &self.stages {
            animator.from_to(&stage.targets, &stage.hidden, &stage.tween, None);
        }
    }

    fn play_reverse(&self, animator: &SharedAnimator) {
        for stage in &self.stages {
            let back = Tween::new(stage.hidden.clone(), stage.tween.duration).ease(Ease::Power2In);
            animator.to(&stage.targets, &back, None);
        }
    }
}

fn reveal_elements<'a>(
    trigger: &'a HtmlElement,
    stages: &'a [RevealStage],
) -> impl Iterator<Item = &'a HtmlElement> {
    std::iter::once(trigger).chain(stages.iter().flat_map(|stage| stage.targets.iter()))
}

fn threshold_key(threshold: f64) -> u64 {
    threshold.to_bits()
}

/// Collects reveal registrations before any observer is armed.
pub struct RevealRegistry {
    animator: SharedAnimator,
    window: Window,
    default_threshold: f64,
    default_policy: TriggerPolicy,
    tracker: RevealTracker,
    targets: HashMap<u64, RevealTarget>,
    thresholds: HashMap<u64, f64>,
    next_id: u64,
}

impl RevealRegistry {
    pub fn new(
        animator: Option<SharedAnimator>,
        window: &Window,
        default_threshold: f64,
        default_policy: TriggerPolicy,
    ) -> Result<Self, FeatureAbsent> {
        let animator = animator.ok_or(FeatureAbsent::Engine("gsap"))?;
        Ok(Self {
            animator,
            window: window.clone(),
            default_threshold,
            default_policy,
            tracker: RevealTracker::new(),
            targets: HashMap::new(),
            thresholds: HashMap::new(),
            next_id: 1,
        })
    }

    /// Arms `trigger` to play `stages`. Returns `false` when any of the
    /// elements already belongs to another reveal.
    fn register(
        &mut self,
        trigger: &HtmlElement,
        stages: Vec<RevealStage>,
        threshold: f64,
        policy: TriggerPolicy,
    ) -> bool {
        if reveal_elements(trigger, &stages).any(is_claimed) {
            return false;
        }

        let id = self.next_id;
        self.next_id += 1;

        // baseline first: content never depends on a crossing to become visible
        for stage in &stages {
            self.animator.set(&stage.targets, &stage.tween.to);
        }
        let crossed_now = has_crossed(
            dom::rect(trigger).top,
            dom::viewport_height(&self.window),
            threshold,
        );
        if !self.tracker.register(id, policy, crossed_now) {
            return false;
        }

        for element in reveal_elements(trigger, &stages) {
            dom::set_attribute(element, REVEAL_ID_ATTRIBUTE, &id.to_string());
        }
        let key = threshold_key(threshold);
        self.thresholds.insert(key, threshold);
        self.targets.insert(
            id,
            RevealTarget {
                trigger: trigger.clone(),
                threshold_key: key,
                stages,
            },
        );
        true
    }

    /// Registers one binding for every unclaimed element it matches.
    pub fn bind(&mut self, document: &Document, binding: &RevealBinding) -> usize {
        if !binding.applies(|selector| dom::select(document, selector).is_some()) {
            return 0;
        }
        let elements = dom::select_all(document, binding.selector);
        let mut registered = 0;
        for (index, element) in elements.iter().enumerate() {
            if is_claimed(element) {
                continue;
            }
            let spec = RevealSpec::resolve(
                binding.preset,
                &binding.options,
                index,
                self.default_threshold,
                self.default_policy,
            );
            let targets = if spec.preset.splits_words() {
                split_into_words(document, element);
                dom::select_all_in(element, ".word-inner")
            } else {
                vec![element.clone()]
            };
            let stage = RevealStage::from_spec(targets, &spec);
            if self.register(element, vec![stage], spec.threshold, spec.policy) {
                registered += 1;
            }
        }
        registered
    }

    /// Header first, then the card group overlapping its tail.
    pub fn bind_batch(&mut self, document: &Document) -> bool {
        let batch = WHY_CHOOSE_US;
        let Some(section) = dom::select(document, batch.section) else {
            return false;
        };
        let header = dom::select_in(&section, batch.header);
        let cards = dom::select_all_in(&section, batch.cards);
        if header.is_none() && cards.is_empty() {
            return false;
        }

        let settled = VisualState::default().opacity(1.0).y(0.0);
        let mut stages = Vec::new();
        if let Some(header) = &header {
            stages.push(RevealStage {
                targets: vec![header.clone()],
                hidden: VisualState::default().opacity(0.0).y(batch.header_from),
                tween: Tween::new(settled.clone(), batch.duration).ease(Ease::Power3Out),
            });
        }
        if !cards.is_empty() {
            stages.push(RevealStage {
                targets: cards,
                hidden: VisualState::default().opacity(0.0).y(batch.cards_from),
                tween: Tween::new(settled, batch.duration)
                    .delay(batch.cards_delay(header.is_some()))
                    .stagger(batch.stagger)
                    .ease(Ease::Power3Out),
            });
        }
        let threshold = batch.threshold(self.default_threshold);
        self.register(&section, stages, threshold, self.default_policy)
    }

    /// Arms the observers and starts the crossing loop.
    pub fn start(self) -> Result<RevealOrchestrator, FeatureAbsent> {
        let RevealRegistry {
            animator,
            window,
            mut tracker,
            mut targets,
            thresholds,
            ..
        } = self;

        let (element_crossed_relay, mut element_crossed_stream) = relay::<(u64, bool)>();
        let mut observers = HashMap::new();
        for (key, threshold) in thresholds {
            let observer = crossing_observer(&window, threshold, element_crossed_relay.clone())?;
            observers.insert(key, observer);
        }
        for target in targets.values() {
            if let Some(observer) = observers.get(&target.threshold_key) {
                observer.observe(&target.trigger);
            }
        }
        zoon::println!("REVEAL: armed {} triggers", targets.len());

        let task = Task::start_droppable(async move {
            while let Some((id, crossed)) = element_crossed_stream.next().await {
                let Some(target) = targets.get(&id) else {
                    continue;
                };
                match tracker.on_crossing(id, crossed) {
                    RevealAction::PlayForward => target.play_forward(&animator),
                    RevealAction::PlayReverse => target.play_reverse(&animator),
                    RevealAction::Hold => {}
                }
                if tracker.is_finished(id) {
                    if let Some(target) = targets.remove(&id) {
                        if let Some(observer) = observers.get(&target.threshold_key) {
                            observer.unobserve(&target.trigger);
                        }
                    }
                }
            }
        });
        Ok(RevealOrchestrator { _task: task })
    }
}

pub struct RevealOrchestrator {
    _task: TaskHandle,
}

impl RevealOrchestrator {
    /// Claims every reveal on the page: the batch section, then the bindings
    /// in priority order.
    pub fn new(
        document: &Document,
        window: &Window,
        animator: Option<SharedAnimator>,
        default_threshold: f64,
        default_policy: TriggerPolicy,
    ) -> Result<Self, FeatureAbsent> {
        let mut registry =
            RevealRegistry::new(animator, window, default_threshold, default_policy)?;
        let excluded = exclude_article_text(document);
        if excluded > 0 {
            zoon::println!("REVEAL: {excluded} article text elements left to the article");
        }
        registry.bind_batch(document);
        let registered: usize = REVEAL_BINDINGS
            .iter()
            .map(|binding| registry.bind(document, binding))
            .sum();
        zoon::println!("REVEAL: {registered} elements bound");
        registry.start()
    }
}

fn crossing_observer(
    window: &Window,
    threshold: f64,
    element_crossed_relay: Relay<(u64, bool)>,
) -> Result<IntersectionObserver, FeatureAbsent> {
    let window = window.clone();
    dom::intersection_observer(&root_margin(threshold), 0.0, move |entries, _observer| {
        let viewport_height = dom::viewport_height(&window);
        for entry in entries {
            let Some(id) = reveal_id(&entry.target()) else {
                continue;
            };
            let top = entry.bounding_client_rect().top();
            element_crossed_relay.send((id, has_crossed(top, viewport_height, threshold)));
        }
    })
}

fn reveal_id(element: &Element) -> Option<u64> {
    element.get_attribute(REVEAL_ID_ATTRIBUTE)?.parse().ok()
}

fn is_claimed(element: &HtmlElement) -> bool {
    element.has_attribute(REVEAL_ID_ATTRIBUTE)
}

/// Wraps each word in a clipping span once; later calls are no-ops.
fn split_into_words(document: &Document, element: &HtmlElement) {
    if element.get_attribute(SPLIT_MARKER).as_deref() == Some("true") {
        return;
    }
    let text = element.text_content().unwrap_or_default();
    element.set_inner_html("");
    for word in split_words(&text) {
        let (Ok(outer), Ok(inner)) = (
            document.create_element("span"),
            document.create_element("span"),
        ) else {
            continue;
        };
        outer.set_class_name("word");
        dom::set_attribute(
            &outer,
            "style",
            "display:inline-block;overflow:hidden;vertical-align:top;margin-right:0.25em",
        );
        inner.set_class_name("word-inner");
        dom::set_attribute(&inner, "style", "display:inline-block");
        inner.set_text_content(Some(word));
        let _ = outer.append_child(&inner);
        let _ = element.append_child(&outer);
    }
    dom::set_attribute(element, SPLIT_MARKER, "true");
}

/// Blog articles animate as one block; their text stays out of the generic
/// fallbacks.
fn exclude_article_text(document: &Document) -> usize {
    if dom::select(document, BLOG_DETAIL).is_none() {
        return 0;
    }
    let text = dom::select_all(document, BLOG_DETAIL_TEXT);
    for element in &text {
        dom::toggle_class(element, "animated", true);
    }
    text.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::reveal::DEFAULT_THRESHOLD;
    use shared::{RevealOptions, RevealPreset};

    #[test]
    fn stage_tweens_from_hidden_to_settled() {
        let spec = RevealSpec::resolve(
            RevealPreset::SlideLeft,
            &RevealOptions::new().stagger(0.15),
            2,
            DEFAULT_THRESHOLD,
            TriggerPolicy::OneShot,
        );
        let (hidden, tween) = stage_tweens(&spec);
        assert_eq!(hidden, RevealPreset::SlideLeft.hidden());
        assert_eq!(tween.to, RevealPreset::SlideLeft.settled());
        assert!((tween.delay - 0.3).abs() < 1e-9);
        assert_eq!(tween.stagger, 0.0);
        assert_eq!(tween.duration, 0.9);
    }

    #[test]
    fn word_reveal_staggers_inside_the_element() {
        let spec = RevealSpec::resolve(
            RevealPreset::WordReveal,
            &RevealOptions::new(),
            0,
            DEFAULT_THRESHOLD,
            TriggerPolicy::OneShot,
        );
        let (hidden, tween) = stage_tweens(&spec);
        assert_eq!(hidden.y_percent, Some(100.0));
        assert_eq!(tween.stagger, 0.03);
    }

    #[test]
    fn thresholds_share_observers_by_exact_value() {
        assert_eq!(threshold_key(0.85), threshold_key(DEFAULT_THRESHOLD));
        assert_ne!(threshold_key(0.85), threshold_key(0.95));
    }
}
