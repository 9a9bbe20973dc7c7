//! Pinned services section: scroll progress drives the card timeline, the
//! step markers and the progress fill.
//!
//! With ScrollTrigger loaded the section is pinned by it and its progress
//! reports feed the tracker. Without it the section is wrapped in a spacer
//! one viewport plus the pin distance tall and sticks inside it; the
//! spacer's top edge is the origin of the scroll offset.

use crate::dataflow::{Relay, relay};
use crate::debug_utils::Throttle;
use crate::dom;
use crate::engine::SharedAnimator;
use crate::guard::FeatureAbsent;
use futures::{StreamExt, select};
use shared::config::ServicesSection;
use shared::scroll_progress::{offset_from_progress, region_offset, track_extent};
use shared::timeline::card_frame;
use shared::{ScrollProgressTracker, StepActivation, StepUpdate};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement, Window};
use zoon::{Task, TaskHandle};

static FRAME_LOG: Throttle = Throttle::new("SERVICES");

const SPACER_CLASS: &str = "pin-spacer";

pub struct ServicesScroll {
    _pin: Pin,
    _task: TaskHandle,
}

enum Pin {
    ScrollTrigger {
        _trigger: JsValue,
        _on_update: Closure<dyn FnMut(f64)>,
    },
    Spacer(HtmlElement),
}

impl Pin {
    fn spacer(&self) -> Option<&HtmlElement> {
        match self {
            Pin::Spacer(spacer) => Some(spacer),
            Pin::ScrollTrigger { .. } => None,
        }
    }
}

struct PinnedSection {
    window: Window,
    spacer: Option<HtmlElement>,
    cards: Vec<HtmlElement>,
    step_items: Vec<HtmlElement>,
    fill: Option<HtmlElement>,
    tracker: ScrollProgressTracker,
    steps: StepActivation,
    animator: SharedAnimator,
}

/// One step per card; a section without cards has nothing to drive.
fn card_steps(card_count: usize, section: &str) -> Result<StepActivation, FeatureAbsent> {
    StepActivation::new(card_count).ok_or_else(|| FeatureAbsent::EmptyGroup(section.to_string()))
}

impl ServicesScroll {
    pub fn new(
        document: &Document,
        window: &Window,
        animator: SharedAnimator,
        config: &ServicesSection,
    ) -> Result<Self, FeatureAbsent> {
        let section = dom::required(document, &config.section)?;
        let cards = dom::select_all_in(&section, &config.card);
        let steps = card_steps(cards.len(), &config.section)?;
        let step_items = dom::select_all_in(&section, &config.step);

        let (pin_progressed_relay, mut pin_progressed_stream) = relay::<f64>();
        let (window_scrolled_relay, mut window_scrolled_stream) = relay::<()>();
        let (window_resized_relay, mut window_resized_stream) = relay::<()>();

        let extent = config.pin_extent_px;
        let pin = if scroll_trigger_available() {
            let on_update = Closure::<dyn FnMut(f64)>::new(move |progress: f64| {
                pin_progressed_relay.send(progress);
            });
            let trigger = scroll_trigger_pin(&section, extent, on_update.as_ref().unchecked_ref());
            zoon::println!("SERVICES: pinned by ScrollTrigger");
            Pin::ScrollTrigger {
                _trigger: trigger,
                _on_update: on_update,
            }
        } else {
            let spacer = wrap_in_spacer(document, &section, extent)?;
            listen_window(window, "scroll", window_scrolled_relay);
            listen_window(window, "resize", window_resized_relay);
            zoon::println!("SERVICES: pinned by spacer");
            Pin::Spacer(spacer)
        };

        let mut pinned = PinnedSection {
            window: window.clone(),
            spacer: pin.spacer().cloned(),
            cards,
            step_items,
            fill: dom::by_id(document, &config.progress_fill_id),
            tracker: ScrollProgressTracker::new(extent),
            steps,
            animator,
        };
        pinned.measure();
        if pinned.spacer.is_some() {
            pinned.render_from_spacer();
        } else {
            pinned.render(0.0);
        }
        zoon::println!("SERVICES: {} cards over {}px", pinned.cards.len(), extent);

        let task = Task::start_droppable(async move {
            loop {
                select! {
                    Some(progress) = pin_progressed_stream.next() => {
                        let offset = offset_from_progress(progress, pinned.tracker.extent());
                        pinned.render(offset);
                    }
                    Some(()) = window_scrolled_stream.next() => {
                        pinned.render_from_spacer();
                    }
                    Some(()) = window_resized_stream.next() => {
                        pinned.measure();
                        pinned.render_from_spacer();
                    }
                    complete => break,
                }
            }
        });

        Ok(Self {
            _pin: pin,
            _task: task,
        })
    }
}

fn listen_window(window: &Window, event: &str, relay: Relay<()>) {
    dom::listen_passive(window, event, move |_| relay.send(()));
}

/// Moves the section into a fresh spacer at its place in the page. The
/// section sticks to the top while the spacer scrolls past.
fn wrap_in_spacer(
    document: &Document,
    section: &HtmlElement,
    extent: f64,
) -> Result<HtmlElement, FeatureAbsent> {
    let parent = section
        .parent_node()
        .ok_or_else(|| FeatureAbsent::Element(format!("{SPACER_CLASS} parent")))?;
    let spacer = document
        .create_element("div")
        .ok()
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
        .ok_or_else(|| FeatureAbsent::Element(format!(".{SPACER_CLASS}")))?;
    spacer.set_class_name(SPACER_CLASS);
    parent
        .insert_before(&spacer, Some(section))
        .and_then(|_| spacer.append_child(section))
        .map_err(|_| FeatureAbsent::Element(format!(".{SPACER_CLASS}")))?;

    dom::set_style(&spacer, "position", "relative");
    dom::set_style(&spacer, "height", &spacer_height(extent));
    dom::set_style(section, "position", "sticky");
    dom::set_style(section, "top", "0");
    dom::set_style(section, "height", "100vh");
    Ok(spacer)
}

fn spacer_height(extent: f64) -> String {
    format!("calc(100vh + {}px)", extent.max(0.0).round())
}

impl PinnedSection {
    fn measure(&mut self) {
        let Some(spacer) = &self.spacer else {
            return;
        };
        let height = dom::rect(spacer).height;
        let extent = track_extent(height, dom::viewport_height(&self.window));
        self.tracker.resize(extent);
    }

    fn render_from_spacer(&mut self) {
        let Some(spacer) = &self.spacer else {
            return;
        };
        let offset = region_offset(dom::rect(spacer).top);
        self.render(offset);
    }

    fn render(&mut self, offset: f64) {
        let progress = self.tracker.update(offset);
        FRAME_LOG.log(|| format!("progress {progress:.3}"));

        let count = self.cards.len();
        for (index, card) in self.cards.iter().enumerate() {
            let frame = card_frame(index, count, progress);
            self.animator.set(std::slice::from_ref(card), &frame.visual());
            dom::toggle_class(card, "active", frame.is_active());
        }

        if let StepUpdate::Changed {
            active,
            fill_percent,
        } = self.steps.set_progress(progress)
        {
            for (index, item) in self.step_items.iter().enumerate() {
                dom::toggle_class(item, "active", index == active);
            }
            if let Some(fill) = &self.fill {
                dom::set_style(fill, "height", &format!("{fill_percent}%"));
            }
        }
    }
}

#[wasm_bindgen(inline_js = r#"
export function scroll_trigger_available() {
  return typeof window !== 'undefined'
    && typeof window.gsap !== 'undefined'
    && typeof window.ScrollTrigger !== 'undefined';
}
export function scroll_trigger_pin(section, extent, onUpdate) {
  window.gsap.registerPlugin(window.ScrollTrigger);
  return window.ScrollTrigger.create({
    trigger: section,
    start: 'top top',
    end: '+=' + extent,
    pin: true,
    anticipatePin: 1,
    onUpdate: (self) => onUpdate(self.progress),
  });
}
"#)]
extern "C" {
    fn scroll_trigger_available() -> bool;
    fn scroll_trigger_pin(
        section: &HtmlElement,
        extent: f64,
        on_update: &js_sys::Function,
    ) -> JsValue;
}
