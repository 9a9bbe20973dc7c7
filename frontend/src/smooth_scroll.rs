//! Desktop smooth scrolling through Lenis.
//!
//! Lenis scrolls the window itself, so every other scroll listener on the
//! page keeps working unchanged. Whether it runs is re-decided after the
//! viewport stops resizing.

use crate::dataflow::relay;
use crate::dom;
use crate::guard::FeatureAbsent;
use futures::{StreamExt, select};
use gloo_timers::callback::Timeout;
use shared::Ease;
use shared::config::SmoothScrollSection;
use shared::page::{
    HEAVY_FORM_SELECTORS, PageTraits, SmoothScrollTransition, smooth_scroll_transition,
    smooth_scroll_wanted,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::wasm_bindgen;
use web_sys::{Document, Window};
use zoon::{Task, TaskHandle};

const ACTIVE_CLASS: &str = "lenis-active";

type EasingFn = Closure<dyn Fn(f64) -> f64>;

pub struct SmoothScroll {
    scroll_easing: EasingFn,
    _task: TaskHandle,
}

struct Engine {
    document: Document,
    window: Window,
    config: SmoothScrollSection,
    easing: EasingFn,
    active: bool,
}

impl Engine {
    fn page_traits(&self) -> PageTraits {
        let body = self.document.body();
        PageTraits {
            viewport_width: dom::viewport_width(&self.window),
            body_id: body.as_ref().map(|body| body.id()).unwrap_or_default(),
            body_classes: body
                .as_ref()
                .map(|body| class_names(&body.class_name()))
                .unwrap_or_default(),
            has_heavy_form: dom::select(&self.document, HEAVY_FORM_SELECTORS).is_some(),
        }
    }

    fn evaluate(&mut self) {
        let wanted = smooth_scroll_wanted(&self.page_traits(), self.config.breakpoint_px);
        let root = self.document.document_element();
        match smooth_scroll_transition(wanted, self.active) {
            SmoothScrollTransition::Activate => {
                lenis_start(
                    self.config.duration,
                    self.config.touch_multiplier,
                    self.easing.as_ref().unchecked_ref(),
                );
                if let Some(root) = &root {
                    dom::toggle_class(root, ACTIVE_CLASS, true);
                }
                self.active = true;
                zoon::println!("SMOOTH: active");
            }
            SmoothScrollTransition::Deactivate => {
                lenis_stop();
                if let Some(root) = &root {
                    dom::toggle_class(root, ACTIVE_CLASS, false);
                }
                if let Some(body) = self.document.body() {
                    let _ = body.style().remove_property("overflow");
                }
                self.active = false;
                zoon::println!("SMOOTH: native scrolling");
            }
            SmoothScrollTransition::Keep => {}
        }
    }
}

fn class_names(class_attribute: &str) -> Vec<String> {
    class_attribute.split_whitespace().map(str::to_string).collect()
}

impl SmoothScroll {
    pub fn new(
        document: &Document,
        window: &Window,
        config: &SmoothScrollSection,
    ) -> Result<Self, FeatureAbsent> {
        if !lenis_available() {
            return Err(FeatureAbsent::Engine("Lenis"));
        }

        let mut engine = Engine {
            document: document.clone(),
            window: window.clone(),
            config: config.clone(),
            easing: Closure::new(|t: f64| Ease::SmoothScroll.apply(t)),
            active: false,
        };
        engine.evaluate();

        let (window_resized_relay, mut window_resized_stream) = relay::<()>();
        let (resize_settled_relay, mut resize_settled_stream) = relay::<()>();
        dom::listen_passive(window, "resize", move |_| window_resized_relay.send(()));

        let debounce_ms = config.resize_debounce_ms;
        let task = Task::start_droppable(async move {
            let mut debounce: Option<Timeout> = None;
            loop {
                select! {
                    Some(()) = window_resized_stream.next() => {
                        // replacing the timeout cancels the previous one
                        let resize_settled_relay = resize_settled_relay.clone();
                        debounce = Some(Timeout::new(debounce_ms, move || {
                            resize_settled_relay.send(())
                        }));
                    }
                    Some(()) = resize_settled_stream.next() => {
                        debounce = None;
                        engine.evaluate();
                    }
                    complete => break,
                }
            }
            drop(debounce);
        });

        Ok(Self {
            scroll_easing: Closure::new(|t: f64| Ease::CubicOut.apply(t)),
            _task: task,
        })
    }

    /// Scrolls to the top through Lenis when it is running. Returns `false`
    /// when the caller should fall back to native scrolling.
    pub fn scroll_to_top(&self, duration: f64) -> bool {
        lenis_scroll_to(0.0, duration, self.scroll_easing.as_ref().unchecked_ref())
    }
}

#[wasm_bindgen(inline_js = r#"
export function lenis_available() {
  return typeof window !== 'undefined' && typeof window.Lenis !== 'undefined';
}
export function lenis_start(duration, touchMultiplier, easing) {
  if (window.__siteLenis) return;
  const lenis = new window.Lenis({
    duration,
    easing,
    orientation: 'vertical',
    gestureOrientation: 'vertical',
    smoothWheel: true,
    wheelMultiplier: 1,
    touchMultiplier,
  });
  window.__siteLenis = lenis;
  if (window.gsap && window.gsap.ticker) {
    lenis.__tick = (time) => lenis.raf(time * 1000);
    window.gsap.ticker.add(lenis.__tick);
    window.gsap.ticker.lagSmoothing(0);
  } else {
    const raf = (time) => {
      if (window.__siteLenis !== lenis) return;
      lenis.raf(time);
      requestAnimationFrame(raf);
    };
    requestAnimationFrame(raf);
  }
}
export function lenis_stop() {
  const lenis = window.__siteLenis;
  if (!lenis) return;
  if (lenis.__tick && window.gsap) window.gsap.ticker.remove(lenis.__tick);
  lenis.destroy();
  window.__siteLenis = null;
}
export function lenis_scroll_to(target, duration, easing) {
  const lenis = window.__siteLenis;
  if (!lenis) return false;
  lenis.scrollTo(target, { duration, easing });
  return true;
}
"#)]
extern "C" {
    fn lenis_available() -> bool;
    fn lenis_start(duration: f64, touch_multiplier: f64, easing: &js_sys::Function);
    fn lenis_stop();
    fn lenis_scroll_to(target: f64, duration: f64, easing: &js_sys::Function) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_classes_split_on_whitespace() {
        assert_eq!(
            class_names("  home page-legal\tdark "),
            vec!["home".to_string(), "page-legal".to_string(), "dark".to_string()]
        );
        assert!(class_names("").is_empty());
    }
}
