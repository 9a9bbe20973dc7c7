//! Tweening engine seam.
//!
//! Controllers describe what an element should look like ([`VisualState`])
//! and how to get there ([`Tween`]); an [`Animator`] carries it out. The
//! page normally loads GSAP, driven through [`GsapAnimator`]. Without it
//! [`InlineAnimator`] jumps straight to the end state so content is never
//! left hidden.

use serde::Serialize;
use shared::{Tween, VisualState};
use std::rc::Rc;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::wasm_bindgen;
use web_sys::HtmlElement;

/// Runs once the tween (including every staggered target) has finished.
pub type Completion = Box<dyn FnOnce()>;

pub trait Animator {
    fn name(&self) -> &'static str;

    /// Applies a state immediately, without a transition.
    fn set(&self, targets: &[HtmlElement], state: &VisualState);

    fn from_to(
        &self,
        targets: &[HtmlElement],
        from: &VisualState,
        tween: &Tween,
        on_complete: Option<Completion>,
    );

    fn to(&self, targets: &[HtmlElement], tween: &Tween, on_complete: Option<Completion>);

    /// Stops in-flight tweens on the targets where they are; pending
    /// completions never fire.
    fn kill(&self, targets: &[HtmlElement]);

    /// Removes every inline property the animator wrote.
    fn clear(&self, targets: &[HtmlElement]);
}

pub type SharedAnimator = Rc<dyn Animator>;

/// Picks the engine if the page loaded one.
pub fn detect() -> Option<SharedAnimator> {
    if gsap_available() {
        zoon::println!("ENGINE: using GSAP");
        Some(Rc::new(GsapAnimator))
    } else {
        None
    }
}

/// Engine vars for a tween: the target properties plus timing keys.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TweenVars<'a> {
    #[serde(flatten)]
    to: &'a VisualState,
    duration: f64,
    #[serde(skip_serializing_if = "is_zero")]
    delay: f64,
    #[serde(skip_serializing_if = "is_zero")]
    stagger: f64,
    ease: String,
    overwrite: bool,
}

fn is_zero(value: &f64) -> bool {
    *value == 0.0
}

impl<'a> TweenVars<'a> {
    fn new(tween: &'a Tween) -> Self {
        Self {
            to: &tween.to,
            duration: tween.duration,
            delay: tween.delay,
            stagger: tween.stagger,
            ease: tween.ease.engine_name(),
            // a new tween on an element replaces whatever it was doing
            overwrite: true,
        }
    }
}

fn to_js(value: &impl Serialize) -> Option<JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    match value.serialize(&serializer) {
        Ok(js) => Some(js),
        Err(error) => {
            zoon::eprintln!("ENGINE: failed to build tween vars: {error}");
            None
        }
    }
}

fn targets_array(targets: &[HtmlElement]) -> js_sys::Array {
    targets.iter().collect()
}

fn completion_js(on_complete: Option<Completion>) -> JsValue {
    match on_complete {
        Some(callback) => Closure::once_into_js(move || callback()),
        None => JsValue::UNDEFINED,
    }
}

pub struct GsapAnimator;

impl Animator for GsapAnimator {
    fn name(&self) -> &'static str {
        "gsap"
    }

    fn set(&self, targets: &[HtmlElement], state: &VisualState) {
        if targets.is_empty() {
            return;
        }
        if let Some(vars) = to_js(state) {
            gsap_set(&targets_array(targets), &vars);
        }
    }

    fn from_to(
        &self,
        targets: &[HtmlElement],
        from: &VisualState,
        tween: &Tween,
        on_complete: Option<Completion>,
    ) {
        if targets.is_empty() {
            if let Some(callback) = on_complete {
                callback();
            }
            return;
        }
        let (Some(from), Some(to)) = (to_js(from), to_js(&TweenVars::new(tween))) else {
            return;
        };
        gsap_from_to(&targets_array(targets), &from, &to, &completion_js(on_complete));
    }

    fn to(&self, targets: &[HtmlElement], tween: &Tween, on_complete: Option<Completion>) {
        if targets.is_empty() {
            if let Some(callback) = on_complete {
                callback();
            }
            return;
        }
        let Some(to) = to_js(&TweenVars::new(tween)) else {
            return;
        };
        gsap_to(&targets_array(targets), &to, &completion_js(on_complete));
    }

    fn kill(&self, targets: &[HtmlElement]) {
        if !targets.is_empty() {
            gsap_kill(&targets_array(targets));
        }
    }

    fn clear(&self, targets: &[HtmlElement]) {
        if !targets.is_empty() {
            gsap_clear(&targets_array(targets));
        }
    }
}

/// Engine-free fallback: every tween lands on its end state at once.
pub struct InlineAnimator;

impl Animator for InlineAnimator {
    fn name(&self) -> &'static str {
        "inline"
    }

    fn set(&self, targets: &[HtmlElement], state: &VisualState) {
        for target in targets {
            crate::dom::apply_visual(target, state);
        }
    }

    fn from_to(
        &self,
        targets: &[HtmlElement],
        _from: &VisualState,
        tween: &Tween,
        on_complete: Option<Completion>,
    ) {
        self.to(targets, tween, on_complete);
    }

    fn to(&self, targets: &[HtmlElement], tween: &Tween, on_complete: Option<Completion>) {
        self.set(targets, &tween.to);
        if let Some(callback) = on_complete {
            callback();
        }
    }

    fn kill(&self, _targets: &[HtmlElement]) {}

    fn clear(&self, targets: &[HtmlElement]) {
        for target in targets {
            let _ = target.remove_attribute("style");
        }
    }
}

#[wasm_bindgen(inline_js = r#"
export function gsap_available() {
  return typeof window !== 'undefined' && typeof window.gsap !== 'undefined';
}
export function gsap_set(targets, vars) {
  window.gsap.set(targets, vars);
}
export function gsap_from_to(targets, fromVars, toVars, onComplete) {
  if (typeof onComplete === 'function') toVars.onComplete = onComplete;
  window.gsap.fromTo(targets, fromVars, toVars);
}
export function gsap_to(targets, toVars, onComplete) {
  if (typeof onComplete === 'function') toVars.onComplete = onComplete;
  window.gsap.to(targets, toVars);
}
export function gsap_kill(targets) {
  window.gsap.killTweensOf(targets);
}
export function gsap_clear(targets) {
  window.gsap.set(targets, { clearProps: 'all' });
}
"#)]
extern "C" {
    fn gsap_available() -> bool;
    fn gsap_set(targets: &js_sys::Array, vars: &JsValue);
    fn gsap_from_to(targets: &js_sys::Array, from: &JsValue, to: &JsValue, on_complete: &JsValue);
    fn gsap_to(targets: &js_sys::Array, to: &JsValue, on_complete: &JsValue);
    fn gsap_kill(targets: &js_sys::Array);
    fn gsap_clear(targets: &js_sys::Array);
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Ease;

    #[test]
    fn vars_carry_properties_and_timing() {
        let tween = Tween::new(VisualState::default().opacity(1.0).y(0.0), 0.8)
            .delay(0.2)
            .ease(Ease::Power3Out);
        let vars = serde_json::to_value(TweenVars::new(&tween)).unwrap();
        assert_eq!(
            vars,
            serde_json::json!({
                "opacity": 1.0,
                "y": 0.0,
                "duration": 0.8,
                "delay": 0.2,
                "ease": "power3.out",
                "overwrite": true,
            })
        );
    }

    #[test]
    fn stagger_only_when_set() {
        let tween = Tween::new(VisualState::default().y_percent(0.0), 0.6).stagger(0.03);
        let vars = serde_json::to_value(TweenVars::new(&tween)).unwrap();
        assert_eq!(vars["stagger"], 0.03);
        assert_eq!(vars["yPercent"], 0.0);
        assert!(vars.get("delay").is_none());
    }
}
