//! Count-up stat figures, started the first time each one is 40% visible.

use crate::dom;
use crate::guard::FeatureAbsent;
use shared::CounterTarget;
use shared::config::CounterSection;
use shared::counter::counter_progress;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, Window};
use zoon::{Task, Timer};

const COUNTER: &str = ".estat-num";
const TARGET_ATTRIBUTE: &str = "data-counter-target";
const FRAME_MS: u32 = 16;

/// Arms every counter on the page; returns how many were found.
pub fn start_counters(
    document: &Document,
    window: &Window,
    config: &CounterSection,
) -> Result<usize, FeatureAbsent> {
    let counters = dom::required_all(document, COUNTER)?;
    for counter in &counters {
        // the original text stays the target even after frames overwrite it
        if counter.get_attribute(TARGET_ATTRIBUTE).is_none() {
            let text = counter.text_content().unwrap_or_default();
            dom::set_attribute(counter, TARGET_ATTRIBUTE, text.trim());
        }
    }

    let duration_ms = config.duration_ms;
    if !dom::supports_intersection_observer(window) {
        zoon::println!("COUNTER: no IntersectionObserver, animating immediately");
        for counter in counters.iter().cloned() {
            animate(window.clone(), counter, duration_ms);
        }
        return Ok(counters.len());
    }

    let frame_window = window.clone();
    let threshold = config.visibility_threshold;
    let observer = dom::intersection_observer("0px", threshold, move |entries, observer| {
        for entry in entries.into_iter().filter(|entry| entry.is_intersecting()) {
            let target = entry.target();
            observer.unobserve(&target);
            if let Ok(counter) = target.dyn_into::<HtmlElement>() {
                animate(frame_window.clone(), counter, duration_ms);
            }
        }
    })?;
    for counter in &counters {
        observer.observe(counter);
    }
    Ok(counters.len())
}

fn animate(window: Window, counter: HtmlElement, duration_ms: f64) {
    let source = counter
        .get_attribute(TARGET_ATTRIBUTE)
        .or_else(|| counter.text_content())
        .unwrap_or_default();
    let Some(target) = CounterTarget::parse(&source) else {
        return;
    };
    Task::start(async move {
        let started = dom::now(&window);
        loop {
            let progress = counter_progress(dom::now(&window) - started, duration_ms);
            counter.set_text_content(Some(&target.frame_text(progress)));
            if progress >= 1.0 {
                break;
            }
            Timer::sleep(FRAME_MS).await;
        }
    });
}
