//! Scroll-to-top button with a circular page progress ring.

use crate::dom;
use crate::guard::FeatureAbsent;
use crate::smooth_scroll::SmoothScroll;
use shared::config::ScrollTopSection;
use shared::page::{page_fraction, ring_circumference, ring_dash_offset, scroll_top_visible};
use std::rc::Rc;
use web_sys::{Document, Element, HtmlElement, ScrollBehavior, ScrollToOptions, Window};

const BUTTON_ID: &str = "scrollTopBtn";

fn button_markup(radius: f64) -> String {
    let size = (radius + 3.0) * 2.0;
    let center = size / 2.0;
    format!(
        r#"<button id="{BUTTON_ID}" class="scroll-to-top" aria-label="Scroll to top">
  <svg class="progress-ring" width="{size}" height="{size}">
    <circle class="progress-ring-bg" cx="{center}" cy="{center}" r="{radius}" />
    <circle class="progress-ring-circle" cx="{center}" cy="{center}" r="{radius}" />
  </svg>
  <svg class="arrow-icon" width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2.5" stroke-linecap="round" stroke-linejoin="round">
    <polyline points="18 15 12 9 6 15"></polyline>
  </svg>
</button>"#
    )
}

struct ProgressRing {
    window: Window,
    document: Document,
    button: HtmlElement,
    circle: Element,
    circumference: f64,
    show_after: f64,
}

impl ProgressRing {
    fn update(&self) {
        let scroll_top = dom::scroll_y(&self.window);
        let (scroll_height, client_height) = self
            .document
            .document_element()
            .map(|root| (root.scroll_height() as f64, root.client_height() as f64))
            .unwrap_or((0.0, 0.0));
        let fraction = page_fraction(scroll_top, scroll_height, client_height);
        let offset = ring_dash_offset(self.circumference, fraction);
        dom::set_attribute(&self.circle, "stroke-dashoffset", &offset.to_string());
        dom::toggle_class(&self.button, "visible", scroll_top_visible(scroll_top, self.show_after));
    }
}

pub fn install_scroll_to_top(
    document: &Document,
    window: &Window,
    smooth_scroll: Option<Rc<SmoothScroll>>,
    config: &ScrollTopSection,
) -> Result<(), FeatureAbsent> {
    let body = document
        .body()
        .ok_or_else(|| FeatureAbsent::Element("body".to_string()))?;
    let _ = body.insert_adjacent_html("beforeend", &button_markup(config.ring_radius));

    let button = dom::by_id(document, BUTTON_ID)
        .ok_or_else(|| FeatureAbsent::Element(format!("#{BUTTON_ID}")))?;
    let circle = button
        .query_selector(".progress-ring-circle")
        .ok()
        .flatten()
        .ok_or_else(|| FeatureAbsent::Element(".progress-ring-circle".to_string()))?;

    let circumference = ring_circumference(config.ring_radius);
    dom::set_attribute(&circle, "stroke-dasharray", &format!("{circumference} {circumference}"));

    let ring = ProgressRing {
        window: window.clone(),
        document: document.clone(),
        button: button.clone(),
        circle,
        circumference,
        show_after: config.show_after_px,
    };
    ring.update();
    dom::listen_passive(window, "scroll", move |_| ring.update());

    let scroll_window = window.clone();
    let duration = config.scroll_duration;
    dom::listen(&button, "click", move |_| {
        let smoothed = smooth_scroll
            .as_ref()
            .is_some_and(|smooth_scroll| smooth_scroll.scroll_to_top(duration));
        if !smoothed {
            let options = ScrollToOptions::new();
            options.set_top(0.0);
            options.set_behavior(ScrollBehavior::Smooth);
            scroll_window.scroll_to_with_scroll_to_options(&options);
        }
    });
    Ok(())
}
