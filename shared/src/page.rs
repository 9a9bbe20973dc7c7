//! Page-level scroll helpers: the scroll-to-top ring, the smooth scroll
//! enable policy and the hover follower geometry.

use std::f64::consts::PI;

// ===== SCROLL TO TOP =====

pub fn ring_circumference(radius: f64) -> f64 {
    radius * 2.0 * PI
}

/// Fraction of the document scrolled, 0 when the page cannot scroll.
pub fn page_fraction(scroll_top: f64, scroll_height: f64, client_height: f64) -> f64 {
    let scrollable = scroll_height - client_height;
    if scrollable <= 0.0 {
        return 0.0;
    }
    (scroll_top / scrollable).clamp(0.0, 1.0)
}

/// Stroke dash offset drawing `fraction` of the ring.
pub fn ring_dash_offset(circumference: f64, fraction: f64) -> f64 {
    circumference - fraction.clamp(0.0, 1.0) * circumference
}

pub fn scroll_top_visible(scroll_top: f64, show_after: f64) -> bool {
    scroll_top > show_after
}

// ===== SMOOTH SCROLL =====

/// What the page looks like, as far as smooth scroll cares.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageTraits {
    pub viewport_width: f64,
    pub body_id: String,
    pub body_classes: Vec<String>,
    pub has_heavy_form: bool,
}

pub const SMOOTH_SCROLL_OPT_OUT_CLASSES: [&str; 2] = ["page-legal", "no-smooth-scroll"];
pub const SMOOTH_SCROLL_OPT_OUT_ID: &str = "page-contact";
pub const HEAVY_FORM_SELECTORS: &str = "form.wpforms-form, form.heavy-form";

/// Desktop-only; contact, legal and form-heavy pages keep native scrolling.
pub fn smooth_scroll_wanted(page: &PageTraits, breakpoint: f64) -> bool {
    if page.viewport_width < breakpoint {
        return false;
    }
    if page.body_id == SMOOTH_SCROLL_OPT_OUT_ID {
        return false;
    }
    if page
        .body_classes
        .iter()
        .any(|class| SMOOTH_SCROLL_OPT_OUT_CLASSES.contains(&class.as_str()))
    {
        return false;
    }
    !page.has_heavy_form
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmoothScrollTransition {
    Activate,
    Deactivate,
    Keep,
}

pub fn smooth_scroll_transition(wanted: bool, active: bool) -> SmoothScrollTransition {
    match (wanted, active) {
        (true, false) => SmoothScrollTransition::Activate,
        (false, true) => SmoothScrollTransition::Deactivate,
        _ => SmoothScrollTransition::Keep,
    }
}

// ===== HOVER FOLLOWER =====

/// Axis-aligned box in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Any part of the box lies inside a viewport of `viewport_height`.
    pub fn intersects_viewport(&self, viewport_height: f64) -> bool {
        self.top < viewport_height && self.bottom() > 0.0
    }
}

/// The follower's target box: the hovered card relative to its section.
pub fn follower_target(card: Rect, section: Rect) -> Rect {
    Rect {
        left: card.left - section.left,
        top: card.top - section.top,
        width: card.width,
        height: card.height,
    }
}

pub fn follower_enabled(viewport_width: f64, min_width: f64, cards_ready: bool) -> bool {
    cards_ready && viewport_width >= min_width
}

#[cfg(test)]
mod tests {
    use super::*;

    fn traits(width: f64) -> PageTraits {
        PageTraits {
            viewport_width: width,
            ..PageTraits::default()
        }
    }

    #[test]
    fn ring_tracks_page_fraction() {
        let circumference = ring_circumference(22.0);
        assert!((circumference - 138.230_076_757_951).abs() < 1e-9);
        assert_eq!(ring_dash_offset(circumference, 0.0), circumference);
        assert_eq!(ring_dash_offset(circumference, 1.0), 0.0);
        assert_eq!(page_fraction(500.0, 2000.0, 1000.0), 0.5);
        assert_eq!(page_fraction(10.0, 800.0, 800.0), 0.0);
    }

    #[test]
    fn button_shows_after_threshold() {
        assert!(!scroll_top_visible(300.0, 300.0));
        assert!(scroll_top_visible(301.0, 300.0));
    }

    #[test]
    fn smooth_scroll_is_desktop_only() {
        assert!(smooth_scroll_wanted(&traits(1280.0), 1024.0));
        assert!(!smooth_scroll_wanted(&traits(800.0), 1024.0));
    }

    #[test]
    fn smooth_scroll_opt_outs() {
        let contact = PageTraits {
            body_id: "page-contact".to_string(),
            ..traits(1440.0)
        };
        assert!(!smooth_scroll_wanted(&contact, 1024.0));

        let legal = PageTraits {
            body_classes: vec!["home".to_string(), "page-legal".to_string()],
            ..traits(1440.0)
        };
        assert!(!smooth_scroll_wanted(&legal, 1024.0));

        let form = PageTraits {
            has_heavy_form: true,
            ..traits(1440.0)
        };
        assert!(!smooth_scroll_wanted(&form, 1024.0));
    }

    #[test]
    fn transitions_only_on_change() {
        use SmoothScrollTransition::*;
        assert_eq!(smooth_scroll_transition(true, false), Activate);
        assert_eq!(smooth_scroll_transition(false, true), Deactivate);
        assert_eq!(smooth_scroll_transition(true, true), Keep);
        assert_eq!(smooth_scroll_transition(false, false), Keep);
    }

    #[test]
    fn follower_box_is_section_relative() {
        let section = Rect { left: 40.0, top: -200.0, width: 1200.0, height: 900.0 };
        let card = Rect { left: 340.0, top: 100.0, width: 280.0, height: 320.0 };
        assert_eq!(
            follower_target(card, section),
            Rect { left: 300.0, top: 300.0, width: 280.0, height: 320.0 }
        );
        assert!(section.intersects_viewport(800.0));
        assert!(!Rect { top: 900.0, height: 10.0, ..section }.intersects_viewport(800.0));
    }

    #[test]
    fn follower_needs_wide_viewport_and_ready_cards() {
        assert!(follower_enabled(1440.0, 1200.0, true));
        assert!(!follower_enabled(1440.0, 1200.0, false));
        assert!(!follower_enabled(1024.0, 1200.0, true));
    }
}
