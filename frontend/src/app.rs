//! SiteApp - every page controller, started once per page load.

use crate::accordion::FaqAccordion;
use crate::carousel::start_carousel;
use crate::config::{load_catalog, load_site_config};
use crate::counters::start_counters;
use crate::engine::{self, InlineAnimator, SharedAnimator};
use crate::guard::{FeatureAbsent, optional};
use crate::hero::{play_blog_detail, play_intro};
use crate::hover::{ProcessFollower, install_arrow_rotation};
use crate::menu::MobileMenu;
use crate::portfolio::Portfolio;
use crate::reveal::RevealOrchestrator;
use crate::scroll_top::install_scroll_to_top;
use crate::services_scroll::ServicesScroll;
use crate::smooth_scroll::SmoothScroll;
use std::rc::Rc;
use web_sys::{Document, Window};

/// Owns the controllers so their tasks and listeners live as long as the page.
pub struct SiteApp {
    _smooth_scroll: Option<Rc<SmoothScroll>>,
    _services: Option<ServicesScroll>,
    _reveals: Option<RevealOrchestrator>,
    _faq: Option<FaqAccordion>,
    _portfolio: Option<Portfolio>,
    _menu: Option<MobileMenu>,
    _process_follower: Option<ProcessFollower>,
}

impl SiteApp {
    pub fn new() -> Result<Self, FeatureAbsent> {
        let window = web_sys::window().ok_or(FeatureAbsent::Engine("window"))?;
        let document = window
            .document()
            .ok_or(FeatureAbsent::Engine("document"))?;
        Ok(Self::start(&document, &window))
    }

    fn start(document: &Document, window: &Window) -> Self {
        let config = load_site_config(document);

        let engine = engine::detect();
        let animator: SharedAnimator = engine
            .clone()
            .unwrap_or_else(|| Rc::new(InlineAnimator));
        zoon::println!("APP: animating with {}", animator.name());

        let smooth_scroll = optional(
            "smooth scroll",
            SmoothScroll::new(document, window, &config.smooth_scroll),
        )
        .map(Rc::new);

        // without the engine the page-load markup is already in its final state
        if let Some(engine) = &engine {
            let steps = play_intro(document, engine) + play_blog_detail(document, engine);
            zoon::println!("APP: page-load timelines played {steps} steps");
        }

        let services = optional(
            "services scroll",
            ServicesScroll::new(document, window, animator.clone(), &config.services),
        );

        let reveals = optional(
            "reveal",
            RevealOrchestrator::new(
                document,
                window,
                engine.clone(),
                config.reveal.threshold,
                config.reveal.policy,
            ),
        );

        let faq = optional("faq", FaqAccordion::new(document, &config.faq));

        let portfolio = optional(
            "portfolio",
            load_catalog(document).and_then(|catalog| {
                Portfolio::new(document, animator.clone(), catalog, &config.portfolio)
            }),
        );

        let menu = optional(
            "mobile menu",
            MobileMenu::new(document, animator.clone(), &config.menu),
        );

        let arrows = install_arrow_rotation(document, &animator);
        if arrows > 0 {
            zoon::println!("APP: arrow rotation on {arrows} service cards");
        }
        let process_follower = optional(
            "process follower",
            ProcessFollower::new(document, window, animator.clone(), &config.follower),
        );

        optional(
            "counters",
            start_counters(document, window, &config.counter),
        );
        optional(
            "scroll to top",
            install_scroll_to_top(document, window, smooth_scroll.clone(), &config.scroll_top),
        );
        optional("carousel", start_carousel(document, &config.carousel));

        Self {
            _smooth_scroll: smooth_scroll,
            _services: services,
            _reveals: reveals,
            _faq: faq,
            _portfolio: portfolio,
            _menu: menu,
            _process_follower: process_follower,
        }
    }
}
