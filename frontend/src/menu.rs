//! Full-screen mobile menu.

use crate::dataflow::relay;
use crate::dom;
use crate::engine::SharedAnimator;
use crate::guard::FeatureAbsent;
use futures::{StreamExt, select};
use shared::config::MenuSection;
use shared::{Ease, Tween, VisualState};
use web_sys::{Document, HtmlElement};
use zoon::{Task, TaskHandle, Timer};

const OPEN_CLIP: &str = "inset(0 0 0 0)";
const CLOSED_CLIP: &str = "inset(0 0 0 100%)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuRequest {
    Open,
    Close,
}

/// Whether a request changes anything given the current open flag.
fn accepts(is_open: bool, request: MenuRequest) -> bool {
    match request {
        MenuRequest::Open => !is_open,
        MenuRequest::Close => is_open,
    }
}

pub struct MobileMenu {
    _task: TaskHandle,
}

struct MenuView {
    menu: HtmlElement,
    body: HtmlElement,
    links: Vec<HtmlElement>,
    animator: SharedAnimator,
    config: MenuSection,
}

impl MenuView {
    fn open(&self) {
        dom::set_style(&self.menu, "visibility", "visible");
        dom::set_style(&self.menu, "clip-path", OPEN_CLIP);
        dom::toggle_class(&self.body, "menu-active", true);

        let hidden = VisualState::default().y(20.0).opacity(0.0);
        let shown = VisualState::default().y(0.0).opacity(1.0);
        let tween = Tween::new(shown, self.config.link_duration)
            .delay(self.config.link_delay)
            .stagger(self.config.link_stagger)
            .ease(Ease::Power2Out);
        self.animator.from_to(&self.links, &hidden, &tween, None);
    }

    /// Starts the close transition; the returned task finishes it.
    fn close(&self) -> TaskHandle {
        dom::set_style(&self.menu, "clip-path", CLOSED_CLIP);
        dom::toggle_class(&self.body, "menu-active", false);

        let menu = self.menu.clone();
        let links = self.links.clone();
        let animator = self.animator.clone();
        let delay = self.config.close_delay_ms;
        Task::start_droppable(async move {
            Timer::sleep(delay).await;
            dom::set_style(&menu, "visibility", "hidden");
            animator.kill(&links);
            animator.clear(&links);
        })
    }
}

impl MobileMenu {
    pub fn new(
        document: &Document,
        animator: SharedAnimator,
        config: &MenuSection,
    ) -> Result<Self, FeatureAbsent> {
        let menu = dom::by_id(document, "mobileMenu")
            .ok_or_else(|| FeatureAbsent::Element("#mobileMenu".to_string()))?;
        let body = document
            .body()
            .ok_or_else(|| FeatureAbsent::Element("body".to_string()))?;
        let links = dom::select_all_in(&menu, "a");

        let (menu_requested_relay, mut menu_requested_stream) = relay::<MenuRequest>();
        let mut triggers: Vec<(HtmlElement, MenuRequest)> = Vec::new();
        if let Some(toggle) = dom::by_id(document, "menuToggleBtn") {
            triggers.push((toggle, MenuRequest::Open));
        }
        if let Some(close) = dom::by_id(document, "closeMenuBtn") {
            triggers.push((close, MenuRequest::Close));
        }
        triggers.extend(links.iter().cloned().map(|link| (link, MenuRequest::Close)));
        for (trigger, request) in triggers {
            let menu_requested_relay = menu_requested_relay.clone();
            dom::listen(&trigger, "click", move |_| menu_requested_relay.send(request));
        }

        let view = MenuView {
            menu,
            body,
            links,
            animator,
            config: config.clone(),
        };

        let task = Task::start_droppable(async move {
            let mut is_open = false;
            let mut pending_hide: Option<TaskHandle> = None;
            loop {
                select! {
                    Some(request) = menu_requested_stream.next() => {
                        if !accepts(is_open, request) {
                            continue;
                        }
                        match request {
                            MenuRequest::Open => {
                                // reopening inside the close delay keeps the menu visible
                                pending_hide = None;
                                view.open();
                            }
                            MenuRequest::Close => pending_hide = Some(view.close()),
                        }
                        is_open = request == MenuRequest::Open;
                    }
                    complete => break,
                }
            }
            drop(pending_hide);
        });

        Ok(Self { _task: task })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_only_act_on_a_change() {
        assert!(accepts(false, MenuRequest::Open));
        assert!(!accepts(true, MenuRequest::Open));
        assert!(accepts(true, MenuRequest::Close));
        assert!(!accepts(false, MenuRequest::Close));
    }
}
