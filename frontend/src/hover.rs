//! Pointer effects: service card arrows and the process card background
//! follower.

use crate::dataflow::relay;
use crate::dom;
use crate::engine::SharedAnimator;
use crate::guard::FeatureAbsent;
use futures::{StreamExt, select};
use shared::config::FollowerSection;
use shared::page::{follower_enabled, follower_target};
use shared::{Ease, Tween, VisualState};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, Window};
use zoon::{Task, TaskHandle, Timer};

const ARROW_DURATION: f64 = 0.3;
const FOLLOW_DURATION: f64 = 0.4;
const FADE_DURATION: f64 = 0.3;

/// Rotates each service card's arrow while the pointer is over the card.
/// Returns how many cards were wired.
pub fn install_arrow_rotation(document: &Document, animator: &SharedAnimator) -> usize {
    let cards = dom::select_all(document, ".service-card-new");
    let mut wired = 0;
    for card in &cards {
        let Some(arrow) = dom::select_in(card, ".arrow-icon") else {
            continue;
        };
        let arrow = vec![arrow];

        let enter_animator = animator.clone();
        let enter_arrow = arrow.clone();
        dom::listen(card, "mouseenter", move |_| {
            let tween = Tween::new(VisualState::default().rotation(-45.0), ARROW_DURATION)
                .ease(Ease::BackOut(1.7));
            enter_animator.to(&enter_arrow, &tween, None);
        });

        let leave_animator = animator.clone();
        dom::listen(card, "mouseleave", move |_| {
            let tween = Tween::new(VisualState::default().rotation(0.0), ARROW_DURATION)
                .ease(Ease::Power2Out);
            leave_animator.to(&arrow, &tween, None);
        });
        wired += 1;
    }
    wired
}

pub struct ProcessFollower {
    _task: TaskHandle,
}

struct FollowerView {
    window: Window,
    section: HtmlElement,
    follower: HtmlElement,
    cards: Vec<HtmlElement>,
    animator: SharedAnimator,
}

impl FollowerView {
    fn section_visible(&self) -> bool {
        dom::rect(&self.section).intersects_viewport(dom::viewport_height(&self.window))
    }

    fn follow(&self, index: usize) {
        let Some(card) = self.cards.get(index) else {
            return;
        };
        let target = follower_target(dom::rect(card), dom::rect(&self.section));
        let to = VisualState::default()
            .x(target.left)
            .y(target.top)
            .size(target.width, target.height)
            .opacity(1.0);
        let tween = Tween::new(to, FOLLOW_DURATION).ease(Ease::Power2Out);
        self.animator.to(std::slice::from_ref(&self.follower), &tween, None);
        for (position, other) in self.cards.iter().enumerate() {
            dom::toggle_class(other, "is-active", position == index);
        }
    }

    fn fade_out(&self) {
        let tween = Tween::new(VisualState::default().opacity(0.0), FADE_DURATION);
        self.animator.to(std::slice::from_ref(&self.follower), &tween, None);
        for card in &self.cards {
            dom::toggle_class(card, "is-active", false);
        }
    }
}

impl ProcessFollower {
    pub fn new(
        document: &Document,
        window: &Window,
        animator: SharedAnimator,
        config: &FollowerSection,
    ) -> Result<Self, FeatureAbsent> {
        let section = dom::required(document, ".process-section")?;
        let grid = dom::select_in(&section, ".process-grid")
            .ok_or_else(|| FeatureAbsent::Element(".process-grid".to_string()))?;

        // Appended to the section so the grid's negative margins don't offset it.
        let follower = document
            .create_element("div")
            .ok()
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
            .ok_or_else(|| FeatureAbsent::Element(".process-bg-follower".to_string()))?;
        dom::toggle_class(&follower, "process-bg-follower", true);
        let _ = section.append_child(&follower);
        animator.set(
            std::slice::from_ref(&follower),
            &VisualState::default().opacity(0.0),
        );

        let cards = dom::select_all_in(&section, ".process-step-card");

        let (window_scrolled_relay, mut window_scrolled_stream) = relay::<()>();
        let (window_loaded_relay, mut window_loaded_stream) = relay::<()>();
        let (ready_delay_elapsed_relay, mut ready_delay_elapsed_stream) = relay::<()>();
        let (card_entered_relay, mut card_entered_stream) = relay::<usize>();
        let (grid_left_relay, mut grid_left_stream) = relay::<()>();

        dom::listen_passive(window, "scroll", move |_| window_scrolled_relay.send(()));
        dom::listen(window, "load", move |_| window_loaded_relay.send(()));
        for (index, card) in cards.iter().enumerate() {
            let card_entered_relay = card_entered_relay.clone();
            dom::listen(card, "mouseenter", move |_| card_entered_relay.send(index));
        }
        dom::listen(&grid, "mouseleave", move |_| grid_left_relay.send(()));

        let view = FollowerView {
            window: window.clone(),
            section,
            follower,
            cards,
            animator,
        };
        let min_viewport_px = config.min_viewport_px;
        let ready_delay_ms = config.ready_delay_ms;

        let task = Task::start_droppable(async move {
            let mut cards_ready = false;
            let mut pending_ready: Option<TaskHandle> = None;
            let check_readiness = |cards_ready: bool, pending_ready: &mut Option<TaskHandle>| {
                if cards_ready || pending_ready.is_some() || !view.section_visible() {
                    return;
                }
                let ready_delay_elapsed_relay = ready_delay_elapsed_relay.clone();
                *pending_ready = Some(Task::start_droppable(async move {
                    Timer::sleep(ready_delay_ms).await;
                    ready_delay_elapsed_relay.send(());
                }));
            };
            check_readiness(cards_ready, &mut pending_ready);

            loop {
                select! {
                    Some(()) = window_scrolled_stream.next() => {
                        check_readiness(cards_ready, &mut pending_ready);
                    }
                    Some(()) = window_loaded_stream.next() => {
                        check_readiness(cards_ready, &mut pending_ready);
                    }
                    Some(()) = ready_delay_elapsed_stream.next() => {
                        cards_ready = true;
                        dom::toggle_class(&view.section, "cards-ready", true);
                        zoon::println!("FOLLOWER: cards ready");
                    }
                    Some(index) = card_entered_stream.next() => {
                        let width = dom::viewport_width(&view.window);
                        if follower_enabled(width, min_viewport_px, cards_ready) {
                            view.follow(index);
                        }
                    }
                    Some(()) = grid_left_stream.next() => {
                        if cards_ready {
                            view.fade_out();
                        }
                    }
                    complete => break,
                }
            }
            drop(pending_ready);
        });

        Ok(Self { _task: task })
    }
}
