//! Filterable portfolio grid and its detail modal.
//!
//! The active category lives in an [`Actor`] fed by every toggle on the page.
//! A render loop follows it: each change kills in-flight tweens, animates
//! the rendered cards out and, once the newest pass's exit completes,
//! renders the matching subset and staggers it in. An exit that finishes
//! after a newer selection was made is ignored by generation.

use crate::dataflow::{Actor, relay};
use crate::dom;
use crate::engine::SharedAnimator;
use crate::guard::FeatureAbsent;
use futures::channel::mpsc::UnboundedReceiver;
use futures::{StreamExt, select};
use shared::config::PortfolioSection;
use shared::{CatalogItem, CategoryFilter, Ease, FilterController, Tween, VisualState};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlImageElement, HtmlSelectElement, KeyboardEvent};
use zoon::{Mutable, SignalExt, Task, TaskHandle};

const GRID_ID: &str = "portfolio-grid";
const MODAL_ID: &str = "portfolio-modal";
const ITEM_CLASS: &str = "portfolio-item";
const TOGGLES: &str = "[data-filter]:not(option)";
const SELECTS: &str = "select[data-filter-select]";

pub struct Portfolio {
    _active_filter: Actor<CategoryFilter>,
    _render_task: TaskHandle,
}

/// Folds selections from every toggle group into the active filter.
async fn run_category_selection(
    state: Mutable<CategoryFilter>,
    mut toggle_clicked_stream: UnboundedReceiver<String>,
    mut select_changed_stream: UnboundedReceiver<String>,
) {
    loop {
        select! {
            Some(value) = toggle_clicked_stream.next() => {
                state.set_neq(CategoryFilter::parse(&value));
            }
            Some(value) = select_changed_stream.next() => {
                state.set_neq(CategoryFilter::parse(&value));
            }
            complete => break,
        }
    }
}

/// `is-active` flag and `aria-pressed` value of a toggle.
fn toggle_state(filter: &CategoryFilter, value: &str) -> (bool, &'static str) {
    if filter.is_selected_by(value) {
        (true, "true")
    } else {
        (false, "false")
    }
}

struct GridView {
    document: Document,
    grid: HtmlElement,
    toggles: Vec<HtmlElement>,
    selects: Vec<HtmlSelectElement>,
    animator: SharedAnimator,
    config: PortfolioSection,
}

impl GridView {
    fn sync_toggles(&self, filter: &CategoryFilter) {
        for toggle in &self.toggles {
            let value = toggle.get_attribute("data-filter").unwrap_or_default();
            let (active, pressed) = toggle_state(filter, &value);
            dom::toggle_class(toggle, "is-active", active);
            dom::set_attribute(toggle, "aria-pressed", pressed);
        }
        for select in &self.selects {
            select.set_value(filter.as_value());
        }
    }

    fn rendered(&self) -> Vec<HtmlElement> {
        dom::select_all_in(&self.grid, &format!(".{ITEM_CLASS}"))
    }

    fn render(&self, controller: &FilterController) {
        self.grid.set_inner_html("");
        let mut cards = Vec::new();
        for &index in controller.visible() {
            let item = &controller.source()[index];
            match build_card(&self.document, index, item) {
                Ok(card) => {
                    let _ = self.grid.append_child(&card);
                    cards.push(card);
                }
                Err(_) => zoon::eprintln!("FILTER: could not build card {index}"),
            }
        }
        let hidden = VisualState::default().opacity(0.0).y(30.0);
        let settled = VisualState::default().opacity(1.0).y(0.0);
        let enter = Tween::new(settled, self.config.enter_duration)
            .stagger(self.config.stagger)
            .ease(Ease::Power3Out);
        self.animator.from_to(&cards, &hidden, &enter, None);
        zoon::println!("FILTER: rendered {} items for '{}'", cards.len(), controller.active());
    }

    fn exit_tween(&self) -> Tween {
        let removed = VisualState::default().opacity(0.0).y(20.0).scale(0.95);
        Tween::new(removed, self.config.exit_duration).ease(Ease::Power2In)
    }
}

impl Portfolio {
    pub fn new(
        document: &Document,
        animator: SharedAnimator,
        catalog: Vec<CatalogItem>,
        config: &PortfolioSection,
    ) -> Result<Self, FeatureAbsent> {
        let grid = dom::by_id(document, GRID_ID)
            .ok_or_else(|| FeatureAbsent::Element(format!("#{GRID_ID}")))?;
        let mut controller = FilterController::new(catalog);
        zoon::println!(
            "FILTER: {} items in categories {:?}",
            controller.source().len(),
            controller.categories()
        );

        let view = GridView {
            document: document.clone(),
            grid: grid.clone(),
            toggles: dom::select_all(document, TOGGLES),
            selects: dom::select_all(document, SELECTS)
                .into_iter()
                .filter_map(|select| select.dyn_into::<HtmlSelectElement>().ok())
                .collect(),
            animator,
            config: config.clone(),
        };

        let (toggle_clicked_relay, toggle_clicked_stream) = relay::<String>();
        let (select_changed_relay, select_changed_stream) = relay::<String>();
        let (exit_finished_relay, mut exit_finished_stream) = relay::<u64>();
        let (card_clicked_relay, mut card_clicked_stream) = relay::<usize>();

        for toggle in &view.toggles {
            let toggle_clicked_relay = toggle_clicked_relay.clone();
            let value = toggle.get_attribute("data-filter").unwrap_or_default();
            dom::listen(toggle, "click", move |event| {
                event.prevent_default();
                toggle_clicked_relay.send(value.clone());
            });
        }
        for select in &view.selects {
            let select_changed_relay = select_changed_relay.clone();
            let source = select.clone();
            dom::listen(select, "change", move |_| select_changed_relay.send(source.value()));
        }
        dom::listen(&grid, "click", move |event| {
            if let Some(index) = clicked_card_index(&event) {
                card_clicked_relay.send(index);
            }
        });

        let active_filter = Actor::new(CategoryFilter::All, move |state| async move {
            run_category_selection(state, toggle_clicked_stream, select_changed_stream).await
        });

        let modal = PortfolioModal::new(document);
        let mut filter_changes = active_filter.signal().to_stream().fuse();

        let render_task = Task::start_droppable(async move {
            loop {
                select! {
                    Some(filter) = filter_changes.next() => {
                        let pass = controller.apply_filter(filter);
                        view.sync_toggles(&pass.filter);
                        let rendered = view.rendered();
                        view.animator.kill(&rendered);
                        if rendered.is_empty() {
                            view.render(&controller);
                            continue;
                        }
                        let exit_finished_relay = exit_finished_relay.clone();
                        let generation = pass.generation;
                        view.animator.to(
                            &rendered,
                            &view.exit_tween(),
                            Some(Box::new(move || exit_finished_relay.send(generation))),
                        );
                    }
                    Some(generation) = exit_finished_stream.next() => {
                        if controller.is_current(generation) {
                            view.render(&controller);
                        }
                    }
                    Some(index) = card_clicked_stream.next() => {
                        let item = controller.source().get(index);
                        if let (Some(modal), Some(item)) = (&modal, item) {
                            modal.open(item);
                        }
                    }
                    complete => break,
                }
            }
        });

        Ok(Self {
            _active_filter: active_filter,
            _render_task: render_task,
        })
    }
}

fn clicked_card_index(event: &web_sys::Event) -> Option<usize> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let card = target.closest(&format!(".{ITEM_CLASS}")).ok()??;
    card.get_attribute("data-index")?.parse().ok()
}

/// Visible text of a card: title, location and the category label.
fn card_text(item: &CatalogItem) -> [(&'static str, String); 3] {
    [
        ("portfolio-category", item.category.clone()),
        ("portfolio-title", item.field("title").unwrap_or_default().to_string()),
        ("portfolio-location", item.field("location").unwrap_or_default().to_string()),
    ]
}

fn build_card(
    document: &Document,
    index: usize,
    item: &CatalogItem,
) -> Result<HtmlElement, wasm_bindgen::JsValue> {
    let card = document.create_element("article")?.dyn_into::<HtmlElement>()?;
    card.set_class_name(ITEM_CLASS);
    card.set_attribute("data-index", &index.to_string())?;
    card.set_attribute("data-category", &item.category)?;
    card.set_attribute("data-order", &item.display_order.to_string())?;
    card.set_tab_index(0);

    if let Some(src) = item.field("image") {
        let image = document.create_element("img")?.dyn_into::<HtmlImageElement>()?;
        image.set_src(src);
        image.set_alt(item.field("title").unwrap_or_default());
        image.set_attribute("loading", "lazy")?;
        card.append_child(&image)?;
    }

    let body = document.create_element("div")?;
    body.set_class_name("portfolio-item-body");
    for (class, text) in card_text(item) {
        if text.is_empty() {
            continue;
        }
        let line = document.create_element(if class == "portfolio-title" { "h3" } else { "span" })?;
        line.set_class_name(class);
        line.set_text_content(Some(&text));
        body.append_child(&line)?;
    }
    card.append_child(&body)?;
    Ok(card)
}

/// Detail overlay filled from the clicked item's metadata.
#[derive(Clone)]
struct PortfolioModal {
    root: HtmlElement,
    body: HtmlElement,
}

impl PortfolioModal {
    fn new(document: &Document) -> Option<Self> {
        let root = dom::by_id(document, MODAL_ID)?;
        let body = document.body()?;
        let modal = Self { root, body };

        for close in dom::select_all_in(&modal.root, "[data-modal-close], .portfolio-modal-close") {
            let modal = modal.clone();
            dom::listen(&close, "click", move |_| modal.close());
        }
        {
            let modal = modal.clone();
            let root = modal.root.clone();
            dom::listen(&root, "click", move |event| {
                // backdrop: a click on the overlay itself, not its content
                let on_backdrop = event.target().is_some_and(|target| {
                    js_sys::Object::is(&target, &modal.root)
                        || target.dyn_ref::<Element>().is_some_and(|element| {
                            dom::has_class(element, "portfolio-modal-backdrop")
                        })
                });
                if on_backdrop {
                    modal.close();
                }
            });
        }
        {
            let modal = modal.clone();
            dom::listen(document, "keydown", move |event| {
                let escape = event
                    .dyn_ref::<KeyboardEvent>()
                    .is_some_and(|key| key.key() == "Escape");
                if escape && modal.is_open() {
                    modal.close();
                }
            });
        }
        Some(modal)
    }

    fn open(&self, item: &CatalogItem) {
        for slot in dom::select_all_in(&self.root, "[data-field]") {
            let key = slot.get_attribute("data-field").unwrap_or_default();
            let value = match key.as_str() {
                "category" => Some(item.category.as_str()),
                key => item.field(key),
            };
            match slot.dyn_ref::<HtmlImageElement>() {
                Some(image) => image.set_src(value.unwrap_or_default()),
                None => slot.set_text_content(value),
            }
        }
        dom::toggle_class(&self.root, "is-open", true);
        dom::set_attribute(&self.root, "aria-hidden", "false");
        dom::toggle_class(&self.body, "modal-open", true);
    }

    fn is_open(&self) -> bool {
        dom::has_class(&self.root, "is-open")
    }

    fn close(&self) {
        dom::toggle_class(&self.root, "is-open", false);
        dom::set_attribute(&self.root, "aria-hidden", "true");
        dom::toggle_class(&self.body, "modal-open", false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataflow::relay;
    use std::collections::BTreeMap;

    #[tokio::test]
    async fn every_toggle_group_feeds_one_filter() {
        let (toggle_clicked_relay, toggle_clicked_stream) = relay::<String>();
        let (select_changed_relay, select_changed_stream) = relay::<String>();
        let state = Mutable::new(CategoryFilter::All);
        let selection = tokio::spawn(run_category_selection(
            state.clone(),
            toggle_clicked_stream,
            select_changed_stream,
        ));

        toggle_clicked_relay.send("Residential".to_string());
        tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;
        assert_eq!(state.get_cloned(), CategoryFilter::Only("Residential".to_string()));

        select_changed_relay.send("all".to_string());
        tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;
        assert_eq!(state.get_cloned(), CategoryFilter::All);

        drop(toggle_clicked_relay);
        drop(select_changed_relay);
        selection.await.unwrap();
    }

    #[test]
    fn toggles_mirror_the_active_category() {
        let filter = CategoryFilter::parse("Residential");
        assert_eq!(toggle_state(&filter, "Residential"), (true, "true"));
        assert_eq!(toggle_state(&filter, "all"), (false, "false"));
        assert_eq!(toggle_state(&CategoryFilter::All, "ALL"), (true, "true"));
    }

    #[test]
    fn card_text_falls_back_to_empty() {
        let item = CatalogItem {
            category: "Land".to_string(),
            display_order: 0,
            metadata: BTreeMap::from([("title".to_string(), "Hillside Plot".to_string())]),
        };
        let [category, title, location] = card_text(&item);
        assert_eq!(category.1, "Land");
        assert_eq!(title, ("portfolio-title", "Hillside Plot".to_string()));
        assert!(location.1.is_empty());
    }
}
