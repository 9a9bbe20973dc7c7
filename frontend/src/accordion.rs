//! FAQ accordion: one answer open at a time, heights animated by CSS.

use crate::dataflow::relay;
use crate::dom;
use crate::guard::FeatureAbsent;
use futures::{StreamExt, select};
use shared::config::FaqSection;
use shared::{AccordionGroup, PanelCommand};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};
use zoon::{Task, TaskHandle, Timer};

const QUESTION: &str = ".faq-question";
const CTA: &str = ".faq-cta";

pub struct FaqAccordion {
    _task: TaskHandle,
}

/// DOM writes for one panel command: which panel, its `aria-expanded`
/// value and the answer height.
fn panel_style(command: PanelCommand) -> (usize, &'static str, String) {
    match command {
        PanelCommand::Expand { panel, height } => (panel, "true", dom::px(height)),
        PanelCommand::Collapse { panel } => (panel, "false", "0px".to_string()),
    }
}

/// No `transitionend` fires when the height does not change or there is no
/// transition, so such panels settle at once.
fn settles_immediately(current_height: &str, next_height: &str, transition_ms: u32) -> bool {
    transition_ms == 0 || current_height == next_height
}

impl FaqAccordion {
    pub fn new(document: &Document, config: &FaqSection) -> Result<Self, FeatureAbsent> {
        let questions = dom::required_all(document, QUESTION)?;
        let answers: Vec<Option<HtmlElement>> = questions
            .iter()
            .map(|question| {
                question
                    .next_element_sibling()
                    .and_then(|answer| answer.dyn_into::<HtmlElement>().ok())
            })
            .collect();

        let transition = format!("height {}ms ease", config.transition_ms);
        for answer in answers.iter().flatten() {
            dom::set_style(answer, "height", "0px");
            dom::set_style(answer, "overflow", "hidden");
            dom::set_style(answer, "transition", &transition);
        }
        for question in &questions {
            dom::set_attribute(question, "aria-expanded", "false");
        }

        let cta = dom::select(document, CTA);
        if let Some(cta) = &cta {
            dom::set_style(cta, "opacity", "0");
            dom::set_style(cta, "display", "none");
        }

        let (question_clicked_relay, mut question_clicked_stream) = relay::<usize>();
        let (answer_transitioned_relay, mut answer_transitioned_stream) = relay::<(usize, bool)>();

        for (index, question) in questions.iter().enumerate() {
            let question_clicked_relay = question_clicked_relay.clone();
            dom::listen(question, "click", move |_| question_clicked_relay.send(index));
        }
        for (index, answer) in answers.iter().enumerate() {
            let Some(answer) = answer.clone() else {
                continue;
            };
            let answer_transitioned_relay = answer_transitioned_relay.clone();
            let target = answer.clone();
            dom::listen(&target, "transitionend", move |event| {
                // nested content transitions bubble up; only the answer's own counts
                let own = event
                    .target()
                    .is_some_and(|target| js_sys::Object::is(&target, &answer));
                if !own {
                    return;
                }
                let height = answer.style().get_property_value("height").unwrap_or_default();
                answer_transitioned_relay.send((index, height != "0px"));
            });
        }

        let cta_delay_ms = config.cta_delay_ms;
        let transition_ms = config.transition_ms;
        let mut group = AccordionGroup::new(questions.len());
        zoon::println!("FAQ: {} panels", questions.len());

        let task = Task::start_droppable(async move {
            loop {
                select! {
                    Some(index) = question_clicked_stream.next() => {
                        let measured = answers
                            .get(index)
                            .and_then(Option::as_ref)
                            .map_or(0.0, |answer| answer.scroll_height() as f64);
                        let outcome = group.click(index, measured);
                        for command in outcome.commands {
                            let (panel, expanded, height) = panel_style(command);
                            if let Some(question) = questions.get(panel) {
                                dom::set_attribute(question, "aria-expanded", expanded);
                            }
                            let settled = match answers.get(panel) {
                                Some(Some(answer)) => {
                                    let current = answer
                                        .style()
                                        .get_property_value("height")
                                        .unwrap_or_default();
                                    dom::set_style(answer, "height", &height);
                                    settles_immediately(&current, &height, transition_ms)
                                }
                                _ => true,
                            };
                            if settled {
                                group.transition_complete(panel, expanded == "true");
                            }
                        }
                        if outcome.first_open {
                            if let Some(cta) = cta.clone() {
                                Task::start(async move {
                                    Timer::sleep(cta_delay_ms).await;
                                    dom::set_style(&cta, "display", "block");
                                    dom::set_style(&cta, "opacity", "1");
                                });
                            }
                        }
                    }
                    Some((index, expanded)) = answer_transitioned_stream.next() => {
                        group.transition_complete(index, expanded);
                    }
                    complete => break,
                }
            }
        });

        Ok(Self { _task: task })
    }
}
