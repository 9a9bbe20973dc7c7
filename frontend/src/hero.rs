//! Page-load timelines: the hero intro and the blog article entrance.

use crate::dom;
use crate::engine::SharedAnimator;
use shared::Sequence;
use shared::reveal::BLOG_DETAIL;
use shared::timeline::{blog_detail_intro, hero_intro};
use web_sys::Document;

pub fn play_intro(document: &Document, animator: &SharedAnimator) -> usize {
    play_sequence(document, animator, &hero_intro())
}

/// Only the blog article page has this timeline.
pub fn play_blog_detail(document: &Document, animator: &SharedAnimator) -> usize {
    if dom::select(document, BLOG_DETAIL).is_none() {
        return 0;
    }
    play_sequence(document, animator, &blog_detail_intro())
}

/// Plays `sequence` and marks its elements so scroll reveals leave them
/// alone. Returns how many steps found something to animate.
fn play_sequence(document: &Document, animator: &SharedAnimator, sequence: &Sequence) -> usize {
    let targets: Vec<_> = sequence
        .steps
        .iter()
        .map(|step| dom::select_all(document, step.selector))
        .collect();
    let counts: Vec<usize> = targets.iter().map(Vec::len).collect();
    let starts = sequence.start_times(&counts);

    let mut played = 0;
    for ((step, targets), start) in sequence.steps.iter().zip(&targets).zip(starts) {
        if targets.is_empty() {
            continue;
        }
        for target in targets {
            dom::toggle_class(target, "animated", true);
        }
        animator.from_to(targets, &step.from, &step.tween(start), None);
        played += 1;
    }
    zoon::println!(
        "TIMELINE: {} played {played} of {} steps",
        sequence.name,
        sequence.steps.len()
    );
    played
}
