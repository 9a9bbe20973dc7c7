//! End-to-end behaviour of the derived UI state, one scenario per property
//! the page relies on.

use shared::reveal::has_crossed;
use shared::scroll_progress::track_extent;
use shared::steps::step_index_for;
use shared::*;
use std::collections::BTreeMap;

/// Display orders run backwards so any reordering by them would show up.
fn catalog(categories: &[&str]) -> Vec<CatalogItem> {
    categories
        .iter()
        .enumerate()
        .map(|(index, category)| CatalogItem {
            category: category.to_string(),
            display_order: (categories.len() - index) as i64,
            metadata: BTreeMap::from([("title".to_string(), format!("item{index}"))]),
        })
        .collect()
}

#[test]
fn scroll_drives_exactly_one_step() {
    let extent = track_extent(900.0 + 3000.0, 900.0);
    let mut tracker = ScrollProgressTracker::new(extent);
    let mut steps = StepActivation::new(4).unwrap();

    let mut seen = Vec::new();
    for offset in (-300..=3300).step_by(50) {
        let progress = tracker.update(offset as f64);
        assert!((0.0..=1.0).contains(&progress));
        steps.set_progress(progress);
        assert_eq!(steps.active_count(), 1);
        if seen.last() != Some(&steps.active()) {
            seen.push(steps.active());
        }
    }
    assert_eq!(seen, vec![0, 1, 2, 3]);
    assert_eq!(steps.fill_percent(), 100.0);
}

#[test]
fn repeated_step_is_idempotent() {
    let mut once = StepActivation::new(6).unwrap();
    let mut twice = StepActivation::new(6).unwrap();
    once.set_active_step(2);
    twice.set_active_step(2);
    assert_eq!(twice.set_active_step(2), StepUpdate::Unchanged);
    assert_eq!(once.active(), twice.active());
    assert_eq!(once.fill_percent(), twice.fill_percent());
    assert_eq!(once.steps(), twice.steps());
}

#[test]
fn step_derivation_for_every_count() {
    for step_count in 1..=20 {
        for sample in 0..=200 {
            let progress = sample as f64 / 200.0;
            assert!(step_index_for(progress, step_count) <= step_count - 1);
        }
    }
}

#[test]
fn reveal_baseline_for_element_already_in_view() {
    // element whose top sits at 40% of the viewport when the page loads
    let crossed = has_crossed(400.0, 1000.0, 0.85);
    let mut tracker = RevealTracker::new();
    tracker.register(1, TriggerPolicy::OneShot, crossed);

    // the baseline applied at registration is the post-animation state and
    // no crossing report can ever start a transition from hidden
    let baseline = RevealPreset::FadeUp.settled();
    assert_eq!(baseline.opacity, Some(1.0));
    assert_eq!(tracker.on_crossing(1, true), RevealAction::Hold);
    assert_eq!(tracker.on_crossing(1, false), RevealAction::Hold);
    assert_eq!(tracker.on_crossing(1, true), RevealAction::Hold);
}

#[test]
fn accordion_settles_on_single_open_panel() {
    let mut group = AccordionGroup::new(3);
    group.click(0, 100.0);
    group.transition_complete(0, true);

    group.click(2, 80.0);
    // completions arrive in either order
    group.transition_complete(2, true);
    group.transition_complete(0, false);

    assert_eq!(group.expanded_count(), 1);
    assert_eq!(group.open_panel(), Some(2));
    assert_eq!(group.phase(0), Some(PanelPhase::Closed));
}

#[test]
fn filter_consistency_across_redundant_toggles() {
    let mut controller =
        FilterController::new(catalog(&["Residential", "Commercial", "Residential", "Land"]));
    let pass = controller.apply_filter(CategoryFilter::parse("Residential"));

    // three redundant toggle groups: pill buttons, mobile tabs, a select
    let toggles = ["all", "Residential", "Commercial", "Land"];
    for _group in 0..3 {
        let selected: Vec<&str> = toggles
            .iter()
            .copied()
            .filter(|value| controller.active().is_selected_by(value))
            .collect();
        assert_eq!(selected, vec!["Residential"]);
    }

    let rendered: Vec<&CatalogItem> = pass
        .visible
        .iter()
        .map(|&i| &controller.source()[i])
        .collect();
    assert!(rendered.iter().all(|item| item.category == "Residential"));
    assert_eq!(pass.visible, vec![0, 2]);
}

#[test]
fn filter_end_to_end_five_items() {
    let mut controller = FilterController::new(catalog(&["A", "B", "A", "C", "A"]));
    controller.apply_filter(CategoryFilter::parse("A"));
    let titles: Vec<&str> = controller
        .visible_items()
        .filter_map(|item| item.field("title"))
        .collect();
    assert_eq!(titles, vec!["item0", "item2", "item4"]);
}

#[test]
fn services_cards_follow_the_active_step() {
    let card_count = 3;
    let mut steps = StepActivation::new(card_count).unwrap();
    for sample in [0.1, 0.5, 0.9] {
        steps.set_progress(sample);
        let active_cards: Vec<usize> = (0..card_count)
            .filter(|&card| timeline::card_frame(card, card_count, sample).is_active())
            .collect();
        assert_eq!(active_cards, vec![steps.active()]);
    }
}
