// ===== DERIVED UI STATE =====
//
// Everything here is DOM-free so it runs (and is tested) on the host. The
// frontend crate binds these models to the page.

pub mod accordion;
pub mod catalog;
pub mod config;
pub mod counter;
pub mod easing;
pub mod page;
pub mod reveal;
pub mod scroll_progress;
pub mod steps;
pub mod timeline;
pub mod visual;

pub use accordion::{AccordionGroup, ClickOutcome, Panel, PanelCommand, PanelPhase};
pub use catalog::{ALL_CATEGORIES, CatalogItem, CategoryFilter, FilterController, FilterPass};
pub use config::{ConfigError, SiteConfig};
pub use counter::CounterTarget;
pub use easing::Ease;
pub use reveal::{
    RevealAction, RevealBinding, RevealOptions, RevealPreset, RevealSpec, RevealTracker,
    TriggerPolicy,
};
pub use scroll_progress::ScrollProgressTracker;
pub use steps::{Step, StepActivation, StepUpdate};
pub use timeline::{CardFrame, CardPhase, Sequence, SequenceStep};
pub use visual::{Tween, VisualState};
