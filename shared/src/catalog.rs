//! Portfolio catalog and category filter.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Toggle value selecting every category.
pub const ALL_CATEGORIES: &str = "all";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CatalogItem {
    pub category: String,
    #[serde(default)]
    pub display_order: i64,
    /// Title, location, year and any other card/modal fields.
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl CatalogItem {
    pub fn field(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Parses a toggle value; `"all"` (any case) or an empty value selects all.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case(ALL_CATEGORIES) {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value.to_string())
        }
    }

    pub fn matches(&self, item: &CatalogItem) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => item.category == *category,
        }
    }

    /// Whether a toggle carrying `value` represents this filter.
    pub fn is_selected_by(&self, value: &str) -> bool {
        *self == CategoryFilter::parse(value)
    }

    pub fn as_value(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_CATEGORIES,
            CategoryFilter::Only(category) => category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_value())
    }
}

/// One render pass started by `apply_filter`.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterPass {
    pub generation: u64,
    pub filter: CategoryFilter,
    /// Indices into the source list, in source order.
    pub visible: Vec<usize>,
}

/// Immutable source list plus the current filter.
#[derive(Debug, Clone)]
pub struct FilterController {
    source: Vec<CatalogItem>,
    active: CategoryFilter,
    visible: Vec<usize>,
    generation: u64,
}

impl FilterController {
    /// The source keeps load order; `display_order` is carried as card data
    /// only and never reorders the grid.
    pub fn new(source: Vec<CatalogItem>) -> Self {
        let visible = (0..source.len()).collect();
        Self {
            source,
            active: CategoryFilter::All,
            visible,
            generation: 0,
        }
    }

    pub fn source(&self) -> &[CatalogItem] {
        &self.source
    }

    pub fn active(&self) -> &CategoryFilter {
        &self.active
    }

    pub fn visible(&self) -> &[usize] {
        &self.visible
    }

    pub fn visible_items(&self) -> impl Iterator<Item = &CatalogItem> {
        self.visible.iter().map(|&index| &self.source[index])
    }

    /// Distinct categories in source order.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for item in &self.source {
            if !categories.contains(&item.category.as_str()) {
                categories.push(&item.category);
            }
        }
        categories
    }

    /// Switches the filter, recomputes the visible subset and starts a new
    /// generation. Any pass with an older generation is superseded.
    pub fn apply_filter(&mut self, filter: CategoryFilter) -> FilterPass {
        self.generation += 1;
        self.visible = self
            .source
            .iter()
            .enumerate()
            .filter(|(_, item)| filter.matches(item))
            .map(|(index, _)| index)
            .collect();
        self.active = filter;
        FilterPass {
            generation: self.generation,
            filter: self.active.clone(),
            visible: self.visible.clone(),
        }
    }

    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(category: &str, order: i64, title: &str) -> CatalogItem {
        CatalogItem {
            category: category.to_string(),
            display_order: order,
            metadata: BTreeMap::from([("title".to_string(), title.to_string())]),
        }
    }

    #[test]
    fn filter_keeps_source_order() {
        let mut controller = FilterController::new(vec![
            item("A", 0, "item0"),
            item("B", 1, "item1"),
            item("A", 2, "item2"),
            item("C", 3, "item3"),
            item("A", 4, "item4"),
        ]);
        let pass = controller.apply_filter(CategoryFilter::parse("A"));
        assert_eq!(pass.visible, vec![0, 2, 4]);
        let titles: Vec<_> = controller
            .visible_items()
            .filter_map(|item| item.field("title"))
            .collect();
        assert_eq!(titles, vec!["item0", "item2", "item4"]);
    }

    #[test]
    fn all_restores_everything() {
        let mut controller = FilterController::new(vec![item("A", 0, "a"), item("B", 1, "b")]);
        controller.apply_filter(CategoryFilter::parse("B"));
        let pass = controller.apply_filter(CategoryFilter::parse("ALL"));
        assert_eq!(pass.filter, CategoryFilter::All);
        assert_eq!(pass.visible, vec![0, 1]);
    }

    #[test]
    fn newer_pass_supersedes_older() {
        let mut controller = FilterController::new(vec![item("A", 0, "a")]);
        let first = controller.apply_filter(CategoryFilter::parse("A"));
        let second = controller.apply_filter(CategoryFilter::All);
        assert!(!controller.is_current(first.generation));
        assert!(controller.is_current(second.generation));
    }

    #[test]
    fn display_order_never_reorders_the_source() {
        let mut controller = FilterController::new(vec![
            item("A", 5, "item0"),
            item("B", 4, "item1"),
            item("A", 1, "item2"),
            item("C", 2, "item3"),
            item("A", 0, "item4"),
        ]);
        let pass = controller.apply_filter(CategoryFilter::parse("A"));
        assert_eq!(pass.visible, vec![0, 2, 4]);
        let titles: Vec<_> = controller
            .visible_items()
            .filter_map(|item| item.field("title"))
            .collect();
        assert_eq!(titles, vec!["item0", "item2", "item4"]);
        assert_eq!(controller.categories(), vec!["A", "B", "C"]);
    }

    #[test]
    fn toggle_selection() {
        let filter = CategoryFilter::parse("Residential");
        assert!(filter.is_selected_by("Residential"));
        assert!(filter.is_selected_by(" Residential "));
        assert!(!filter.is_selected_by("all"));
        assert!(CategoryFilter::All.is_selected_by("All"));
        assert_eq!(filter.to_string(), "Residential");
    }

    #[test]
    fn unknown_category_renders_nothing() {
        let mut controller = FilterController::new(vec![item("A", 0, "a")]);
        assert!(controller.apply_filter(CategoryFilter::parse("Z")).visible.is_empty());
    }

    #[test]
    fn catalog_json() {
        let items: Vec<CatalogItem> = serde_json::from_str(
            r#"[{"category":"Residential","display_order":2,"metadata":{"title":"Lake View","year":"2021"}},
                {"category":"Commercial"}]"#,
        )
        .unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].field("year"), Some("2021"));
        assert_eq!(items[1].display_order, 0);
        assert!(items[1].metadata.is_empty());
    }
}
