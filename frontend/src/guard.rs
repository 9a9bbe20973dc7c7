//! Why a feature did not start on this page.
//!
//! Every page ships the same bundle, so most features find nothing to bind
//! to on most pages. Each absence is a single console warning at startup; a
//! missing animation engine or unreadable page data is worded as a fault
//! rather than a skip. Neither ever stops the other features from starting.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum FeatureAbsent {
    /// A third-party script the feature drives is not loaded.
    Engine(&'static str),
    /// The page has no element matching the selector.
    Element(String),
    /// A container exists but holds nothing to animate.
    EmptyGroup(String),
    /// Embedded page data could not be read.
    InvalidData(String),
}

impl fmt::Display for FeatureAbsent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureAbsent::Engine(name) => write!(f, "{name} is not loaded"),
            FeatureAbsent::Element(selector) => write!(f, "no element matches '{selector}'"),
            FeatureAbsent::EmptyGroup(selector) => write!(f, "'{selector}' has no items"),
            FeatureAbsent::InvalidData(message) => write!(f, "invalid page data: {message}"),
        }
    }
}

impl std::error::Error for FeatureAbsent {}

impl FeatureAbsent {
    /// Problems with the page setup, as opposed to a page that simply
    /// lacks the feature.
    pub fn is_fault(&self) -> bool {
        matches!(self, FeatureAbsent::Engine(_) | FeatureAbsent::InvalidData(_))
    }

    pub fn warning(&self, feature: &str) -> String {
        if self.is_fault() {
            format!("{feature}: {self}")
        } else {
            format!("{feature}: skipped, {self}")
        }
    }

    pub fn report(&self, feature: &str) {
        web_sys::console::warn_1(&self.warning(feature).into());
    }
}

/// Unwraps a feature's setup result, reporting why it was skipped.
pub fn optional<T>(feature: &str, result: Result<T, FeatureAbsent>) -> Option<T> {
    result.map_err(|absent| absent.report(feature)).ok()
}
