//! Site configuration.
//!
//! Pages may embed a TOML block to override any value; every section and
//! field falls back to the defaults below, so an empty document is valid.

use crate::reveal::{DEFAULT_THRESHOLD, TriggerPolicy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct SiteConfig {
    pub reveal: RevealSection,
    pub services: ServicesSection,
    pub smooth_scroll: SmoothScrollSection,
    pub counter: CounterSection,
    pub scroll_top: ScrollTopSection,
    pub menu: MenuSection,
    pub faq: FaqSection,
    pub follower: FollowerSection,
    pub portfolio: PortfolioSection,
    pub carousel: CarouselSection,
}

impl SiteConfig {
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        let config: SiteConfig =
            toml::from_str(source).map_err(|error| ConfigError::Parse(error.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let threshold = self.reveal.threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ConfigError::OutOfRange {
                field: "reveal.threshold",
                value: threshold,
            });
        }
        if self.services.pin_extent_px < 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "services.pin_extent_px",
                value: self.services.pin_extent_px,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Parse(String),
    OutOfRange { field: &'static str, value: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(message) => write!(f, "invalid site config: {message}"),
            ConfigError::OutOfRange { field, value } => {
                write!(f, "site config value {field} = {value} is out of range")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RevealSection {
    /// Viewport fraction the element top has to cross.
    pub threshold: f64,
    pub policy: TriggerPolicy,
}

impl Default for RevealSection {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            policy: TriggerPolicy::OneShot,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ServicesSection {
    /// Scroll distance the section stays pinned for.
    pub pin_extent_px: f64,
    pub section: String,
    pub card: String,
    pub step: String,
    pub progress_fill_id: String,
}

impl Default for ServicesSection {
    fn default() -> Self {
        Self {
            pin_extent_px: 3000.0,
            section: ".services-section".to_string(),
            card: ".service-card-scroll".to_string(),
            step: ".step-item".to_string(),
            progress_fill_id: "progressFill".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SmoothScrollSection {
    pub breakpoint_px: f64,
    pub duration: f64,
    pub resize_debounce_ms: u32,
    pub touch_multiplier: f64,
}

impl Default for SmoothScrollSection {
    fn default() -> Self {
        Self {
            breakpoint_px: 1024.0,
            duration: 1.2,
            resize_debounce_ms: 200,
            touch_multiplier: 2.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CounterSection {
    pub duration_ms: f64,
    /// Visible fraction of the element that starts the count.
    pub visibility_threshold: f64,
}

impl Default for CounterSection {
    fn default() -> Self {
        Self {
            duration_ms: 1000.0,
            visibility_threshold: 0.4,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ScrollTopSection {
    pub show_after_px: f64,
    pub ring_radius: f64,
    pub scroll_duration: f64,
}

impl Default for ScrollTopSection {
    fn default() -> Self {
        Self {
            show_after_px: 300.0,
            ring_radius: 22.0,
            scroll_duration: 1.5,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct MenuSection {
    pub close_delay_ms: u32,
    pub link_stagger: f64,
    pub link_delay: f64,
    pub link_duration: f64,
}

impl Default for MenuSection {
    fn default() -> Self {
        Self {
            close_delay_ms: 500,
            link_stagger: 0.05,
            link_delay: 0.3,
            link_duration: 0.4,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct FaqSection {
    pub cta_delay_ms: u32,
    /// Matches the stylesheet's height transition.
    pub transition_ms: u32,
}

impl Default for FaqSection {
    fn default() -> Self {
        Self {
            cta_delay_ms: 300,
            transition_ms: 400,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct FollowerSection {
    pub min_viewport_px: f64,
    pub ready_delay_ms: u32,
}

impl Default for FollowerSection {
    fn default() -> Self {
        Self {
            min_viewport_px: 1200.0,
            ready_delay_ms: 300,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PortfolioSection {
    pub exit_duration: f64,
    pub enter_duration: f64,
    pub stagger: f64,
}

impl Default for PortfolioSection {
    fn default() -> Self {
        Self {
            exit_duration: 0.3,
            enter_duration: 0.5,
            stagger: 0.08,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CarouselSection {
    pub selector: String,
    pub slides_per_view: u32,
    pub space_between: u32,
    #[serde(rename = "loop")]
    pub looped: bool,
    /// Minimum viewport width → slides per view. Keys are strings so the
    /// table survives TOML.
    pub breakpoints: BTreeMap<String, u32>,
}

impl Default for CarouselSection {
    fn default() -> Self {
        Self {
            selector: ".services-swiper".to_string(),
            slides_per_view: 1,
            space_between: 24,
            looped: true,
            breakpoints: BTreeMap::from([("768".to_string(), 2), ("1024".to_string(), 3)]),
        }
    }
}

impl CarouselSection {
    /// Numeric breakpoints, ascending; unparsable keys are skipped.
    pub fn sorted_breakpoints(&self) -> Vec<(u32, u32)> {
        let mut breakpoints: Vec<(u32, u32)> = self
            .breakpoints
            .iter()
            .filter_map(|(width, slides)| Some((width.trim().parse().ok()?, *slides)))
            .collect();
        breakpoints.sort_unstable();
        breakpoints
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_all_defaults() {
        assert_eq!(SiteConfig::from_toml("").unwrap(), SiteConfig::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = SiteConfig::from_toml(
            r#"
            [reveal]
            policy = "reversible"

            [services]
            pin_extent_px = 2400.0
            "#,
        )
        .unwrap();
        assert_eq!(config.reveal.policy, TriggerPolicy::Reversible);
        assert_eq!(config.reveal.threshold, DEFAULT_THRESHOLD);
        assert_eq!(config.services.pin_extent_px, 2400.0);
        assert_eq!(config.services.card, ".service-card-scroll");
        assert_eq!(config.menu, MenuSection::default());
    }

    #[test]
    fn rejects_bad_threshold() {
        let error = SiteConfig::from_toml("[reveal]\nthreshold = 1.5").unwrap_err();
        assert!(matches!(error, ConfigError::OutOfRange { field: "reveal.threshold", .. }));
        assert!(error.to_string().contains("reveal.threshold"));
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(matches!(
            SiteConfig::from_toml("[reveal\nthreshold = "),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn carousel_breakpoints() {
        let mut carousel = CarouselSection::default();
        assert_eq!(carousel.sorted_breakpoints(), vec![(768, 2), (1024, 3)]);
        carousel.breakpoints.insert("wide".to_string(), 4);
        carousel.breakpoints.insert(" 480 ".to_string(), 1);
        assert_eq!(carousel.sorted_breakpoints(), vec![(480, 1), (768, 2), (1024, 3)]);
    }

    #[test]
    fn carousel_loop_key() {
        let config = SiteConfig::from_toml("[carousel]\nloop = false").unwrap();
        assert!(!config.carousel.looped);
    }
}
