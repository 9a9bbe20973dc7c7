//! Page-embedded configuration and data.
//!
//! ```html
//! <script type="application/toml" id="site-config">
//! [reveal]
//! policy = "reversible"
//! </script>
//! <script type="application/json" id="portfolio-data">[...]</script>
//! ```

use crate::guard::FeatureAbsent;
use shared::{CatalogItem, SiteConfig};
use web_sys::Document;

const SITE_CONFIG_ID: &str = "site-config";
const CATALOG_ID: &str = "portfolio-data";

/// Reads the page's config block; a missing or broken block means defaults.
pub fn load_site_config(document: &Document) -> SiteConfig {
    let Some(block) = document.get_element_by_id(SITE_CONFIG_ID) else {
        return SiteConfig::default();
    };
    let source = block.text_content().unwrap_or_default();
    match SiteConfig::from_toml(&source) {
        Ok(config) => {
            zoon::println!("CONFIG: loaded #{SITE_CONFIG_ID}");
            config
        }
        Err(error) => {
            zoon::eprintln!("CONFIG: {error}, falling back to defaults");
            SiteConfig::default()
        }
    }
}

pub fn load_catalog(document: &Document) -> Result<Vec<CatalogItem>, FeatureAbsent> {
    let block = document
        .get_element_by_id(CATALOG_ID)
        .ok_or_else(|| FeatureAbsent::Element(format!("#{CATALOG_ID}")))?;
    parse_catalog(&block.text_content().unwrap_or_default())
}

pub fn parse_catalog(source: &str) -> Result<Vec<CatalogItem>, FeatureAbsent> {
    serde_json::from_str(source).map_err(|error| FeatureAbsent::InvalidData(error.to_string()))
}
