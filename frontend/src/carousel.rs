//! Services carousel (Swiper).

use crate::dom;
use crate::guard::FeatureAbsent;
use serde::Serialize;
use shared::config::CarouselSection;
use std::collections::BTreeMap;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::wasm_bindgen;
use web_sys::Document;

#[derive(Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
struct SwiperOptions {
    slides_per_view: u32,
    space_between: u32,
    #[serde(rename = "loop")]
    looped: bool,
    grab_cursor: bool,
    navigation: Navigation,
    pagination: Pagination,
    keyboard: Keyboard,
    breakpoints: BTreeMap<String, Breakpoint>,
}

#[derive(Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
struct Navigation {
    next_el: &'static str,
    prev_el: &'static str,
}

#[derive(Serialize, Debug, PartialEq)]
struct Pagination {
    el: &'static str,
    clickable: bool,
}

#[derive(Serialize, Debug, PartialEq)]
struct Keyboard {
    enabled: bool,
}

#[derive(Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
struct Breakpoint {
    slides_per_view: u32,
}

impl SwiperOptions {
    fn from_config(config: &CarouselSection) -> Self {
        Self {
            slides_per_view: config.slides_per_view,
            space_between: config.space_between,
            looped: config.looped,
            grab_cursor: true,
            navigation: Navigation {
                next_el: ".services-next",
                prev_el: ".services-prev",
            },
            pagination: Pagination {
                el: ".swiper-pagination",
                clickable: true,
            },
            keyboard: Keyboard { enabled: true },
            breakpoints: config
                .sorted_breakpoints()
                .into_iter()
                .map(|(width, slides_per_view)| (width.to_string(), Breakpoint { slides_per_view }))
                .collect(),
        }
    }
}

pub fn start_carousel(document: &Document, config: &CarouselSection) -> Result<(), FeatureAbsent> {
    dom::required(document, &config.selector)?;
    if !swiper_available() {
        return Err(FeatureAbsent::Engine("Swiper"));
    }
    let options = SwiperOptions::from_config(config);
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    let options = options
        .serialize(&serializer)
        .map_err(|error| FeatureAbsent::InvalidData(error.to_string()))?;
    swiper_create(&config.selector, &options);
    zoon::println!(
        "CAROUSEL: {} with {} breakpoints",
        config.selector,
        config.breakpoints.len()
    );
    Ok(())
}

#[wasm_bindgen(inline_js = r#"
export function swiper_available() {
  return typeof window !== 'undefined' && typeof window.Swiper !== 'undefined';
}
export function swiper_create(selector, options) {
  return new window.Swiper(selector, options);
}
"#)]
extern "C" {
    fn swiper_available() -> bool;
    fn swiper_create(selector: &str, options: &JsValue) -> JsValue;
}
