//! Visual property descriptors handed to the tweening engine.
//!
//! A `VisualState` is a sparse set of animatable properties. The frontend
//! either serializes it as engine vars (camelCase keys, unset properties
//! omitted) or flattens it into inline CSS when no engine is loaded.

use crate::easing::Ease;
use serde::Serialize;

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VisualState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clip_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl VisualState {
    pub fn opacity(mut self, value: f64) -> Self {
        self.opacity = Some(value);
        self
    }

    pub fn x(mut self, value: f64) -> Self {
        self.x = Some(value);
        self
    }

    pub fn y(mut self, value: f64) -> Self {
        self.y = Some(value);
        self
    }

    pub fn y_percent(mut self, value: f64) -> Self {
        self.y_percent = Some(value);
        self
    }

    pub fn scale(mut self, value: f64) -> Self {
        self.scale = Some(value);
        self
    }

    pub fn rotation(mut self, value: f64) -> Self {
        self.rotation = Some(value);
        self
    }

    pub fn clip_path(mut self, value: impl Into<String>) -> Self {
        self.clip_path = Some(value.into());
        self
    }

    pub fn filter(mut self, value: impl Into<String>) -> Self {
        self.filter = Some(value.into());
        self
    }

    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Inline CSS declarations equivalent to this state.
    ///
    /// Translation, scale and rotation collapse into a single `transform`.
    pub fn css_declarations(&self) -> Vec<(&'static str, String)> {
        let mut declarations = Vec::new();
        if let Some(opacity) = self.opacity {
            declarations.push(("opacity", format!("{opacity}")));
        }

        let mut transform = Vec::new();
        if self.x.is_some() || self.y.is_some() {
            transform.push(format!(
                "translate({}px, {}px)",
                self.x.unwrap_or(0.0),
                self.y.unwrap_or(0.0)
            ));
        }
        if let Some(y_percent) = self.y_percent {
            transform.push(format!("translateY({y_percent}%)"));
        }
        if let Some(scale) = self.scale {
            transform.push(format!("scale({scale})"));
        }
        if let Some(rotation) = self.rotation {
            transform.push(format!("rotate({rotation}deg)"));
        }
        if !transform.is_empty() {
            declarations.push(("transform", transform.join(" ")));
        }

        if let Some(clip_path) = &self.clip_path {
            declarations.push(("clip-path", clip_path.clone()));
        }
        if let Some(filter) = &self.filter {
            declarations.push(("filter", filter.clone()));
        }
        if let Some(width) = self.width {
            declarations.push(("width", format!("{width}px")));
        }
        if let Some(height) = self.height {
            declarations.push(("height", format!("{height}px")));
        }
        declarations
    }
}

/// One tween: target state plus timing.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    pub to: VisualState,
    pub duration: f64,
    pub delay: f64,
    pub stagger: f64,
    pub ease: Ease,
}

impl Tween {
    pub fn new(to: VisualState, duration: f64) -> Self {
        Self {
            to,
            duration,
            delay: 0.0,
            stagger: 0.0,
            ease: Ease::default(),
        }
    }

    pub fn delay(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }

    pub fn stagger(mut self, stagger: f64) -> Self {
        self.stagger = stagger;
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Total time until the last staggered target settles.
    pub fn total_duration(&self, target_count: usize) -> f64 {
        let staggered = self.stagger * target_count.saturating_sub(1) as f64;
        self.delay + staggered + self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_collapses_into_one_declaration() {
        let state = VisualState::default().opacity(0.0).y(40.0).scale(0.96);
        let css = state.css_declarations();
        assert_eq!(
            css,
            vec![
                ("opacity", "0".to_string()),
                ("transform", "translate(0px, 40px) scale(0.96)".to_string()),
            ]
        );
    }

    #[test]
    fn engine_vars_omit_unset_properties() {
        let state = VisualState::default().y_percent(100.0).clip_path("inset(0 0 0 0)");
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "yPercent": 100.0, "clipPath": "inset(0 0 0 0)" })
        );
    }

    #[test]
    fn total_duration_covers_last_target() {
        let tween = Tween::new(VisualState::default().opacity(1.0), 0.8)
            .delay(0.1)
            .stagger(0.1);
        assert!((tween.total_duration(4) - 1.2).abs() < 1e-9);
        assert!((tween.total_duration(0) - 0.9).abs() < 1e-9);
    }
}
