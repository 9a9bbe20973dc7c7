//! Easing curves shared by the scrubbed timelines, counters and the
//! tweening engine bridge.
//!
//! Every curve maps `t in [0, 1]` to eased progress; inputs outside the unit
//! interval are clamped first. `engine_name()` is the name the external
//! tweening engine understands for the same curve.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// Linear, used for "hold" segments.
    None,
    Power2In,
    Power2Out,
    Power3Out,
    Power4Out,
    /// Ease-out cubic (counters, scroll-to-top).
    CubicOut,
    ExpoOut,
    BackOut(f64),
    ElasticOut { amplitude: f64, period: f64 },
    /// Exponential ease-out capped at 1, used by the smooth scroll engine.
    SmoothScroll,
}

impl Default for Ease {
    fn default() -> Self {
        Ease::Power3Out
    }
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Ease::None => t,
            Ease::Power2In => t * t * t,
            Ease::Power2Out => 1.0 - (1.0 - t).powi(3),
            Ease::Power3Out => 1.0 - (1.0 - t).powi(4),
            Ease::Power4Out => 1.0 - (1.0 - t).powi(5),
            Ease::CubicOut => 1.0 - (1.0 - t).powi(3),
            Ease::ExpoOut => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2f64.powf(-10.0 * t)
                }
            }
            Ease::BackOut(overshoot) => {
                let u = t - 1.0;
                u * u * ((overshoot + 1.0) * u + overshoot) + 1.0
            }
            Ease::ElasticOut { amplitude, period } => {
                if t == 0.0 || t == 1.0 {
                    return t;
                }
                let amplitude = amplitude.max(1.0);
                let shift = period / (2.0 * PI) * (1.0 / amplitude).asin();
                amplitude * 2f64.powf(-10.0 * t) * ((t - shift) * (2.0 * PI) / period).sin() + 1.0
            }
            Ease::SmoothScroll => (1.001 - 2f64.powf(-10.0 * t)).min(1.0),
        }
    }

    /// Curve name in the tweening engine's own vocabulary.
    pub fn engine_name(self) -> String {
        match self {
            Ease::None => "none".to_string(),
            Ease::Power2In => "power2.in".to_string(),
            Ease::Power2Out | Ease::CubicOut => "power2.out".to_string(),
            Ease::Power3Out => "power3.out".to_string(),
            Ease::Power4Out => "power4.out".to_string(),
            Ease::ExpoOut | Ease::SmoothScroll => "expo.out".to_string(),
            Ease::BackOut(overshoot) => format!("back.out({overshoot})"),
            Ease::ElasticOut { amplitude, period } => format!("elastic.out({amplitude}, {period})"),
        }
    }
}

/// Linear interpolation between two values.
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Ease; 10] = [
        Ease::None,
        Ease::Power2In,
        Ease::Power2Out,
        Ease::Power3Out,
        Ease::Power4Out,
        Ease::CubicOut,
        Ease::ExpoOut,
        Ease::BackOut(1.7),
        Ease::ElasticOut { amplitude: 1.0, period: 0.6 },
        Ease::SmoothScroll,
    ];

    #[test]
    fn curves_start_at_zero_and_end_at_one() {
        for ease in ALL {
            // the smooth scroll curve starts a hair above zero
            assert!(ease.apply(0.0).abs() < 2e-3, "{ease:?} at 0");
            assert!((ease.apply(1.0) - 1.0).abs() < 1e-9, "{ease:?} at 1");
        }
    }

    #[test]
    fn inputs_are_clamped() {
        assert_eq!(Ease::CubicOut.apply(-3.0), 0.0);
        assert_eq!(Ease::CubicOut.apply(7.0), 1.0);
        assert_eq!(Ease::None.apply(f64::NAN), 0.0);
    }

    #[test]
    fn back_out_overshoots() {
        let peak = (1..100)
            .map(|i| Ease::BackOut(1.7).apply(i as f64 / 100.0))
            .fold(0.0, f64::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn engine_names() {
        assert_eq!(Ease::Power3Out.engine_name(), "power3.out");
        assert_eq!(Ease::BackOut(1.4).engine_name(), "back.out(1.4)");
        assert_eq!(
            Ease::ElasticOut { amplitude: 1.0, period: 0.6 }.engine_name(),
            "elastic.out(1, 0.6)"
        );
    }

    #[test]
    fn cubic_out_matches_counter_curve() {
        let t: f64 = 0.5;
        assert!((Ease::CubicOut.apply(t) - (1.0 - (1.0 - t).powi(3))).abs() < 1e-12);
    }
}
