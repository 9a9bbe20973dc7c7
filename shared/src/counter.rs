//! Count-up stat figures ("500+", "11%", "4.5").

use crate::easing::Ease;

#[derive(Debug, Clone, PartialEq)]
pub struct CounterTarget {
    pub target: f64,
    pub suffix: String,
    pub is_float: bool,
}

impl CounterTarget {
    /// Leading number (integer or decimal) followed by any suffix.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let number_end = text
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit() && *c != '.')
            .map_or(text.len(), |(index, _)| index);
        let number = &text[..number_end];
        if number.is_empty() || number.starts_with('.') || number.ends_with('.') {
            return None;
        }
        if number.matches('.').count() > 1 {
            return None;
        }
        let target: f64 = number.parse().ok()?;
        Some(Self {
            target,
            suffix: text[number_end..].to_string(),
            is_float: target != target.floor(),
        })
    }

    /// Text shown at linear animation progress `t`.
    pub fn frame_text(&self, t: f64) -> String {
        if t >= 1.0 {
            return self.final_text();
        }
        let value = Ease::CubicOut.apply(t) * self.target;
        if self.is_float {
            format!("{value:.1}{}", self.suffix)
        } else {
            format!("{}{}", value.floor() as i64, self.suffix)
        }
    }

    pub fn final_text(&self) -> String {
        if self.is_float {
            format!("{:.1}{}", self.target, self.suffix)
        } else {
            format!("{}{}", self.target as i64, self.suffix)
        }
    }
}

/// Linear progress of a counter `elapsed_ms` into a `duration_ms` run.
pub fn counter_progress(elapsed_ms: f64, duration_ms: f64) -> f64 {
    if duration_ms <= 0.0 {
        return 1.0;
    }
    (elapsed_ms / duration_ms).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_suffixes() {
        let plus = CounterTarget::parse(" 500+ ").unwrap();
        assert_eq!(plus.target, 500.0);
        assert_eq!(plus.suffix, "+");
        assert!(!plus.is_float);

        let percent = CounterTarget::parse("11%").unwrap();
        assert_eq!(percent.suffix, "%");

        let float = CounterTarget::parse("4.5 Cr").unwrap();
        assert!(float.is_float);
        assert_eq!(float.suffix, " Cr");
    }

    #[test]
    fn rejects_non_numbers() {
        assert!(CounterTarget::parse("N/A").is_none());
        assert!(CounterTarget::parse("").is_none());
        assert!(CounterTarget::parse(".5").is_none());
        assert!(CounterTarget::parse("1.2.3").is_none());
    }

    #[test]
    fn frames_count_up_to_exact_final() {
        let counter = CounterTarget::parse("500+").unwrap();
        assert_eq!(counter.frame_text(0.0), "0+");
        assert_eq!(counter.frame_text(0.5), "437+");
        assert_eq!(counter.frame_text(1.0), "500+");
    }

    #[test]
    fn floats_keep_one_decimal() {
        let counter = CounterTarget::parse("4.5").unwrap();
        assert_eq!(counter.frame_text(0.0), "0.0");
        assert_eq!(counter.final_text(), "4.5");
    }

    #[test]
    fn progress_is_clamped() {
        assert_eq!(counter_progress(500.0, 1000.0), 0.5);
        assert_eq!(counter_progress(5000.0, 1000.0), 1.0);
        assert_eq!(counter_progress(10.0, 0.0), 1.0);
    }
}
