//! Step indicator driven by a continuous scroll fraction.

/// One marker of the step indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub index: usize,
    pub is_active: bool,
}

/// Result of `set_active_step`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepUpdate {
    /// The active step moved; the DOM must be re-toggled.
    Changed { active: usize, fill_percent: f64 },
    /// Same index as before; nothing visible to do.
    Unchanged,
}

/// Discrete step index for a scroll fraction: `floor(progress * count)`,
/// clamped so `progress == 1.0` lands on the last step.
pub fn step_index_for(progress: f64, step_count: usize) -> usize {
    if step_count == 0 {
        return 0;
    }
    let progress = if progress.is_nan() { 0.0 } else { progress.clamp(0.0, 1.0) };
    let index = (progress * step_count as f64).floor() as usize;
    index.min(step_count - 1)
}

/// Proportional fill of the indicator, in percent.
pub fn fill_percent(active: usize, step_count: usize) -> f64 {
    if step_count == 0 {
        return 0.0;
    }
    (active.min(step_count - 1) + 1) as f64 / step_count as f64 * 100.0
}

/// Exactly one of `steps` is active at any time.
#[derive(Debug, Clone)]
pub struct StepActivation {
    steps: Vec<Step>,
    active: usize,
    applied: bool,
}

impl StepActivation {
    /// `None` for an empty step sequence: there is nothing to drive.
    pub fn new(step_count: usize) -> Option<Self> {
        if step_count == 0 {
            return None;
        }
        let steps = (0..step_count)
            .map(|index| Step {
                index,
                is_active: index == 0,
            })
            .collect();
        Some(Self {
            steps,
            active: 0,
            applied: false,
        })
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn fill_percent(&self) -> f64 {
        fill_percent(self.active, self.steps.len())
    }

    /// Clamps `index`, activates that step and deactivates all others.
    ///
    /// The first call always reports `Changed` so the initial state reaches
    /// the DOM; afterwards repeating the current index is `Unchanged`.
    pub fn set_active_step(&mut self, index: usize) -> StepUpdate {
        let index = index.min(self.steps.len() - 1);
        if self.applied && index == self.active {
            return StepUpdate::Unchanged;
        }
        for step in &mut self.steps {
            step.is_active = step.index == index;
        }
        self.active = index;
        self.applied = true;
        StepUpdate::Changed {
            active: index,
            fill_percent: self.fill_percent(),
        }
    }

    pub fn set_progress(&mut self, progress: f64) -> StepUpdate {
        self.set_active_step(step_index_for(progress, self.steps.len()))
    }

    pub fn active_count(&self) -> usize {
        self.steps.iter().filter(|step| step.is_active).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_index_stays_in_range() {
        for step_count in 1..=12 {
            for tenth in 0..=1000 {
                let progress = tenth as f64 / 1000.0;
                let index = step_index_for(progress, step_count);
                assert!(index < step_count, "{progress} / {step_count}");
            }
            assert_eq!(step_index_for(1.0, step_count), step_count - 1);
            assert_eq!(step_index_for(0.0, step_count), 0);
        }
    }

    #[test]
    fn exactly_one_active_after_any_progress() {
        let mut steps = StepActivation::new(5).unwrap();
        for hundredth in (0..=100).rev() {
            steps.set_progress(hundredth as f64 / 100.0);
            assert_eq!(steps.active_count(), 1);
            assert!(steps.steps()[steps.active()].is_active);
        }
    }

    #[test]
    fn out_of_range_index_is_clamped() {
        let mut steps = StepActivation::new(4).unwrap();
        assert_eq!(
            steps.set_active_step(99),
            StepUpdate::Changed { active: 3, fill_percent: 100.0 }
        );
    }

    #[test]
    fn repeating_an_index_is_a_no_op() {
        let mut steps = StepActivation::new(4).unwrap();
        assert_eq!(
            steps.set_active_step(1),
            StepUpdate::Changed { active: 1, fill_percent: 50.0 }
        );
        let fill = steps.fill_percent();
        assert_eq!(steps.set_active_step(1), StepUpdate::Unchanged);
        assert_eq!(steps.active(), 1);
        assert_eq!(steps.fill_percent(), fill);
        assert_eq!(steps.active_count(), 1);
    }

    #[test]
    fn initial_application_reports_change() {
        let mut steps = StepActivation::new(3).unwrap();
        assert!(matches!(steps.set_active_step(0), StepUpdate::Changed { active: 0, .. }));
        assert_eq!(steps.set_active_step(0), StepUpdate::Unchanged);
    }

    #[test]
    fn empty_sequence_has_no_controller() {
        assert!(StepActivation::new(0).is_none());
        assert_eq!(step_index_for(0.7, 0), 0);
        assert_eq!(fill_percent(0, 0), 0.0);
    }
}
