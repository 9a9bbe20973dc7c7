//! Single-open accordion state machine.
//!
//! ```text
//! Closed --click--> Opening --complete--> Open
//! Open   --click--> Closing --complete--> Closed
//! ```
//! Clicking another panel sends any `Open`/`Opening` panel straight to
//! `Closing`, interrupting its transition.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelPhase {
    Closed,
    Opening,
    Open,
    Closing,
}

impl PanelPhase {
    /// Open or heading there; `aria-expanded` mirrors this.
    pub fn is_expanding(self) -> bool {
        matches!(self, PanelPhase::Opening | PanelPhase::Open)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub id: usize,
    pub phase: PanelPhase,
    /// Natural content height measured at the last open click.
    pub content_height: f64,
}

/// Height transition the caller has to start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelCommand {
    Expand { panel: usize, height: f64 },
    Collapse { panel: usize },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClickOutcome {
    pub commands: Vec<PanelCommand>,
    /// Set on the very first open of the group.
    pub first_open: bool,
}

#[derive(Debug, Clone)]
pub struct AccordionGroup {
    panels: Vec<Panel>,
    ever_opened: bool,
}

impl AccordionGroup {
    pub fn new(panel_count: usize) -> Self {
        let panels = (0..panel_count)
            .map(|id| Panel {
                id,
                phase: PanelPhase::Closed,
                content_height: 0.0,
            })
            .collect();
        Self {
            panels,
            ever_opened: false,
        }
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn phase(&self, panel: usize) -> Option<PanelPhase> {
        self.panels.get(panel).map(|panel| panel.phase)
    }

    /// Click on panel `panel`'s header. `measured_height` is the content's
    /// natural height read at click time.
    pub fn click(&mut self, panel: usize, measured_height: f64) -> ClickOutcome {
        let mut outcome = ClickOutcome::default();
        let Some(clicked_phase) = self.phase(panel) else {
            return outcome;
        };

        for other in self.panels.iter_mut().filter(|other| other.id != panel) {
            if other.phase.is_expanding() {
                other.phase = PanelPhase::Closing;
                outcome.commands.push(PanelCommand::Collapse { panel: other.id });
            }
        }

        let clicked = &mut self.panels[panel];
        if clicked_phase.is_expanding() {
            clicked.phase = PanelPhase::Closing;
            outcome.commands.push(PanelCommand::Collapse { panel });
        } else {
            clicked.phase = PanelPhase::Opening;
            clicked.content_height = measured_height.max(0.0);
            outcome.commands.push(PanelCommand::Expand {
                panel,
                height: clicked.content_height,
            });
            outcome.first_open = !self.ever_opened;
            self.ever_opened = true;
        }
        outcome
    }

    /// A height transition finished. Stale completions (the panel was
    /// redirected meanwhile) are ignored.
    pub fn transition_complete(&mut self, panel: usize, expanded: bool) {
        let Some(panel) = self.panels.get_mut(panel) else {
            return;
        };
        panel.phase = match (panel.phase, expanded) {
            (PanelPhase::Opening, true) => PanelPhase::Open,
            (PanelPhase::Closing, false) => PanelPhase::Closed,
            (phase, _) => phase,
        };
    }

    pub fn expanded_count(&self) -> usize {
        self.panels
            .iter()
            .filter(|panel| panel.phase.is_expanding())
            .count()
    }

    pub fn open_panel(&self) -> Option<usize> {
        self.panels
            .iter()
            .find(|panel| panel.phase == PanelPhase::Open)
            .map(|panel| panel.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_then_close_one_panel() {
        let mut group = AccordionGroup::new(3);
        let outcome = group.click(1, 120.0);
        assert_eq!(outcome.commands, vec![PanelCommand::Expand { panel: 1, height: 120.0 }]);
        assert!(outcome.first_open);
        assert_eq!(group.phase(1), Some(PanelPhase::Opening));

        group.transition_complete(1, true);
        assert_eq!(group.open_panel(), Some(1));

        let outcome = group.click(1, 120.0);
        assert_eq!(outcome.commands, vec![PanelCommand::Collapse { panel: 1 }]);
        assert!(!outcome.first_open);
        group.transition_complete(1, false);
        assert_eq!(group.phase(1), Some(PanelPhase::Closed));
    }

    #[test]
    fn opening_b_closes_a() {
        let mut group = AccordionGroup::new(2);
        group.click(0, 80.0);
        group.transition_complete(0, true);

        let outcome = group.click(1, 200.0);
        assert_eq!(
            outcome.commands,
            vec![
                PanelCommand::Collapse { panel: 0 },
                PanelCommand::Expand { panel: 1, height: 200.0 },
            ]
        );
        group.transition_complete(0, false);
        group.transition_complete(1, true);
        assert_eq!(group.expanded_count(), 1);
        assert_eq!(group.open_panel(), Some(1));
    }

    #[test]
    fn interrupting_an_opening_panel() {
        let mut group = AccordionGroup::new(2);
        group.click(0, 80.0);
        // A never finishes opening before B is clicked
        group.click(1, 50.0);
        assert_eq!(group.phase(0), Some(PanelPhase::Closing));

        // A's stale "opened" completion must not resurrect it
        group.transition_complete(0, true);
        assert_eq!(group.phase(0), Some(PanelPhase::Closing));

        group.transition_complete(1, true);
        group.transition_complete(0, false);
        assert_eq!(group.expanded_count(), 1);
        assert_eq!(group.open_panel(), Some(1));
    }

    #[test]
    fn height_is_measured_per_click() {
        let mut group = AccordionGroup::new(1);
        group.click(0, 100.0);
        group.transition_complete(0, true);
        group.click(0, 0.0);
        group.transition_complete(0, false);
        let outcome = group.click(0, 340.0);
        assert_eq!(outcome.commands, vec![PanelCommand::Expand { panel: 0, height: 340.0 }]);
        assert_eq!(group.panels()[0].content_height, 340.0);
    }

    #[test]
    fn reopening_a_closing_panel() {
        let mut group = AccordionGroup::new(1);
        group.click(0, 60.0);
        group.transition_complete(0, true);
        group.click(0, 60.0);
        let outcome = group.click(0, 60.0);
        assert_eq!(group.phase(0), Some(PanelPhase::Opening));
        assert!(!outcome.first_open);
    }

    #[test]
    fn out_of_range_click_is_ignored() {
        let mut group = AccordionGroup::new(2);
        assert_eq!(group.click(5, 10.0), ClickOutcome::default());
        assert_eq!(group.expanded_count(), 0);
    }
}
