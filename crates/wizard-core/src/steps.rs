//! Wizard steps.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The four wizard steps, in order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WizardStep {
    #[default]
    Upload,
    SelectHeader,
    MatchColumns,
    Validate,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::Upload,
        WizardStep::SelectHeader,
        WizardStep::MatchColumns,
        WizardStep::Validate,
    ];

    /// 1-based step number.
    pub fn number(self) -> u8 {
        match self {
            WizardStep::Upload => 1,
            WizardStep::SelectHeader => 2,
            WizardStep::MatchColumns => 3,
            WizardStep::Validate => 4,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|step| step.number() == number)
    }

    pub fn label(self) -> &'static str {
        match self {
            WizardStep::Upload => "Upload file",
            WizardStep::SelectHeader => "Select header row",
            WizardStep::MatchColumns => "Match Columns",
            WizardStep::Validate => "Validate data",
        }
    }

    /// The following step; the last step stays put.
    pub fn next(self) -> Self {
        Self::from_number(self.number() + 1).unwrap_or(self)
    }

    /// The preceding step; the first step stays put.
    pub fn previous(self) -> Self {
        Self::from_number(self.number().saturating_sub(1)).unwrap_or(self)
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Display state of one step, derived from the current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepView {
    pub step: WizardStep,
    pub number: u8,
    pub label: &'static str,
    pub is_active: bool,
    pub is_completed: bool,
}

pub fn step_views(current: WizardStep) -> Vec<StepView> {
    WizardStep::ALL
        .into_iter()
        .map(|step| StepView {
            step,
            number: step.number(),
            label: step.label(),
            is_active: step == current,
            is_completed: step < current,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_clamps() {
        assert_eq!(WizardStep::Upload.previous(), WizardStep::Upload);
        assert_eq!(WizardStep::Upload.next(), WizardStep::SelectHeader);
        assert_eq!(WizardStep::Validate.next(), WizardStep::Validate);
        assert_eq!(WizardStep::Validate.previous(), WizardStep::MatchColumns);
    }

    #[test]
    fn test_step_views() {
        let views = step_views(WizardStep::MatchColumns);
        let flags: Vec<(u8, bool, bool)> = views
            .iter()
            .map(|view| (view.number, view.is_active, view.is_completed))
            .collect();
        assert_eq!(
            flags,
            vec![(1, false, true), (2, false, true), (3, true, false), (4, false, false)]
        );
    }
}
