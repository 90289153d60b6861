//! Step status derivation shared by the phase and section pipelines.
//!
//! Statuses are never stored. They are recomputed from "done" flags each time
//! a view is drawn, so these functions stay free of UI state.

use serde::{Deserialize, Serialize};

/// Derived status of a pipeline step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Completed,
    Current,
    Upcoming,
}

impl StepStatus {
    /// Indicator glyph for lists
    pub fn indicator(&self) -> &'static str {
        match self {
            Self::Completed => "●",
            Self::Current => "◐",
            Self::Upcoming => "○",
        }
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Current => "current",
            Self::Upcoming => "upcoming",
        }
    }
}

impl std::fmt::Display for StepStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Index of the first step that is not done
pub fn current_index(done: &[bool]) -> Option<usize> {
    done.iter().position(|d| !d)
}

/// Compute one status per step: the first not-done step is current,
/// done steps are completed, everything else is upcoming.
pub fn resolve_statuses(done: &[bool]) -> Vec<StepStatus> {
    let first_incomplete = current_index(done);

    done.iter()
        .enumerate()
        .map(|(i, &is_done)| {
            if is_done {
                StepStatus::Completed
            } else if Some(i) == first_incomplete {
                StepStatus::Current
            } else {
                StepStatus::Upcoming
            }
        })
        .collect()
}

/// Whether every required step is done. Indices past the end count as not done.
pub fn all_required_complete(done: &[bool], required: &[usize]) -> bool {
    required
        .iter()
        .all(|&i| done.get(i).copied().unwrap_or(false))
}
