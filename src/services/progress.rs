//! Pipeline progress derived from artifact presence.

use crate::domain::{
    all_required_complete, current_index, resolve_statuses, PhaseStep, ScreenDesignRef,
    ScreenshotRef, SectionInfo, SectionStep, StepStatus,
};
use crate::services::ArtifactProbe;
use std::sync::Arc;

/// A global phase with its derived status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseProgress {
    pub step: PhaseStep,
    pub status: StepStatus,
}

/// Statuses of the five global phases
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineProgress {
    pub phases: Vec<PhaseProgress>,
    pub current: Option<PhaseStep>,
}

impl PipelineProgress {
    pub fn status_of(&self, step: PhaseStep) -> StepStatus {
        self.phases[step.index()].status
    }

    /// Whether the pipeline has been walked to the end
    pub fn is_complete(&self) -> bool {
        self.current.is_none()
    }
}

/// A section step with its derived status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionStepProgress {
    pub step: SectionStep,
    pub status: StepStatus,
}

/// Everything the section detail page shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionProgress {
    pub section: SectionInfo,
    pub steps: Vec<SectionStepProgress>,
    pub screen_designs: Vec<ScreenDesignRef>,
    pub screenshots: Vec<ScreenshotRef>,
    /// All required steps are done; the user may move on
    pub ready: bool,
}

impl SectionProgress {
    /// Summary status for section lists
    pub fn overall_status(&self) -> StepStatus {
        if self.ready {
            StepStatus::Completed
        } else if self
            .steps
            .iter()
            .any(|s| s.status == StepStatus::Completed)
        {
            StepStatus::Current
        } else {
            StepStatus::Upcoming
        }
    }

    /// The step the user should work on next
    pub fn current_step(&self) -> Option<SectionStep> {
        self.steps
            .iter()
            .find(|s| s.status == StepStatus::Current)
            .map(|s| s.step)
    }
}

/// Combines the artifact probe with the status resolver
#[derive(Debug, Clone)]
pub struct ProgressService {
    probe: Arc<ArtifactProbe>,
}

impl ProgressService {
    pub fn new(probe: Arc<ArtifactProbe>) -> Self {
        Self { probe }
    }

    /// Statuses of the global phases
    pub fn pipeline(&self) -> PipelineProgress {
        let done = self.probe.phase_done_flags();
        let phases = PhaseStep::ALL
            .iter()
            .zip(resolve_statuses(&done))
            .map(|(&step, status)| PhaseProgress { step, status })
            .collect();

        PipelineProgress {
            phases,
            current: current_index(&done).map(|i| PhaseStep::ALL[i]),
        }
    }

    /// Progress of every listed section
    pub fn sections(&self) -> Vec<SectionProgress> {
        self.probe
            .list_sections()
            .into_iter()
            .map(|section| self.progress_of(section))
            .collect()
    }

    /// Progress of one section; `None` when the section is not listed
    pub fn section(&self, section_id: &str) -> Option<SectionProgress> {
        self.probe
            .list_sections()
            .into_iter()
            .find(|s| s.id == section_id)
            .map(|section| self.progress_of(section))
    }

    fn progress_of(&self, section: SectionInfo) -> SectionProgress {
        let done = self.probe.section_done_flags(&section.id);
        let steps = SectionStep::ALL
            .iter()
            .zip(resolve_statuses(&done))
            .map(|(&step, status)| SectionStepProgress { step, status })
            .collect();

        SectionProgress {
            steps,
            screen_designs: self.probe.list_screen_designs(&section.id),
            screenshots: self.probe.list_screenshots(&section.id),
            ready: all_required_complete(&done, &SectionStep::required_indices()),
            section,
        }
    }
}
