//! Global phase pipeline and per-section steps.

use serde::{Deserialize, Serialize};

/// One step of the global product pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PhaseStep {
    Product,
    DataModel,
    Design,
    Sections,
    Export,
}

impl PhaseStep {
    /// All phases in pipeline order
    pub const ALL: [PhaseStep; 5] = [
        Self::Product,
        Self::DataModel,
        Self::Design,
        Self::Sections,
        Self::Export,
    ];

    /// Stable identifier
    pub fn id(&self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::DataModel => "data-model",
            Self::Design => "design",
            Self::Sections => "sections",
            Self::Export => "export",
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Product => "Product",
            Self::DataModel => "Data Model",
            Self::Design => "Design",
            Self::Sections => "Sections",
            Self::Export => "Export",
        }
    }

    /// Route consumed by the router
    pub fn route_path(&self) -> &'static str {
        match self {
            Self::Product => "/",
            Self::DataModel => "/data-model",
            Self::Design => "/design",
            Self::Sections => "/sections",
            Self::Export => "/export",
        }
    }

    /// Position in the pipeline
    pub fn index(&self) -> usize {
        match self {
            Self::Product => 0,
            Self::DataModel => 1,
            Self::Design => 2,
            Self::Sections => 3,
            Self::Export => 4,
        }
    }

    /// The phase after this one, if any
    pub fn next(&self) -> Option<PhaseStep> {
        Self::ALL.get(self.index() + 1).copied()
    }
}

impl std::fmt::Display for PhaseStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Kind of step on a section's detail page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionStepKind {
    Spec,
    SampleData,
    ScreenDesigns,
    Screenshots,
}

impl SectionStepKind {
    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Spec => "Section spec",
            Self::SampleData => "Sample data",
            Self::ScreenDesigns => "Screen designs",
            Self::Screenshots => "Screenshots",
        }
    }

    /// Optional steps do not block moving on
    pub fn is_optional(&self) -> bool {
        matches!(self, Self::Screenshots)
    }
}

/// One step within a section's pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionStep {
    pub index: usize,
    pub kind: SectionStepKind,
}

impl SectionStep {
    /// The four section steps in order
    pub const ALL: [SectionStep; 4] = [
        SectionStep {
            index: 0,
            kind: SectionStepKind::Spec,
        },
        SectionStep {
            index: 1,
            kind: SectionStepKind::SampleData,
        },
        SectionStep {
            index: 2,
            kind: SectionStepKind::ScreenDesigns,
        },
        SectionStep {
            index: 3,
            kind: SectionStepKind::Screenshots,
        },
    ];

    /// Indices that must be done before a section counts as ready
    pub fn required_indices() -> Vec<usize> {
        Self::ALL
            .iter()
            .filter(|step| !step.kind.is_optional())
            .map(|step| step.index)
            .collect()
    }
}
