//! Infrastructure services for design-tui.
//!
//! This module contains:
//! - ArtifactProbe: presence queries against the product artifacts
//! - ComponentRegistry: deferred loaders for screen designs and the shell
//! - ProgressService: phase and section statuses

pub(crate) mod artifacts;
mod progress;
mod registry;

pub use artifacts::ArtifactProbe;
pub use progress::{
    PhaseProgress, PipelineProgress, ProgressService, SectionProgress, SectionStepProgress,
};
pub use registry::{
    load_source, ComponentRegistry, LoadFuture, LoadSource, Loader, ScreenDesignKey,
    ScreenDesignLoader,
};
