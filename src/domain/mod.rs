//! Domain entities for design-tui.
//!
//! This module contains the core entities:
//! - Phase: the global pipeline and per-section steps
//! - Status: step status derivation
//! - Navigation: shell navigation entries parsed from spec text
//! - Section: product sections, screen designs and screenshots
//! - Project: the overall workspace context

mod navigation;
mod phase;
mod project;
mod section;
mod status;

pub use navigation::{
    parse_nav_line, parse_navigation, route_key, IconRef, NavigationEntry, PLACEHOLDER_LABEL,
};
pub use phase::{PhaseStep, SectionStep, SectionStepKind};
pub use project::Project;
pub use section::{
    parse_roadmap, section_route, slugify, ScreenDesignRef, ScreenshotRef, SectionInfo,
};
pub use status::{all_required_complete, current_index, resolve_statuses, StepStatus};
