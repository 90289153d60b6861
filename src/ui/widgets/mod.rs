//! Reusable UI widgets for design-tui.

pub mod document;
pub mod help;
pub mod pipeline;
pub mod preview_frame;
pub mod section_detail;
