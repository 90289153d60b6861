//! design-tui: Terminal UI for phase-driven product design
//!
//! Tracks a product through its global phases and per-section steps from
//! the artifacts on disk, and previews section screen designs inside a
//! resizable frame, optionally wrapped in the product's application shell.

pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod preview;
pub mod services;
pub mod ui;

pub use app::App;
pub use config::ProjectConfig;
pub use error::{AppError, Result};
