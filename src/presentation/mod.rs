//! Presentation layer handling terminal UI and user input.
//!
//! This module renders the album form, alert banner and album table with
//! ratatui, and maps keyboard input to application workflows.

pub mod ui;
pub mod input;

pub use ui::*;
pub use input::*;
