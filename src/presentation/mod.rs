//! Presentation layer handling terminal UI and user input.
//!
//! This module renders the state dropdown, the confirm trigger, and the
//! city list with ratatui, and maps keyboard input onto view-state
//! operations.

pub mod ui;
pub mod input;

pub use ui::*;
pub use input::*;
