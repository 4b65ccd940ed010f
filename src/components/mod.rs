//! Reusable UI components
//!
//! - `keybindings` - context-aware key registry
//! - `nav_bar` - one-line key hint bar
//! - `help_overlay` - floating help window

pub mod help_overlay;
pub mod keybindings;
pub mod nav_bar;
