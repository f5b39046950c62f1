//! Reusable UI components
//!
//! - `keybindings` - Mode-aware key registry, nav bar hints and help content
//! - `help_overlay` - Floating help panel

pub mod help_overlay;
pub mod keybindings;
