//! Canister UI subsystem.
//!
//! [`bridge`] holds the presentation logic, [`window`] the widget seam, and
//! [`terminal`] the ratatui implementation of that seam.

pub mod bridge;
pub mod terminal;
pub mod window;

// Public re-exports for convenience. Modules outside this crate should prefer importing
// from `crate::ui` rather than reaching into submodules.
pub use bridge::CanisterUiBridge;
pub use terminal::TerminalCanisterWindow;
pub use window::{CanisterWindow, WindowEvent};
