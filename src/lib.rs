//! # pipeworks - Station Atmospherics Adapters
//!
//! Two leaf adapters carved out of a space-station simulation, plus the
//! minimal world model needed to exercise them:
//!
//! - a **canister UI bridge** translating replicated device state into
//!   window-widget updates and widget events into outbound intents, and
//! - the **`colornetwork` admin command** that recolors every paintable pipe
//!   on the node group behind an entity's container slot.
//!
//! ## Architecture
//!
//! - [`error`] - Centralized error types and handling
//! - [`world`] - Entity store with typed component lookup
//! - [`nodes`] - Node containers, network kinds, and the group index
//! - [`protocol`] - Replicated state and intent tagged unions
//! - [`ui`] - Canister window bridge and terminal widget
//! - [`console`] - Shell abstraction, command registry, `colornetwork`
//! - [`scenario`] - Canned worlds for the binary, tests, and benches
//! - [`app`] - Demo runtime wiring the bridge to a local authority

// Core modules
pub mod color;
pub mod error;
pub mod nodes;
pub mod protocol;
pub mod world;

// Adapter surfaces
pub mod console;
pub mod ui;

// Orchestration and fixtures
pub mod app;
pub mod scenario;

// Re-export commonly used types for convenience
pub use error::{PipeworksError, Result};

// Public API surface for external usage
pub use app::Application;
pub use color::Color;
pub use console::{CommandContext, CommandRegistry, ConsoleCommand};
pub use world::{EntityId, World};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
