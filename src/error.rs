//! Error types and handling infrastructure for pipeworks.
//!
//! This module provides a centralized error handling system using `thiserror` for
//! custom error types and `anyhow` for application-level error handling with context.
//!
//! Console commands report every variant as a single text line to the invoking
//! shell; nothing here is fatal to the process, an error aborts exactly one
//! invocation.

use crate::world::EntityId;
use thiserror::Error;

/// The main error type for pipeworks operations.
///
/// This enum covers the rejection taxonomy of the console surface plus the
/// UI-layer failure modes.
#[derive(Error, Debug)]
pub enum PipeworksError {
    /// Caller may not run mapping commands from a remote shell
    #[error("You are not currently able to use mapping commands.")]
    Authorization,

    /// Wrong number of command arguments
    #[error("Invalid amount of arguments: expected {expected}, got {got}")]
    Usage { expected: usize, got: usize },

    /// An argument that must be an integer entity identifier was not
    #[error("Argument must be a number: {argument}")]
    ArgumentType { argument: String },

    /// The identifier does not refer to a live entity
    #[error("Entity not found: {id}")]
    EntityNotFound { id: EntityId },

    /// The entity exists but lacks a required component
    #[error("Entity {id} has no {capability}")]
    MissingCapability { id: EntityId, capability: String },

    /// The network-kind tag is not part of the closed enumeration
    #[error("Invalid network kind: {tag}")]
    InvalidNetworkKind { tag: String },

    /// The color argument is not a valid hexadecimal color
    #[error("Invalid color hex: {value}")]
    InvalidColor { value: String },

    /// UI and terminal related errors
    #[error("UI operation failed: {message}")]
    UiError {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Generic error for cases not covered by specific variants
    #[error("Operation failed: {message}")]
    Other { message: String },
}

/// Standard Result type for pipeworks operations.
///
/// This type alias provides a consistent error handling interface across
/// all modules in the pipeworks codebase.
pub type Result<T> = std::result::Result<T, PipeworksError>;

impl PipeworksError {
    /// Create a MissingCapability error naming the absent component
    pub fn missing_capability(id: EntityId, capability: impl Into<String>) -> Self {
        Self::MissingCapability {
            id,
            capability: capability.into(),
        }
    }

    /// Create an ArgumentType error for a non-numeric argument
    pub fn argument_type(argument: impl Into<String>) -> Self {
        Self::ArgumentType {
            argument: argument.into(),
        }
    }

    /// Create an InvalidColor error with the offending value
    pub fn invalid_color(value: impl Into<String>) -> Self {
        Self::InvalidColor {
            value: value.into(),
        }
    }

    /// Create a UiError with a descriptive message
    pub fn ui(message: impl Into<String>) -> Self {
        Self::UiError {
            message: message.into(),
            source: None,
        }
    }

    /// Create a generic Other error with a descriptive message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }
}

// Terminal setup/teardown surfaces raw io errors; fold them into the UI variant.
impl From<std::io::Error> for PipeworksError {
    fn from(err: std::io::Error) -> Self {
        Self::UiError {
            message: "terminal io failed".to_string(),
            source: Some(err),
        }
    }
}
