//! Error types
//!
//! Contract violations surface as `TypeKindError`; bad configuration or
//! level files surface as `ConfigError`. Data gaps (empty cells, missing
//! player, unknown symbols) are not errors and show up as `None`.

use thiserror::Error;

/// An argument violated the declared contract of an operation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TypeKindError {
    #[error("{field} must be a finite vector, got ({x}, {y})")]
    NonFiniteVector { field: &'static str, x: f32, y: f32 },
    #[error("actor size must be positive on both axes, got ({x}, {y})")]
    NonPositiveSize { x: f32, y: f32 },
}

/// Failure loading settings or level packs
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("dictionary key {0:?} must be exactly one character")]
    InvalidSymbol(String),
    #[error("dictionary key {0:?} is reserved for terrain")]
    ReservedSymbol(char),
}
