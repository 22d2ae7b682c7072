//! Error types for the generator crate.
//!
//! This module defines error types for registry lookups and code generation.

use thiserror::Error;

/// Result type alias for generator operations.
pub type GeneratorResult<T> = Result<T, GeneratorError>;

/// Error raised by the type registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A contract was requested for a type that is not registered.
    #[error("Unknown primitive type '{abbreviation}': not present in the type registry")]
    UnknownType { abbreviation: String },

    /// Two descriptors share an abbreviation, and with it a contract name.
    #[error("Duplicate abbreviation '{abbreviation}': already used by '{existing}', cannot register '{name}'")]
    DuplicateAbbreviation {
        abbreviation: String,
        existing: String,
        name: String,
    },

    /// A descriptor field is empty or not usable in an identifier.
    #[error("Invalid type descriptor '{name}': {message}")]
    InvalidDescriptor { name: String, message: String },
}

impl RegistryError {
    /// Create an unknown type error.
    pub fn unknown_type(abbreviation: impl Into<String>) -> Self {
        Self::UnknownType {
            abbreviation: abbreviation.into(),
        }
    }

    /// Create an invalid descriptor error.
    pub fn invalid_descriptor(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidDescriptor {
            name: name.into(),
            message: message.into(),
        }
    }
}

/// Error that occurred during code generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneratorError {
    /// Registry lookup or validation failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Generator configuration is not usable by the selected generator.
    #[error("Invalid generator configuration for '{key}': {message}")]
    InvalidConfig { key: String, message: String },
}

impl GeneratorError {
    /// Create an invalid configuration error.
    pub fn invalid_config(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            key: key.into(),
            message: message.into(),
        }
    }
}
