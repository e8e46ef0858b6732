//! Error types for store mutation.

use thiserror::Error;

/// Errors returned by store mutation operations.
///
/// Read accessors return `Option` instead: an absent or
/// differently-typed entry is a normal outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A chain with this name already exists in the store.
    #[error("variable already exists: {name}")]
    DuplicateName { name: String },

    /// The name is empty or cannot appear as an XML element name.
    #[error("invalid variable name: {name:?}")]
    InvalidName { name: String },

    /// An existing chain with this name uses a different handler.
    #[error("type mismatch for {name}: existing entry has type {existing}")]
    TypeMismatch { name: String, existing: String },

    /// No handler with this type name is registered.
    #[error("unknown type: {type_name}")]
    UnknownType { type_name: String },
}
