//! Error types for stream descriptor construction and name parsing.

use super::{FieldType, LayerKind};
use crate::error::ErrorKind;
use thiserror::Error;

/// Errors returned while parsing a legacy parameter name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {what} '{value}', expected one of: {expected}")]
pub struct ParseNameError {
    /// Parameter being parsed.
    pub what: &'static str,
    /// Rejected input.
    pub value: String,
    /// Accepted names, comma separated.
    pub expected: &'static str,
}

impl ParseNameError {
    /// Creates a parse error for `value`.
    #[must_use]
    pub fn new(what: &'static str, value: impl Into<String>, expected: &'static str) -> Self {
        Self {
            what,
            value: value.into(),
            expected,
        }
    }

    /// Returns the failure category.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidArgument
    }
}

/// Errors returned while building a stream descriptor.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StreamDomainError {
    /// A MAC address could not be parsed.
    #[error("invalid MAC address '{0}'")]
    InvalidMacAddress(String),

    /// A layer with this name already exists.
    #[error("layer '{0}' already exists")]
    DuplicateLayer(String),

    /// No layer with this name has been added.
    #[error("layer '{0}' does not exist")]
    MissingLayer(String),

    /// The layer kind does not define the field.
    #[error("{kind} layer has no field '{field}'")]
    UnknownField {
        /// Kind of the target layer.
        kind: LayerKind,
        /// Requested field name.
        field: String,
    },

    /// The value does not match the field's type.
    #[error("field '{field}' of {kind} layer expects {expected}, got {actual}")]
    FieldTypeMismatch {
        /// Kind of the target layer.
        kind: LayerKind,
        /// Field name.
        field: String,
        /// Declared field type.
        expected: FieldType,
        /// Type of the supplied value.
        actual: FieldType,
    },
}

impl StreamDomainError {
    /// Returns the failure category.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidArgument
    }
}
