//! Error types for session domain validation and parsing.

use super::SessionPhase;
use crate::error::ErrorKind;
use thiserror::Error;

/// Errors returned while normalizing a port list.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PortListError {
    /// A token could not be parsed as a port identifier.
    #[error("invalid port identifier '{0}', expected a non-negative integer")]
    InvalidToken(String),
}

impl PortListError {
    /// Returns the failure category.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidArgument
    }
}

/// Errors returned when a remote response does not match its request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AggregationError {
    /// A batch response carried a different number of results than ports
    /// were requested.
    #[error("batch response carries {actual} results for {expected} requested ports")]
    BatchLengthMismatch {
        /// Number of requested ports.
        expected: usize,
        /// Number of per-port results received.
        actual: usize,
    },

    /// A single result was returned for a multi-port request.
    #[error("single result returned for {targets} requested ports")]
    SingleResultForBatch {
        /// Number of requested ports.
        targets: usize,
    },
}

impl AggregationError {
    /// Returns the failure category.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::ProtocolMismatch
    }
}

/// Errors returned while validating session lifecycle values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionDomainError {
    /// A session is already live on this controller.
    #[error("a generator session is already live ({phase})")]
    AlreadyConnected {
        /// Phase of the live session.
        phase: SessionPhase,
    },

    /// The operation needs a live session and none exists.
    #[error("no generator session is live")]
    NotConnected,

    /// Transitioning between two session phases is invalid.
    #[error("invalid session phase transition: {from} -> {to}")]
    InvalidPhaseTransition {
        /// Current phase.
        from: SessionPhase,
        /// Requested target phase.
        to: SessionPhase,
    },

    /// The interface configuration mode is outside the accepted set.
    #[error("interface mode must be one of config, modify, destroy (got '{0}')")]
    InvalidInterfaceMode(String),

    /// The device address is empty after trimming.
    #[error("device address must not be empty")]
    EmptyDevice,

    /// The client username is empty after trimming.
    #[error("username must not be empty")]
    EmptyUsername,
}

impl SessionDomainError {
    /// Returns the failure category.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::AlreadyConnected { .. } => ErrorKind::AlreadyConnected,
            Self::NotConnected => ErrorKind::NotConnected,
            Self::InvalidPhaseTransition { .. }
            | Self::InvalidInterfaceMode(_)
            | Self::EmptyDevice
            | Self::EmptyUsername => ErrorKind::InvalidArgument,
        }
    }
}

/// Error returned while parsing a session phase.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown session phase: {0}")]
pub struct ParseSessionPhaseError(pub String);
