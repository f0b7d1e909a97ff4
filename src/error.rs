//! Shared failure classification for session and traffic operations.
//!
//! Each module owns its own error enum; every one of them reports an
//! [`ErrorKind`] so callers can branch on the category of a failure without
//! matching on module-specific variants.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a failure raised or reported by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The transport could not open a connection to the generator server.
    ConnectionFailure,
    /// One or more requested ports could not be locked.
    AcquisitionFailure,
    /// A reset, release, or port query failed on the remote side.
    RemoteOperationFailure,
    /// Malformed mode, protocol, address, or port-list input.
    InvalidArgument,
    /// A recognized mode or protocol that is not implemented yet.
    Unsupported,
    /// A response shape disagrees with the request that produced it.
    ProtocolMismatch,
    /// The controller already owns a live session.
    AlreadyConnected,
    /// The operation needs a live session and none exists.
    NotConnected,
}

impl ErrorKind {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ConnectionFailure => "connection_failure",
            Self::AcquisitionFailure => "acquisition_failure",
            Self::RemoteOperationFailure => "remote_operation_failure",
            Self::InvalidArgument => "invalid_argument",
            Self::Unsupported => "unsupported",
            Self::ProtocolMismatch => "protocol_mismatch",
            Self::AlreadyConnected => "already_connected",
            Self::NotConnected => "not_connected",
        }
    }

    /// Returns whether the failure is reported in-band as a `status = 0`
    /// result instead of being returned as an error.
    #[must_use]
    pub const fn is_remote(self) -> bool {
        matches!(
            self,
            Self::ConnectionFailure
                | Self::AcquisitionFailure
                | Self::RemoteOperationFailure
                | Self::ProtocolMismatch
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::ErrorKind;
    use rstest::rstest;

    #[rstest]
    #[case(ErrorKind::ConnectionFailure, true)]
    #[case(ErrorKind::AcquisitionFailure, true)]
    #[case(ErrorKind::RemoteOperationFailure, true)]
    #[case(ErrorKind::ProtocolMismatch, true)]
    #[case(ErrorKind::InvalidArgument, false)]
    #[case(ErrorKind::Unsupported, false)]
    #[case(ErrorKind::AlreadyConnected, false)]
    #[case(ErrorKind::NotConnected, false)]
    fn remote_kinds_are_reported_in_band(#[case] kind: ErrorKind, #[case] expected: bool) {
        assert_eq!(kind.is_remote(), expected);
    }

    #[test]
    fn kind_serializes_in_snake_case() {
        let encoded = serde_json::to_string(&ErrorKind::ProtocolMismatch)
            .expect("error kind should serialize");
        assert_eq!(encoded, "\"protocol_mismatch\"");
    }
}
