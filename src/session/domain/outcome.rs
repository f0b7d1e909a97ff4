//! Caller-facing result contract for lifecycle operations.

use super::PortHandleMap;
use crate::error::ErrorKind;
use serde::{Deserialize, Serialize};

/// Status code reported for a successful operation.
pub const STATUS_SUCCESS: u8 = 1;
/// Status code reported for a failed operation.
pub const STATUS_FAILURE: u8 = 0;

/// Coarse result returned to legacy automation callers.
///
/// `status` is `1` on success and `0` on failure; `log` carries the
/// diagnostic text and is `None` on success. `connect` additionally fills
/// `port_handle` and `offline`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HltResult {
    status: u8,
    log: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    port_handle: Option<PortHandleMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    offline: Option<u8>,
    #[serde(skip)]
    failure: Option<ErrorKind>,
}

impl HltResult {
    /// Creates a plain success result.
    #[must_use]
    pub const fn success() -> Self {
        Self {
            status: STATUS_SUCCESS,
            log: None,
            port_handle: None,
            offline: None,
            failure: None,
        }
    }

    /// Creates the success result of `connect` for live ports.
    #[must_use]
    pub const fn connected(port_handle: PortHandleMap) -> Self {
        Self {
            status: STATUS_SUCCESS,
            log: None,
            port_handle: Some(port_handle),
            offline: Some(0),
            failure: None,
        }
    }

    /// Creates a failure result carrying a diagnostic.
    #[must_use]
    pub fn failure(kind: ErrorKind, log: impl Into<String>) -> Self {
        Self {
            status: STATUS_FAILURE,
            log: Some(log.into()),
            port_handle: None,
            offline: None,
            failure: Some(kind),
        }
    }

    /// Returns the numeric status.
    #[must_use]
    pub const fn status(&self) -> u8 {
        self.status
    }

    /// Returns whether the operation succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }

    /// Returns the diagnostic text, if any.
    #[must_use]
    pub fn log(&self) -> Option<&str> {
        self.log.as_deref()
    }

    /// Returns the port handle map produced by `connect`.
    #[must_use]
    pub const fn port_handle(&self) -> Option<&PortHandleMap> {
        self.port_handle.as_ref()
    }

    /// Returns the offline flag produced by `connect` (`0` for live ports).
    #[must_use]
    pub const fn offline(&self) -> Option<u8> {
        self.offline
    }

    /// Returns the failure category for a failed result.
    #[must_use]
    pub const fn failure_kind(&self) -> Option<ErrorKind> {
        self.failure
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::domain::PortId;
    use serde_json::json;

    #[test]
    fn connect_success_serializes_legacy_fields() {
        let result =
            HltResult::connected(PortHandleMap::identity("trex-a", &[PortId::new(0)]));

        let encoded = serde_json::to_value(&result).expect("result should serialize");

        assert_eq!(
            encoded,
            json!({
                "status": 1,
                "log": null,
                "port_handle": {"trex-a": {"0": 0}},
                "offline": 0
            })
        );
    }

    #[test]
    fn failure_omits_connect_payload_and_kind() {
        let result = HltResult::failure(ErrorKind::ConnectionFailure, "connection refused");

        let encoded = serde_json::to_value(&result).expect("result should serialize");

        assert_eq!(encoded, json!({"status": 0, "log": "connection refused"}));
        assert_eq!(result.failure_kind(), Some(ErrorKind::ConnectionFailure));
    }
}
