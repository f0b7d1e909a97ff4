//! Session lifecycle phases.

use super::ParseSessionPhaseError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle phase of a session controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// No connection handle exists and no ports are held.
    Disconnected,
    /// A connection exists but ports are not yet acquired.
    Connected,
    /// A connection exists and the requested ports are locked.
    PortsAcquired,
}

impl SessionPhase {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::Connected => "connected",
            Self::PortsAcquired => "ports_acquired",
        }
    }

    /// Returns whether a connection handle is live in this phase.
    #[must_use]
    pub const fn is_live(self) -> bool {
        !matches!(self, Self::Disconnected)
    }

    /// Returns whether transition to `target` is allowed.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Disconnected, Self::Connected)
                | (Self::Connected, Self::PortsAcquired)
                | (Self::Connected | Self::PortsAcquired, Self::Disconnected)
        )
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for SessionPhase {
    type Error = ParseSessionPhaseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "disconnected" => Ok(Self::Disconnected),
            "connected" => Ok(Self::Connected),
            "ports_acquired" => Ok(Self::PortsAcquired),
            _ => Err(ParseSessionPhaseError(value.to_owned())),
        }
    }
}
