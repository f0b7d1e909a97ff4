//! Traffic configuration and transmit modes.

use super::ParseNameError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Action requested by a traffic configuration call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrafficMode {
    /// Create a new stream.
    Create,
    /// Change an existing stream.
    Modify,
    /// Delete a stream.
    Remove,
    /// Enable a stream.
    Enable,
    /// Disable a stream.
    Disable,
    /// Clear all streams.
    Reset,
}

impl TrafficMode {
    /// Returns the legacy parameter name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Modify => "modify",
            Self::Remove => "remove",
            Self::Enable => "enable",
            Self::Disable => "disable",
            Self::Reset => "reset",
        }
    }
}

impl fmt::Display for TrafficMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TrafficMode {
    type Error = ParseNameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "create" => Ok(Self::Create),
            "modify" => Ok(Self::Modify),
            "remove" => Ok(Self::Remove),
            "enable" => Ok(Self::Enable),
            "disable" => Ok(Self::Disable),
            "reset" => Ok(Self::Reset),
            other => Err(ParseNameError::new(
                "mode",
                other,
                "create, modify, remove, enable, disable, reset",
            )),
        }
    }
}

/// How a stream schedules its packets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransmitMode {
    /// Transmit at a constant rate until stopped.
    Continuous,
    /// Transmit with randomized inter-packet gaps.
    RandomSpaced,
    /// Transmit one packet.
    SinglePkt,
    /// Transmit one burst.
    SingleBurst,
    /// Transmit a fixed number of bursts.
    MultiBurst,
    /// Transmit bursts until stopped.
    ContinuousBurst,
}

impl TransmitMode {
    /// Returns the legacy parameter name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Continuous => "continuous",
            Self::RandomSpaced => "random_spaced",
            Self::SinglePkt => "single_pkt",
            Self::SingleBurst => "single_burst",
            Self::MultiBurst => "multi_burst",
            Self::ContinuousBurst => "continuous_burst",
        }
    }
}

impl fmt::Display for TransmitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TransmitMode {
    type Error = ParseNameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "continuous" => Ok(Self::Continuous),
            "random_spaced" => Ok(Self::RandomSpaced),
            "single_pkt" => Ok(Self::SinglePkt),
            "single_burst" => Ok(Self::SingleBurst),
            "multi_burst" => Ok(Self::MultiBurst),
            "continuous_burst" => Ok(Self::ContinuousBurst),
            other => Err(ParseNameError::new(
                "transmit_mode",
                other,
                "continuous, random_spaced, single_pkt, single_burst, multi_burst, continuous_burst",
            )),
        }
    }
}
