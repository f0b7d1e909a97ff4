//! Interface configuration modes.

use super::SessionDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mode accepted by `interface_config`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterfaceMode {
    /// Apply a new interface configuration.
    Config,
    /// Change an existing interface configuration.
    Modify,
    /// Remove an interface configuration.
    Destroy,
}

impl InterfaceMode {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Config => "config",
            Self::Modify => "modify",
            Self::Destroy => "destroy",
        }
    }
}

impl fmt::Display for InterfaceMode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for InterfaceMode {
    type Error = SessionDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "config" => Ok(Self::Config),
            "modify" => Ok(Self::Modify),
            "destroy" => Ok(Self::Destroy),
            _ => Err(SessionDomainError::InvalidInterfaceMode(value.to_owned())),
        }
    }
}
