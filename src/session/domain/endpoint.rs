//! Generator server endpoint and client identity.

use super::SessionDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Control port the generator server listens on unless told otherwise.
pub const DEFAULT_CONTROL_PORT: u16 = 5050;

/// Address, control port, and client identity for one generator session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionEndpoint {
    device: String,
    control_port: u16,
    username: String,
}

impl SessionEndpoint {
    /// Creates a validated endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`SessionDomainError::EmptyDevice`] or
    /// [`SessionDomainError::EmptyUsername`] when either value is blank.
    pub fn new(
        device: impl Into<String>,
        control_port: u16,
        username: impl Into<String>,
    ) -> Result<Self, SessionDomainError> {
        let normalized_device = device.into().trim().to_owned();
        if normalized_device.is_empty() {
            return Err(SessionDomainError::EmptyDevice);
        }

        let normalized_username = username.into().trim().to_owned();
        if normalized_username.is_empty() {
            return Err(SessionDomainError::EmptyUsername);
        }

        Ok(Self {
            device: normalized_device,
            control_port,
            username: normalized_username,
        })
    }

    /// Returns the device address.
    #[must_use]
    pub fn device(&self) -> &str {
        &self.device
    }

    /// Returns the control port.
    #[must_use]
    pub const fn control_port(&self) -> u16 {
        self.control_port
    }

    /// Returns the client identity.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }
}

impl fmt::Display for SessionEndpoint {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{}@{}:{}",
            self.username, self.device, self.control_port
        )
    }
}
