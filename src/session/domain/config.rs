//! Defaults applied to optional `connect` parameters.

use super::DEFAULT_CONTROL_PORT;
use serde::{Deserialize, Serialize};

/// Controller-wide defaults for session establishment.
///
/// Every field is optional when deserializing; missing values take the
/// defaults below.
///
/// # Examples
///
/// ```
/// use hltapi::session::domain::SessionConfig;
///
/// let config = SessionConfig::default();
/// assert_eq!(config.default_control_port, 5050);
/// assert!(!config.break_locks);
///
/// let exclusive = SessionConfig::exclusive();
/// assert!(exclusive.reset_on_connect);
/// assert!(exclusive.break_locks);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Control port used when a request does not name one.
    pub default_control_port: u16,
    /// Whether `connect` removes all configured traffic after acquiring.
    pub reset_on_connect: bool,
    /// Whether `connect` steals locks held by other clients.
    pub break_locks: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_control_port: DEFAULT_CONTROL_PORT,
            reset_on_connect: false,
            break_locks: false,
        }
    }
}

impl SessionConfig {
    /// Creates a configuration that takes ports over unconditionally and
    /// starts them from a clean traffic state.
    ///
    /// Useful for lab automation where stale sessions are common.
    #[must_use]
    pub const fn exclusive() -> Self {
        Self {
            default_control_port: DEFAULT_CONTROL_PORT,
            reset_on_connect: true,
            break_locks: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: SessionConfig = serde_json::from_str(r#"{"break_locks": true}"#)
            .expect("partial config should deserialize");

        assert_eq!(config.default_control_port, DEFAULT_CONTROL_PORT);
        assert!(!config.reset_on_connect);
        assert!(config.break_locks);
    }
}
