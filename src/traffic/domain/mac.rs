//! Ethernet MAC address value.

use super::StreamDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A 48-bit Ethernet MAC address.
///
/// Accepts colon or hyphen separated hex octets and always displays in
/// lowercase colon form.
///
/// # Examples
///
/// ```
/// use hltapi::traffic::domain::MacAddress;
///
/// let mac: MacAddress = "00-1B-21-3C-4D-5E".parse().expect("valid MAC");
/// assert_eq!(mac.to_string(), "00:1b:21:3c:4d:5e");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MacAddress([u8; 6]);

impl MacAddress {
    /// The broadcast address.
    pub const BROADCAST: Self = Self([0xff; 6]);

    /// Creates an address from raw octets.
    #[must_use]
    pub const fn new(octets: [u8; 6]) -> Self {
        Self(octets)
    }

    /// Returns the raw octets.
    #[must_use]
    pub const fn octets(&self) -> [u8; 6] {
        self.0
    }

    /// Returns true for group addresses.
    #[must_use]
    pub const fn is_multicast(&self) -> bool {
        self.0[0] & 0x01 != 0
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self
            .0
            .iter()
            .map(|octet| format!("{octet:02x}"))
            .collect::<Vec<_>>()
            .join(":");
        f.write_str(&text)
    }
}

impl FromStr for MacAddress {
    type Err = StreamDomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || StreamDomainError::InvalidMacAddress(value.to_owned());
        let separator = if value.contains(':') { ':' } else { '-' };

        let mut octets = [0_u8; 6];
        let mut parts = value.split(separator);
        for octet in &mut octets {
            let part = parts.next().ok_or_else(invalid)?;
            if part.len() != 2 {
                return Err(invalid());
            }
            *octet = u8::from_str_radix(part, 16).map_err(|_| invalid())?;
        }
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(Self(octets))
    }
}

impl TryFrom<String> for MacAddress {
    type Error = StreamDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MacAddress> for String {
    fn from(value: MacAddress) -> Self {
        value.to_string()
    }
}

impl From<[u8; 6]> for MacAddress {
    fn from(octets: [u8; 6]) -> Self {
        Self(octets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("00:11:22:33:44:55", [0x00, 0x11, 0x22, 0x33, 0x44, 0x55])]
    #[case("AA-bb-CC-dd-EE-ff", [0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff])]
    fn parses_both_separators(#[case] input: &str, #[case] expected: [u8; 6]) {
        let mac: MacAddress = input.parse().expect("valid MAC");
        assert_eq!(mac.octets(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("00:11:22:33:44")]
    #[case("00:11:22:33:44:55:66")]
    #[case("00:11:22:33:44:5")]
    #[case("00:11:22:33:44:zz")]
    #[case("001:1:22:33:44:55")]
    fn rejects_malformed_addresses(#[case] input: &str) {
        assert_eq!(
            input.parse::<MacAddress>(),
            Err(StreamDomainError::InvalidMacAddress(input.to_owned()))
        );
    }

    #[test]
    fn broadcast_is_multicast() {
        assert!(MacAddress::BROADCAST.is_multicast());
        assert!(!MacAddress::new([0x00, 0x11, 0x22, 0x33, 0x44, 0x55]).is_multicast());
    }

    #[test]
    fn serializes_as_display_string() {
        let mac = MacAddress::new([0xde, 0xad, 0xbe, 0xef, 0x00, 0x01]);
        let json = serde_json::to_string(&mac).expect("serialize");
        assert_eq!(json, "\"de:ad:be:ef:00:01\"");
        let back: MacAddress = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, mac);
    }
}
