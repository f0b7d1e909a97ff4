//! Closed protocol tables for legacy traffic parameters.

use super::ParseNameError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Link-layer encapsulation understood by the stream builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum L2Encapsulation {
    /// Ethernet II framing.
    EthernetIi,
}

impl L2Encapsulation {
    /// Returns the legacy parameter name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EthernetIi => "ethernet_ii",
        }
    }
}

impl TryFrom<&str> for L2Encapsulation {
    type Error = ParseNameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "ethernet_ii" => Ok(Self::EthernetIi),
            other => Err(ParseNameError::new("l2_encap", other, "ethernet_ii")),
        }
    }
}

/// Network-layer protocols with a known EtherType.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum L3Protocol {
    /// Internet Protocol version 4.
    Ipv4,
    /// Internet Protocol version 6.
    Ipv6,
    /// Address Resolution Protocol.
    Arp,
}

impl L3Protocol {
    /// Returns the legacy parameter name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ipv4 => "ipv4",
            Self::Ipv6 => "ipv6",
            Self::Arp => "arp",
        }
    }

    /// Returns the EtherType carried in the Ethernet `type` field.
    #[must_use]
    pub const fn ether_type(self) -> u16 {
        match self {
            Self::Ipv4 => 0x0800,
            Self::Ipv6 => 0x86dd,
            Self::Arp => 0x0806,
        }
    }
}

impl fmt::Display for L3Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for L3Protocol {
    type Error = ParseNameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "ipv4" => Ok(Self::Ipv4),
            "ipv6" => Ok(Self::Ipv6),
            "arp" => Ok(Self::Arp),
            other => Err(ParseNameError::new("l3_protocol", other, "ipv4, ipv6, arp")),
        }
    }
}

/// Transport-layer protocols with a known IP protocol number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum L4Protocol {
    /// Transmission Control Protocol.
    Tcp,
    /// User Datagram Protocol.
    Udp,
    /// ICMP for IPv4.
    Icmp,
    /// ICMP for IPv6.
    Icmpv6,
    /// Internet Group Management Protocol.
    Igmp,
    /// Reliable transaction protocol.
    Rtp,
    /// IS-IS over IPv4.
    Isis,
    /// Open Shortest Path First.
    Ospf,
}

impl L4Protocol {
    /// Returns the legacy parameter name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tcp => "tcp",
            Self::Udp => "udp",
            Self::Icmp => "icmp",
            Self::Icmpv6 => "icmpv6",
            Self::Igmp => "igmp",
            Self::Rtp => "rtp",
            Self::Isis => "isis",
            Self::Ospf => "ospf",
        }
    }

    /// Returns the protocol number carried in the IPv4 `p` field.
    #[must_use]
    pub const fn ip_proto(self) -> u8 {
        match self {
            Self::Tcp => 6,
            Self::Udp => 17,
            Self::Icmp => 1,
            Self::Icmpv6 => 58,
            Self::Igmp => 2,
            Self::Rtp => 28,
            Self::Isis => 124,
            Self::Ospf => 89,
        }
    }
}

impl fmt::Display for L4Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for L4Protocol {
    type Error = ParseNameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "tcp" => Ok(Self::Tcp),
            "udp" => Ok(Self::Udp),
            "icmp" => Ok(Self::Icmp),
            "icmpv6" => Ok(Self::Icmpv6),
            "igmp" => Ok(Self::Igmp),
            "rtp" => Ok(Self::Rtp),
            "isis" => Ok(Self::Isis),
            "ospf" => Ok(Self::Ospf),
            other => Err(ParseNameError::new(
                "l4_protocol",
                other,
                "tcp, udp, icmp, icmpv6, igmp, rtp, isis, ospf",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("ipv4", 0x0800)]
    #[case("ipv6", 0x86dd)]
    #[case("arp", 0x0806)]
    fn l3_names_map_to_ether_types(#[case] name: &str, #[case] ether_type: u16) {
        let protocol = L3Protocol::try_from(name).expect("known protocol");
        assert_eq!(protocol.ether_type(), ether_type);
        assert_eq!(protocol.as_str(), name);
    }

    #[rstest]
    #[case("tcp", 6)]
    #[case("udp", 17)]
    #[case("icmp", 1)]
    #[case("icmpv6", 58)]
    #[case("igmp", 2)]
    #[case("rtp", 28)]
    #[case("isis", 124)]
    #[case("ospf", 89)]
    fn l4_names_map_to_ip_protocol_numbers(#[case] name: &str, #[case] proto: u8) {
        let protocol = L4Protocol::try_from(name).expect("known protocol");
        assert_eq!(protocol.ip_proto(), proto);
        assert_eq!(protocol.to_string(), name);
    }

    #[rstest]
    #[case("IPv4")]
    #[case("bogus")]
    fn unknown_l3_names_are_rejected(#[case] name: &str) {
        let error = L3Protocol::try_from(name).expect_err("unknown protocol");
        assert_eq!(error.value, name);
        assert_eq!(error.what, "l3_protocol");
    }

    #[test]
    fn only_ethernet_ii_is_an_l2_encapsulation() {
        assert_eq!(
            L2Encapsulation::try_from("ethernet_ii"),
            Ok(L2Encapsulation::EthernetIi)
        );
        assert!(L2Encapsulation::try_from("vlan").is_err());
    }
}
