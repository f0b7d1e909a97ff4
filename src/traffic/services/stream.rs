//! Stream descriptor builder for legacy traffic configuration calls.
//!
//! Flat legacy parameters are validated in a fixed order and translated
//! into layer and field operations on a [`PacketBuilder`]. Parameters that
//! name something unknown are invalid arguments; parameters that name
//! something known but not yet buildable are unsupported.

use crate::error::ErrorKind;
use crate::session::domain::PortHandleMap;
use crate::traffic::{
    adapters::LayerStackBuilder,
    domain::{
        FieldValue, L2Encapsulation, L3Protocol, L4Protocol, LayerKind, MacAddress,
        ParseNameError, StreamDescriptor, StreamDomainError, TrafficMode, TransmitMode,
    },
    ports::PacketBuilder,
};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use std::net::Ipv4Addr;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// Name of the link layer in generated descriptors.
pub const LINK_LAYER: &str = "l2";
/// Name of the network layer in generated descriptors.
pub const NETWORK_LAYER: &str = "l3";

/// Flat legacy traffic parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrafficConfigRequest {
    /// Requested action.
    pub mode: String,
    /// Port handle map returned by `connect`.
    pub port_handle: PortHandleMap,
    /// Link-layer encapsulation.
    pub l2_encap: String,
    /// Source MAC address.
    pub mac_src: String,
    /// Destination MAC address.
    pub mac_dst: String,
    /// Network-layer protocol name.
    pub l3_protocol: String,
    /// Source IPv4 address.
    pub ip_src_addr: String,
    /// Destination IPv4 address.
    pub ip_dst_addr: String,
    /// Network-layer total length.
    pub l3_length: u16,
    /// Packet scheduling mode.
    pub transmit_mode: String,
    /// Packets per second.
    pub rate_pps: u64,
    /// Optional transport-layer protocol name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l4_protocol: Option<String>,
}

/// Validated stream ready to be attached to ports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamConfig {
    /// Ports the stream targets.
    pub port_handle: PortHandleMap,
    /// Packet layers.
    pub descriptor: StreamDescriptor,
    /// Packet scheduling mode.
    pub transmit_mode: TransmitMode,
    /// Packets per second.
    pub rate_pps: u64,
}

/// Errors returned by traffic configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TrafficConfigError {
    /// The mode is not a traffic configuration action.
    #[error(transparent)]
    InvalidMode(ParseNameError),

    /// The mode is known but only `create` is implemented.
    #[error("mode '{0}' is not supported yet")]
    UnsupportedMode(TrafficMode),

    /// The link-layer encapsulation cannot be built.
    #[error("l2_encap does not support the encapsulation '{}'", .0.value)]
    UnsupportedEncapsulation(#[source] ParseNameError),

    /// A MAC address parameter is malformed.
    #[error("{field}: {source}")]
    InvalidMacAddress {
        /// Parameter name.
        field: &'static str,
        /// Parse failure.
        source: StreamDomainError,
    },

    /// The network-layer protocol has no known type code.
    #[error(transparent)]
    UnknownL3Protocol(ParseNameError),

    /// The network-layer protocol is known but cannot be built.
    #[error("l3_protocol '{0}' is not supported yet")]
    UnsupportedL3Protocol(L3Protocol),

    /// An IPv4 address parameter is malformed.
    #[error("{field}: invalid IPv4 address '{value}'")]
    InvalidIpv4Address {
        /// Parameter name.
        field: &'static str,
        /// Rejected input.
        value: String,
    },

    /// The transport-layer protocol has no known protocol number.
    #[error(transparent)]
    UnknownL4Protocol(ParseNameError),

    /// The transmit mode is unknown.
    #[error(transparent)]
    InvalidTransmitMode(ParseNameError),

    /// The packet rate is zero.
    #[error("rate_pps must be positive")]
    InvalidRate,

    /// The packet builder rejected an operation.
    #[error(transparent)]
    Builder(#[from] StreamDomainError),
}

impl TrafficConfigError {
    /// Returns the failure category.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedMode(_)
            | Self::UnsupportedEncapsulation(_)
            | Self::UnsupportedL3Protocol(_) => ErrorKind::Unsupported,
            Self::Builder(err) => err.kind(),
            Self::InvalidMode(_)
            | Self::InvalidMacAddress { .. }
            | Self::UnknownL3Protocol(_)
            | Self::InvalidIpv4Address { .. }
            | Self::UnknownL4Protocol(_)
            | Self::InvalidTransmitMode(_)
            | Self::InvalidRate => ErrorKind::InvalidArgument,
        }
    }
}

/// Result type for traffic configuration.
pub type TrafficConfigResult<T> = Result<T, TrafficConfigError>;

/// Translates legacy traffic parameters into stream configurations.
#[derive(Debug)]
pub struct TrafficConfigService<B = LayerStackBuilder> {
    builder: PhantomData<fn() -> B>,
}

impl<B> Default for TrafficConfigService<B> {
    fn default() -> Self {
        Self {
            builder: PhantomData,
        }
    }
}

impl<B> TrafficConfigService<B>
where
    B: PacketBuilder + Default,
{
    /// Creates a service that builds with `B`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates a traffic configuration call and builds its stream.
    ///
    /// # Errors
    ///
    /// Returns [`TrafficConfigError`] for the first parameter that fails
    /// validation. No remote call is made either way.
    #[instrument(
        skip(self, request),
        fields(mode = %request.mode, l3_protocol = %request.l3_protocol)
    )]
    pub fn traffic_config(
        &self,
        request: &TrafficConfigRequest,
    ) -> TrafficConfigResult<StreamConfig> {
        let outcome = Self::build(request);
        if let Err(err) = &outcome {
            warn!(error = %err, kind = %err.kind(), "traffic configuration rejected");
        }
        outcome
    }

    fn build(request: &TrafficConfigRequest) -> TrafficConfigResult<StreamConfig> {
        let mode =
            TrafficMode::try_from(request.mode.as_str()).map_err(TrafficConfigError::InvalidMode)?;
        if mode != TrafficMode::Create {
            return Err(TrafficConfigError::UnsupportedMode(mode));
        }

        let descriptor = generate_stream(B::default(), request)?;
        let transmit_mode = TransmitMode::try_from(request.transmit_mode.as_str())
            .map_err(TrafficConfigError::InvalidTransmitMode)?;
        if request.rate_pps == 0 {
            return Err(TrafficConfigError::InvalidRate);
        }

        info!(
            layers = descriptor.layers().len(),
            %transmit_mode,
            rate_pps = request.rate_pps,
            "stream configured"
        );
        Ok(StreamConfig {
            port_handle: request.port_handle.clone(),
            descriptor,
            transmit_mode,
            rate_pps: request.rate_pps,
        })
    }
}

/// Builds the packet layers described by `request` with `builder`.
///
/// Only the layer parameters are examined; mode, transmit mode, and rate
/// are left to [`TrafficConfigService::traffic_config`].
///
/// # Errors
///
/// Returns [`TrafficConfigError`] for the first layer parameter that fails
/// validation, or when the builder rejects an operation.
pub fn generate_stream<B: PacketBuilder>(
    mut builder: B,
    request: &TrafficConfigRequest,
) -> TrafficConfigResult<StreamDescriptor> {
    L2Encapsulation::try_from(request.l2_encap.as_str())
        .map_err(TrafficConfigError::UnsupportedEncapsulation)?;
    builder.add_layer(LINK_LAYER, LayerKind::Ethernet)?;
    builder.set_layer_field(LINK_LAYER, "src", parse_mac("mac_src", &request.mac_src)?)?;
    builder.set_layer_field(LINK_LAYER, "dst", parse_mac("mac_dst", &request.mac_dst)?)?;

    let l3_protocol = L3Protocol::try_from(request.l3_protocol.as_str())
        .map_err(TrafficConfigError::UnknownL3Protocol)?;
    builder.set_layer_field(LINK_LAYER, "type", l3_protocol.ether_type().into())?;
    if l3_protocol != L3Protocol::Ipv4 {
        return Err(TrafficConfigError::UnsupportedL3Protocol(l3_protocol));
    }

    builder.add_layer(NETWORK_LAYER, LayerKind::Ipv4)?;
    builder.set_layer_field(
        NETWORK_LAYER,
        "src",
        parse_ipv4("ip_src_addr", &request.ip_src_addr)?,
    )?;
    builder.set_layer_field(
        NETWORK_LAYER,
        "dst",
        parse_ipv4("ip_dst_addr", &request.ip_dst_addr)?,
    )?;
    builder.set_layer_field(NETWORK_LAYER, "len", request.l3_length.into())?;

    if let Some(name) = request.l4_protocol.as_deref() {
        let l4_protocol =
            L4Protocol::try_from(name).map_err(TrafficConfigError::UnknownL4Protocol)?;
        builder.set_layer_field(NETWORK_LAYER, "p", l4_protocol.ip_proto().into())?;
    }

    debug!(l3_protocol = %l3_protocol, "stream layers built");
    Ok(builder.finish())
}

fn parse_mac(field: &'static str, value: &str) -> TrafficConfigResult<FieldValue> {
    value
        .parse::<MacAddress>()
        .map(FieldValue::from)
        .map_err(|source| TrafficConfigError::InvalidMacAddress { field, source })
}

fn parse_ipv4(field: &'static str, value: &str) -> TrafficConfigResult<FieldValue> {
    value
        .parse::<Ipv4Addr>()
        .map(FieldValue::from)
        .map_err(|_| TrafficConfigError::InvalidIpv4Address {
            field,
            value: value.to_owned(),
        })
}
