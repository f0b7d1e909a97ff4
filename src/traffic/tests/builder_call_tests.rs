//! Tests for the packet builder calls issued by `generate_stream`.

use crate::session::domain::PortHandleMap;
use crate::traffic::{
    domain::{FieldValue, LayerKind, MacAddress, StreamDescriptor, StreamDomainError},
    ports::MockPacketBuilder,
    services::{TrafficConfigError, TrafficConfigRequest, generate_stream},
};
use mockall::Sequence;
use rstest::{fixture, rstest};
use std::net::Ipv4Addr;

#[fixture]
fn request() -> TrafficConfigRequest {
    TrafficConfigRequest {
        mode: "create".to_owned(),
        port_handle: PortHandleMap::default(),
        l2_encap: "ethernet_ii".to_owned(),
        mac_src: "02:00:00:00:00:01".to_owned(),
        mac_dst: "02:00:00:00:00:02".to_owned(),
        l3_protocol: "ipv4".to_owned(),
        ip_src_addr: "172.16.0.1".to_owned(),
        ip_dst_addr: "172.16.0.2".to_owned(),
        l3_length: 46,
        transmit_mode: "continuous".to_owned(),
        rate_pps: 1,
        l4_protocol: Some("udp".to_owned()),
    }
}

fn expect_layer(
    builder: &mut MockPacketBuilder,
    seq: &mut Sequence,
    name: &'static str,
    kind: LayerKind,
) {
    builder
        .expect_add_layer()
        .withf(move |actual_name, actual_kind| actual_name == name && *actual_kind == kind)
        .times(1)
        .in_sequence(seq)
        .returning(|_, _| Ok(()));
}

fn expect_field(
    builder: &mut MockPacketBuilder,
    seq: &mut Sequence,
    layer: &'static str,
    field: &'static str,
    value: FieldValue,
) {
    builder
        .expect_set_layer_field()
        .withf(move |actual_layer, actual_field, actual_value| {
            actual_layer == layer && actual_field == field && *actual_value == value
        })
        .times(1)
        .in_sequence(seq)
        .returning(|_, _, _| Ok(()));
}

#[rstest]
fn builds_layers_outermost_first(request: TrafficConfigRequest) {
    let mut builder = MockPacketBuilder::new();
    let mut seq = Sequence::new();
    expect_layer(&mut builder, &mut seq, "l2", LayerKind::Ethernet);
    expect_field(
        &mut builder,
        &mut seq,
        "l2",
        "src",
        MacAddress::new([0x02, 0, 0, 0, 0, 0x01]).into(),
    );
    expect_field(
        &mut builder,
        &mut seq,
        "l2",
        "dst",
        MacAddress::new([0x02, 0, 0, 0, 0, 0x02]).into(),
    );
    expect_field(&mut builder, &mut seq, "l2", "type", 0x0800_u16.into());
    expect_layer(&mut builder, &mut seq, "l3", LayerKind::Ipv4);
    expect_field(
        &mut builder,
        &mut seq,
        "l3",
        "src",
        Ipv4Addr::new(172, 16, 0, 1).into(),
    );
    expect_field(
        &mut builder,
        &mut seq,
        "l3",
        "dst",
        Ipv4Addr::new(172, 16, 0, 2).into(),
    );
    expect_field(&mut builder, &mut seq, "l3", "len", 46_u16.into());
    expect_field(&mut builder, &mut seq, "l3", "p", 17_u8.into());
    builder
        .expect_finish()
        .times(1)
        .in_sequence(&mut seq)
        .returning(StreamDescriptor::new);

    let descriptor = generate_stream(builder, &request).expect("stream should build");

    assert!(descriptor.layers().is_empty());
}

#[rstest]
fn unsupported_l3_stops_before_the_network_layer(mut request: TrafficConfigRequest) {
    request.l3_protocol = "arp".to_owned();
    let mut builder = MockPacketBuilder::new();
    builder
        .expect_add_layer()
        .withf(|name, _| name == "l2")
        .times(1)
        .returning(|_, _| Ok(()));
    builder
        .expect_set_layer_field()
        .times(3)
        .returning(|_, _, _| Ok(()));
    builder.expect_finish().times(0);

    let error = generate_stream(builder, &request).expect_err("arp is not buildable");

    assert_eq!(error.to_string(), "l3_protocol 'arp' is not supported yet");
}

#[rstest]
fn builder_failures_are_propagated(request: TrafficConfigRequest) {
    let mut builder = MockPacketBuilder::new();
    builder
        .expect_add_layer()
        .times(1)
        .returning(|name, _| Err(StreamDomainError::DuplicateLayer(name.to_owned())));
    builder.expect_set_layer_field().times(0);
    builder.expect_finish().times(0);

    let error = generate_stream(builder, &request).expect_err("builder rejects layer");

    assert_eq!(
        error,
        TrafficConfigError::Builder(StreamDomainError::DuplicateLayer("l2".to_owned()))
    );
}
