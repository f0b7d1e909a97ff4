//! Port contracts for stream construction.

mod packet_builder;

#[cfg(test)]
pub use packet_builder::MockPacketBuilder;
pub use packet_builder::PacketBuilder;
