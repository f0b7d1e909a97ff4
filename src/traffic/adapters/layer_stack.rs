//! Packet builder backed by an in-process layer stack.

use crate::traffic::{
    domain::{FieldValue, LayerKind, StreamDescriptor, StreamDomainError},
    ports::PacketBuilder,
};

/// Builds a [`StreamDescriptor`] directly, with schema checks on every
/// field assignment.
#[derive(Debug, Clone, Default)]
pub struct LayerStackBuilder {
    descriptor: StreamDescriptor,
}

impl LayerStackBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            descriptor: StreamDescriptor::new(),
        }
    }
}

impl PacketBuilder for LayerStackBuilder {
    fn add_layer(&mut self, name: &str, kind: LayerKind) -> Result<(), StreamDomainError> {
        self.descriptor.add_layer(name, kind)
    }

    fn set_layer_field(
        &mut self,
        name: &str,
        field: &str,
        value: FieldValue,
    ) -> Result<(), StreamDomainError> {
        self.descriptor.set_layer_field(name, field, value)
    }

    fn finish(self) -> StreamDescriptor {
        self.descriptor
    }
}
