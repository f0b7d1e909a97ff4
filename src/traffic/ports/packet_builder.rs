//! Packet construction port used by the stream descriptor builder.

use crate::traffic::domain::{FieldValue, LayerKind, StreamDescriptor, StreamDomainError};

/// Incrementally assembles a layered packet.
#[cfg_attr(test, mockall::automock)]
pub trait PacketBuilder {
    /// Adds a named layer on top of the stack.
    ///
    /// # Errors
    ///
    /// Returns [`StreamDomainError`] when the layer cannot be added.
    fn add_layer(&mut self, name: &str, kind: LayerKind) -> Result<(), StreamDomainError>;

    /// Assigns a field on an existing layer.
    ///
    /// # Errors
    ///
    /// Returns [`StreamDomainError`] when the layer or field is unknown, or
    /// the value has the wrong type.
    fn set_layer_field(
        &mut self,
        name: &str,
        field: &str,
        value: FieldValue,
    ) -> Result<(), StreamDomainError>;

    /// Consumes the builder and returns the finished descriptor.
    fn finish(self) -> StreamDescriptor;
}
