//! Layered stream description.

use super::{FieldValue, Layer, LayerKind, StreamDomainError};
use serde::Serialize;

/// Ordered stack of protocol layers, outermost first.
///
/// Each layer name is added once; fields can only be set on layers that
/// already exist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StreamDescriptor {
    layers: Vec<Layer>,
}

impl StreamDescriptor {
    /// Creates an empty descriptor.
    #[must_use]
    pub const fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Appends a new layer.
    ///
    /// # Errors
    ///
    /// Returns [`StreamDomainError::DuplicateLayer`] when `name` is taken.
    pub fn add_layer(&mut self, name: &str, kind: LayerKind) -> Result<(), StreamDomainError> {
        if self.layer(name).is_some() {
            return Err(StreamDomainError::DuplicateLayer(name.to_owned()));
        }
        self.layers.push(Layer::new(name, kind));
        Ok(())
    }

    /// Assigns a field on the named layer.
    ///
    /// # Errors
    ///
    /// Returns [`StreamDomainError::MissingLayer`] when no layer is named
    /// `name`, or the layer's own field validation error.
    pub fn set_layer_field(
        &mut self,
        name: &str,
        field: &str,
        value: impl Into<FieldValue>,
    ) -> Result<(), StreamDomainError> {
        self.layers
            .iter_mut()
            .find(|layer| layer.name() == name)
            .ok_or_else(|| StreamDomainError::MissingLayer(name.to_owned()))?
            .set_field(field, value.into())
    }

    /// Returns the named layer.
    #[must_use]
    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.name() == name)
    }

    /// Returns every layer, outermost first.
    #[must_use]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }
}
