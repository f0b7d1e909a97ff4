//! Adapter implementations for stream construction ports.

pub mod layer_stack;

pub use layer_stack::LayerStackBuilder;
