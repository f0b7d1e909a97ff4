//! Adapter implementations for generator session ports.

pub mod memory;

pub use memory::{InMemoryGeneratorClient, InMemoryGeneratorServer, RecordedCall};
