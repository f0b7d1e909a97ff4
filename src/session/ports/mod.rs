//! Port contracts for generator session orchestration.

mod transport;

#[cfg(test)]
pub use transport::MockGeneratorClient;
pub use transport::{
    GeneratorClient, GeneratorTransport, GeneratorTransportError, GeneratorTransportResult,
};
