//! Remote transport port for the packet-generator server.

use crate::error::ErrorKind;
use crate::session::domain::{BatchResponse, PortId, SessionEndpoint};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for generator transport operations.
pub type GeneratorTransportResult<T> = Result<T, GeneratorTransportError>;

/// Opens authenticated connections to a generator server.
#[async_trait]
pub trait GeneratorTransport: Send + Sync {
    /// Connected client type produced by this transport.
    type Client: GeneratorClient;

    /// Connects to `endpoint` as its user.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorTransportError::ConnectionRefused`] when the server
    /// rejects the connection, or a runtime error for transport faults.
    async fn connect(&self, endpoint: &SessionEndpoint) -> GeneratorTransportResult<Self::Client>;
}

/// Operations available on one live generator connection.
///
/// Batch calls are single round-trips; the returned per-port results follow
/// the order of `ports`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GeneratorClient: Send + Sync {
    /// Locks `ports` for this client, stealing foreign locks when `force`.
    async fn acquire(&self, ports: &[PortId], force: bool)
    -> GeneratorTransportResult<BatchResponse>;

    /// Releases locks held by this client on `ports`.
    async fn release(&self, ports: &[PortId]) -> GeneratorTransportResult<BatchResponse>;

    /// Removes every configured stream from `ports`.
    async fn remove_all_streams(&self, ports: &[PortId])
    -> GeneratorTransportResult<BatchResponse>;

    /// Returns the ports this client holds according to the server.
    async fn get_acquired_ports(&self) -> GeneratorTransportResult<Vec<PortId>>;

    /// Closes the connection.
    async fn disconnect(&self) -> GeneratorTransportResult<()>;
}

/// Errors returned by generator transport adapters.
#[derive(Debug, Clone, Error)]
pub enum GeneratorTransportError {
    /// The server refused or could not be reached.
    #[error("connection to {endpoint} refused: {reason}")]
    ConnectionRefused {
        /// Endpoint in `user@device:port` form.
        endpoint: String,
        /// Server or socket diagnostic.
        reason: String,
    },

    /// The connection is no longer usable.
    #[error("connection is closed")]
    Closed,

    /// Generic runtime failure.
    #[error("generator transport error: {0}")]
    Runtime(Arc<dyn std::error::Error + Send + Sync>),
}

impl GeneratorTransportError {
    /// Wraps a runtime error from the transport adapter.
    pub fn runtime(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Runtime(Arc::new(err))
    }

    /// Returns the failure category.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::ConnectionRefused { .. } => ErrorKind::ConnectionFailure,
            Self::Closed | Self::Runtime(_) => ErrorKind::RemoteOperationFailure,
        }
    }
}
