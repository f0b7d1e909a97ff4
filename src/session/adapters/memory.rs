//! In-memory generator server adapter for session lifecycle tests.

use crate::session::{
    domain::{BatchResponse, OperationResult, PortId, SessionEndpoint},
    ports::{GeneratorClient, GeneratorTransport, GeneratorTransportError, GeneratorTransportResult},
};
use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Remote call observed by the in-memory server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    /// A connection attempt by `username`.
    Connect {
        /// Client identity.
        username: String,
    },
    /// A batch acquire.
    Acquire {
        /// Requested ports.
        ports: Vec<PortId>,
        /// Force-override flag.
        force: bool,
    },
    /// A batch release.
    Release {
        /// Requested ports.
        ports: Vec<PortId>,
    },
    /// A batch stream removal.
    RemoveAllStreams {
        /// Requested ports.
        ports: Vec<PortId>,
    },
    /// A held-ports query.
    GetAcquiredPorts,
    /// A disconnect.
    Disconnect,
}

/// Simulated packet-generator server.
///
/// Models port locks, per-port stream counts, and connection bookkeeping
/// without any network I/O. Locks survive disconnects, as they do on a real
/// server, so tests can observe ports leaked by a client.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGeneratorServer {
    state: Arc<RwLock<ServerState>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct LockOwner {
    connection: u64,
    username: String,
}

#[derive(Debug, Default)]
struct ServerState {
    ports: BTreeSet<PortId>,
    owners: BTreeMap<PortId, LockOwner>,
    streams: BTreeMap<PortId, usize>,
    refusal: Option<String>,
    failing_resets: BTreeSet<PortId>,
    failing_releases: BTreeSet<PortId>,
    open_connections: HashMap<u64, String>,
    next_connection: u64,
    calls: Vec<RecordedCall>,
}

impl InMemoryGeneratorServer {
    /// Creates a server exposing `ports`.
    #[must_use]
    pub fn with_ports(ports: impl IntoIterator<Item = u32>) -> Self {
        let server = Self::default();
        if let Ok(mut state) = server.state.write() {
            state.ports = ports.into_iter().map(PortId::new).collect();
        }
        server
    }

    /// Makes every subsequent connection attempt fail with `reason`.
    ///
    /// # Errors
    ///
    /// Returns runtime errors when lock acquisition fails.
    pub fn refuse_connections(&self, reason: impl Into<String>) -> GeneratorTransportResult<()> {
        self.write()?.refusal = Some(reason.into());
        Ok(())
    }

    /// Locks `port` on behalf of a foreign client named `owner`.
    ///
    /// # Errors
    ///
    /// Returns runtime errors when lock acquisition fails.
    pub fn lock_port(&self, port: u32, owner: impl Into<String>) -> GeneratorTransportResult<()> {
        let mut state = self.write()?;
        let connection = state.allocate_connection();
        state.owners.insert(
            PortId::new(port),
            LockOwner {
                connection,
                username: owner.into(),
            },
        );
        Ok(())
    }

    /// Configures `count` streams on `port`.
    ///
    /// # Errors
    ///
    /// Returns runtime errors when lock acquisition fails.
    pub fn seed_streams(&self, port: u32, count: usize) -> GeneratorTransportResult<()> {
        self.write()?.streams.insert(PortId::new(port), count);
        Ok(())
    }

    /// Makes stream removal fail on `port`.
    ///
    /// # Errors
    ///
    /// Returns runtime errors when lock acquisition fails.
    pub fn fail_reset_on(&self, port: u32) -> GeneratorTransportResult<()> {
        self.write()?.failing_resets.insert(PortId::new(port));
        Ok(())
    }

    /// Makes lock release fail on `port`.
    ///
    /// # Errors
    ///
    /// Returns runtime errors when lock acquisition fails.
    pub fn fail_release_on(&self, port: u32) -> GeneratorTransportResult<()> {
        self.write()?.failing_releases.insert(PortId::new(port));
        Ok(())
    }

    /// Returns every locked port regardless of owner.
    ///
    /// # Errors
    ///
    /// Returns runtime errors when lock acquisition fails.
    pub fn locked_ports(&self) -> GeneratorTransportResult<Vec<PortId>> {
        Ok(self.read()?.owners.keys().copied().collect())
    }

    /// Returns the username holding `port`, if any.
    ///
    /// # Errors
    ///
    /// Returns runtime errors when lock acquisition fails.
    pub fn owner_of(&self, port: u32) -> GeneratorTransportResult<Option<String>> {
        Ok(self
            .read()?
            .owners
            .get(&PortId::new(port))
            .map(|owner| owner.username.clone()))
    }

    /// Returns the number of streams configured on `port`.
    ///
    /// # Errors
    ///
    /// Returns runtime errors when lock acquisition fails.
    pub fn stream_count(&self, port: u32) -> GeneratorTransportResult<usize> {
        Ok(self
            .read()?
            .streams
            .get(&PortId::new(port))
            .copied()
            .unwrap_or_default())
    }

    /// Returns the number of connections that have not disconnected.
    ///
    /// # Errors
    ///
    /// Returns runtime errors when lock acquisition fails.
    pub fn open_connections(&self) -> GeneratorTransportResult<usize> {
        Ok(self.read()?.open_connections.len())
    }

    /// Returns every remote call observed so far, in order.
    ///
    /// # Errors
    ///
    /// Returns runtime errors when lock acquisition fails.
    pub fn calls(&self) -> GeneratorTransportResult<Vec<RecordedCall>> {
        Ok(self.read()?.calls.clone())
    }

    fn read(&self) -> GeneratorTransportResult<RwLockReadGuard<'_, ServerState>> {
        self.state
            .read()
            .map_err(|err| GeneratorTransportError::runtime(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> GeneratorTransportResult<RwLockWriteGuard<'_, ServerState>> {
        self.state
            .write()
            .map_err(|err| GeneratorTransportError::runtime(std::io::Error::other(err.to_string())))
    }
}

impl ServerState {
    const fn allocate_connection(&mut self) -> u64 {
        self.next_connection += 1;
        self.next_connection
    }

    fn acquire_one(&mut self, port: PortId, owner: &LockOwner, force: bool) -> OperationResult {
        if !self.ports.contains(&port) {
            return OperationResult::failure(format!("port {port} does not exist"));
        }

        match self.owners.get(&port) {
            Some(current) if current.connection == owner.connection => {
                OperationResult::success(format!("port {port} already owned"))
            }
            Some(current) if !force => OperationResult::failure(format!(
                "port {port} is owned by '{}'",
                current.username
            )),
            Some(current) => {
                let previous = current.username.clone();
                self.owners.insert(port, owner.clone());
                OperationResult::success(format!("port {port} acquired (lock taken from '{previous}')"))
            }
            None => {
                self.owners.insert(port, owner.clone());
                OperationResult::success(format!("port {port} acquired"))
            }
        }
    }

    fn release_one(&mut self, port: PortId, connection: u64) -> OperationResult {
        if self.failing_releases.contains(&port) {
            return OperationResult::failure(format!("port {port} release rejected by server"));
        }

        match self.owners.get(&port) {
            Some(current) if current.connection == connection => {
                self.owners.remove(&port);
                OperationResult::success(format!("port {port} released"))
            }
            _ => OperationResult::failure(format!("port {port} is not owned by this session")),
        }
    }

    fn remove_streams_one(&mut self, port: PortId, connection: u64) -> OperationResult {
        let is_owner = self
            .owners
            .get(&port)
            .is_some_and(|current| current.connection == connection);
        if !is_owner {
            return OperationResult::failure(format!("port {port} is not owned by this session"));
        }

        if self.failing_resets.contains(&port) {
            return OperationResult::failure(format!("port {port} failed to remove streams"));
        }

        let removed = self.streams.remove(&port).unwrap_or_default();
        OperationResult::success(format!("port {port} removed {removed} streams"))
    }
}

#[async_trait]
impl GeneratorTransport for InMemoryGeneratorServer {
    type Client = InMemoryGeneratorClient;

    async fn connect(&self, endpoint: &SessionEndpoint) -> GeneratorTransportResult<Self::Client> {
        let mut state = self.write()?;
        state.calls.push(RecordedCall::Connect {
            username: endpoint.username().to_owned(),
        });

        if let Some(reason) = state.refusal.clone() {
            return Err(GeneratorTransportError::ConnectionRefused {
                endpoint: endpoint.to_string(),
                reason,
            });
        }

        let connection = state.allocate_connection();
        state
            .open_connections
            .insert(connection, endpoint.username().to_owned());

        Ok(InMemoryGeneratorClient {
            server: self.clone(),
            owner: LockOwner {
                connection,
                username: endpoint.username().to_owned(),
            },
        })
    }
}

/// Client connection handed out by [`InMemoryGeneratorServer`].
#[derive(Debug, Clone)]
pub struct InMemoryGeneratorClient {
    server: InMemoryGeneratorServer,
    owner: LockOwner,
}

impl InMemoryGeneratorClient {
    fn open_state(&self) -> GeneratorTransportResult<RwLockWriteGuard<'_, ServerState>> {
        let state = self.server.write()?;
        if !state.open_connections.contains_key(&self.owner.connection) {
            return Err(GeneratorTransportError::Closed);
        }
        Ok(state)
    }
}

#[async_trait]
impl GeneratorClient for InMemoryGeneratorClient {
    async fn acquire(
        &self,
        ports: &[PortId],
        force: bool,
    ) -> GeneratorTransportResult<BatchResponse> {
        let mut state = self.open_state()?;
        state.calls.push(RecordedCall::Acquire {
            ports: ports.to_vec(),
            force,
        });
        let results = ports
            .iter()
            .map(|port| state.acquire_one(*port, &self.owner, force))
            .collect();
        Ok(BatchResponse::from_results(results))
    }

    async fn release(&self, ports: &[PortId]) -> GeneratorTransportResult<BatchResponse> {
        let mut state = self.open_state()?;
        state.calls.push(RecordedCall::Release {
            ports: ports.to_vec(),
        });
        let results = ports
            .iter()
            .map(|port| state.release_one(*port, self.owner.connection))
            .collect();
        Ok(BatchResponse::from_results(results))
    }

    async fn remove_all_streams(
        &self,
        ports: &[PortId],
    ) -> GeneratorTransportResult<BatchResponse> {
        let mut state = self.open_state()?;
        state.calls.push(RecordedCall::RemoveAllStreams {
            ports: ports.to_vec(),
        });
        let results = ports
            .iter()
            .map(|port| state.remove_streams_one(*port, self.owner.connection))
            .collect();
        Ok(BatchResponse::from_results(results))
    }

    async fn get_acquired_ports(&self) -> GeneratorTransportResult<Vec<PortId>> {
        let mut state = self.open_state()?;
        state.calls.push(RecordedCall::GetAcquiredPorts);
        Ok(state
            .owners
            .iter()
            .filter(|(_, owner)| owner.connection == self.owner.connection)
            .map(|(port, _)| *port)
            .collect())
    }

    async fn disconnect(&self) -> GeneratorTransportResult<()> {
        let mut state = self.open_state()?;
        state.calls.push(RecordedCall::Disconnect);
        state.open_connections.remove(&self.owner.connection);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn endpoint(username: &str) -> SessionEndpoint {
        SessionEndpoint::new("trex-a", 5050, username).expect("valid endpoint")
    }

    fn ids(values: &[u32]) -> Vec<PortId> {
        values.iter().copied().map(PortId::new).collect()
    }

    #[fixture]
    fn server() -> InMemoryGeneratorServer {
        InMemoryGeneratorServer::with_ports([0, 1, 2, 3])
    }

    #[rstest]
    #[tokio::test(flavor = "multi_thread")]
    async fn foreign_lock_blocks_unless_forced(server: InMemoryGeneratorServer) {
        server.lock_port(1, "other").expect("lock setup");
        let client = server.connect(&endpoint("tester")).await.expect("connect");

        let blocked = client.acquire(&ids(&[1]), false).await.expect("acquire call");
        assert!(!blocked.is_success());
        assert_eq!(server.owner_of(1).expect("owner"), Some("other".to_owned()));

        let forced = client.acquire(&ids(&[1]), true).await.expect("acquire call");
        assert!(forced.is_success());
        assert_eq!(server.owner_of(1).expect("owner"), Some("tester".to_owned()));
    }

    #[rstest]
    #[tokio::test(flavor = "multi_thread")]
    async fn locks_survive_disconnect(server: InMemoryGeneratorServer) {
        let client = server.connect(&endpoint("tester")).await.expect("connect");
        client.acquire(&ids(&[0, 2]), false).await.expect("acquire call");

        client.disconnect().await.expect("disconnect");

        assert_eq!(server.locked_ports().expect("locks"), ids(&[0, 2]));
        assert_eq!(server.open_connections().expect("connections"), 0);
        assert!(matches!(
            client.get_acquired_ports().await,
            Err(GeneratorTransportError::Closed)
        ));
    }

    #[rstest]
    #[tokio::test(flavor = "multi_thread")]
    async fn remove_all_streams_requires_ownership(server: InMemoryGeneratorServer) {
        server.seed_streams(3, 4).expect("seed");
        let client = server.connect(&endpoint("tester")).await.expect("connect");

        let refused = client.remove_all_streams(&ids(&[3])).await.expect("call");
        assert!(!refused.is_success());
        assert_eq!(server.stream_count(3).expect("count"), 4);

        client.acquire(&ids(&[3]), false).await.expect("acquire call");
        let removed = client.remove_all_streams(&ids(&[3])).await.expect("call");
        assert!(removed.is_success());
        assert_eq!(server.stream_count(3).expect("count"), 0);
    }

    #[rstest]
    #[tokio::test(flavor = "multi_thread")]
    async fn refused_connection_reports_endpoint(server: InMemoryGeneratorServer) {
        server.refuse_connections("server busy").expect("setup");

        let error = server
            .connect(&endpoint("tester"))
            .await
            .expect_err("connection should be refused");

        assert_eq!(
            error.to_string(),
            "connection to tester@trex-a:5050 refused: server busy"
        );
        assert_eq!(error.kind(), crate::error::ErrorKind::ConnectionFailure);
    }
}
