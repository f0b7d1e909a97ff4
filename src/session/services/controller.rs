//! Service layer for the generator session lifecycle.
//!
//! A controller owns at most one live session. Every lifecycle operation
//! holds the session lock for its whole duration, so the connection handle
//! and the acquired-port set are never observed half-updated.

use crate::error::ErrorKind;
use crate::session::{
    domain::{
        BatchResponse, HltResult, InterfaceMode, PortHandleMap, PortId, PortList, PortListError,
        PortSelection, RemoteResponse, SessionConfig, SessionDomainError, SessionEndpoint,
        SessionId, SessionPhase, process_response,
    },
    ports::{GeneratorClient, GeneratorTransport, GeneratorTransportResult},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

/// Request payload for establishing a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectRequest {
    device: String,
    port_list: PortList,
    username: String,
    control_port: Option<u16>,
    reset: Option<bool>,
    break_locks: Option<bool>,
}

impl ConnectRequest {
    /// Creates a request with the required connection fields.
    #[must_use]
    pub fn new(
        device: impl Into<String>,
        port_list: impl Into<PortList>,
        username: impl Into<String>,
    ) -> Self {
        Self {
            device: device.into(),
            port_list: port_list.into(),
            username: username.into(),
            control_port: None,
            reset: None,
            break_locks: None,
        }
    }

    /// Sets the server control port.
    #[must_use]
    pub const fn with_control_port(mut self, control_port: u16) -> Self {
        self.control_port = Some(control_port);
        self
    }

    /// Requests removal of all configured traffic after acquisition.
    #[must_use]
    pub const fn with_reset(mut self, reset: bool) -> Self {
        self.reset = Some(reset);
        self
    }

    /// Requests stealing port locks held by other clients.
    #[must_use]
    pub const fn with_break_locks(mut self, break_locks: bool) -> Self {
        self.break_locks = Some(break_locks);
        self
    }

    /// Returns the device address as given.
    #[must_use]
    pub fn device(&self) -> &str {
        &self.device
    }

    /// Returns the client identity as given.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }
}

/// Snapshot of the controller's live session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionInfo {
    /// Session identifier.
    pub id: SessionId,
    /// Connected endpoint.
    pub endpoint: SessionEndpoint,
    /// Current phase.
    pub phase: SessionPhase,
    /// Ports acquired by `connect`, in request order.
    pub acquired_ports: Vec<PortId>,
    /// Time the connection was established.
    pub connected_at: DateTime<Utc>,
}

/// Errors raised before any remote call is made.
///
/// Remote failures never surface here; they are reported in-band through
/// [`HltResult`].
#[derive(Debug, Error)]
pub enum SessionControllerError {
    /// Domain validation or lifecycle-state check failed.
    #[error(transparent)]
    Domain(#[from] SessionDomainError),
    /// The port list could not be normalized.
    #[error(transparent)]
    PortList(#[from] PortListError),
}

impl SessionControllerError {
    /// Returns the failure category.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(err) => err.kind(),
            Self::PortList(err) => err.kind(),
        }
    }
}

/// Result type for session controller operations.
pub type SessionControllerResult<T> = Result<T, SessionControllerError>;

struct LiveSession<C> {
    id: SessionId,
    endpoint: SessionEndpoint,
    client: C,
    phase: SessionPhase,
    acquired: Vec<PortId>,
    connected_at: DateTime<Utc>,
}

impl<C> LiveSession<C> {
    fn transition_to(&mut self, target: SessionPhase) -> Result<(), SessionDomainError> {
        if !self.phase.can_transition_to(target) {
            return Err(SessionDomainError::InvalidPhaseTransition {
                from: self.phase,
                to: target,
            });
        }
        self.phase = target;
        Ok(())
    }

    fn info(&self) -> SessionInfo {
        SessionInfo {
            id: self.id,
            endpoint: self.endpoint.clone(),
            phase: self.phase,
            acquired_ports: self.acquired.clone(),
            connected_at: self.connected_at,
        }
    }
}

/// Failed lifecycle step awaiting teardown.
struct StepFailure {
    kind: ErrorKind,
    log: String,
    rollback: Vec<PortId>,
}

/// Generator session lifecycle controller.
pub struct SessionController<T, C>
where
    T: GeneratorTransport,
    C: Clock + Send + Sync,
{
    transport: Arc<T>,
    clock: Arc<C>,
    config: SessionConfig,
    state: Mutex<Option<LiveSession<T::Client>>>,
}

impl<T, C> SessionController<T, C>
where
    T: GeneratorTransport,
    C: Clock + Send + Sync,
{
    /// Creates a controller with default configuration.
    #[must_use]
    pub fn new(transport: Arc<T>, clock: Arc<C>) -> Self {
        Self::with_config(transport, clock, SessionConfig::default())
    }

    /// Creates a controller with custom configuration.
    #[must_use]
    pub fn with_config(transport: Arc<T>, clock: Arc<C>, config: SessionConfig) -> Self {
        Self {
            transport,
            clock,
            config,
            state: Mutex::new(None),
        }
    }

    /// Returns the controller configuration.
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Returns the current lifecycle phase.
    pub async fn phase(&self) -> SessionPhase {
        self.state
            .lock()
            .await
            .as_ref()
            .map_or(SessionPhase::Disconnected, |session| session.phase)
    }

    /// Returns a snapshot of the live session, if any.
    pub async fn session_info(&self) -> Option<SessionInfo> {
        self.state.lock().await.as_ref().map(LiveSession::info)
    }

    /// Connects to the generator and acquires the requested ports.
    ///
    /// On any remote failure every port this call managed to lock is
    /// released again and the connection is closed, so the controller is
    /// left fully disconnected.
    ///
    /// # Errors
    ///
    /// Returns [`SessionControllerError`] when a session is already live,
    /// the endpoint is blank, or the port list is malformed. Remote failures
    /// are reported as a `status = 0` [`HltResult`].
    #[instrument(
        skip(self, request),
        fields(device = %request.device(), username = %request.username())
    )]
    pub async fn connect(&self, request: ConnectRequest) -> SessionControllerResult<HltResult> {
        let mut state = self.state.lock().await;
        if let Some(session) = state.as_ref() {
            return Err(SessionDomainError::AlreadyConnected {
                phase: session.phase,
            }
            .into());
        }

        let ports = request.port_list.normalize()?;
        let endpoint = SessionEndpoint::new(
            request.device,
            request
                .control_port
                .unwrap_or(self.config.default_control_port),
            request.username,
        )?;
        let reset = request.reset.unwrap_or(self.config.reset_on_connect);
        let break_locks = request.break_locks.unwrap_or(self.config.break_locks);

        let client = match self.transport.connect(&endpoint).await {
            Ok(client) => client,
            Err(err) => {
                warn!(endpoint = %endpoint, error = %err, "connection to generator failed");
                return Ok(HltResult::failure(
                    ErrorKind::ConnectionFailure,
                    err.to_string(),
                ));
            }
        };

        let mut session = LiveSession {
            id: SessionId::new(),
            endpoint,
            client,
            phase: SessionPhase::Disconnected,
            acquired: Vec::new(),
            connected_at: self.clock.utc(),
        };
        session.transition_to(SessionPhase::Connected)?;

        if let Err(failure) = Self::acquire_ports(&mut session, &ports, break_locks).await {
            return Ok(Self::teardown(session, failure).await);
        }

        if reset && let Err(failure) = Self::reset_ports(&session).await {
            return Ok(Self::teardown(session, failure).await);
        }

        let port_handle = PortHandleMap::identity(session.endpoint.device(), &session.acquired);
        info!(
            session_id = %session.id,
            ports = ?session.acquired,
            reset,
            break_locks,
            "generator session established"
        );
        *state = Some(session);
        Ok(HltResult::connected(port_handle))
    }

    /// Releases ports and closes the live session.
    ///
    /// [`PortSelection::All`] is resolved against the server's view of the
    /// ports this session holds, queried at call time. With `maintain_lock`
    /// the ports stay locked and only the connection is closed.
    ///
    /// Once the port selection is valid the connection is always closed,
    /// even when the release fails; the failure is reported in the result.
    ///
    /// # Errors
    ///
    /// Returns [`SessionControllerError`] when no session is live or the
    /// port list is malformed. Remote failures are reported as a
    /// `status = 0` [`HltResult`].
    #[instrument(skip(self, selection))]
    pub async fn cleanup_session(
        &self,
        selection: impl Into<PortSelection>,
        maintain_lock: bool,
    ) -> SessionControllerResult<HltResult> {
        let mut state = self.state.lock().await;
        let explicit_ports = match selection.into() {
            PortSelection::All => None,
            PortSelection::Ports(list) => Some(list.normalize()?),
        };

        let Some(mut session) = state.take() else {
            return Err(SessionDomainError::NotConnected.into());
        };

        let result = if maintain_lock {
            HltResult::success()
        } else {
            match Self::release_ports(&session, explicit_ports).await {
                Ok(()) => HltResult::success(),
                Err(log) => {
                    warn!(session_id = %session.id, %log, "port release failed");
                    HltResult::failure(ErrorKind::RemoteOperationFailure, log)
                }
            }
        };

        Self::disconnect(&mut session).await;
        info!(
            session_id = %session.id,
            status = result.status(),
            maintain_lock,
            "generator session closed"
        );
        Ok(result)
    }

    /// Validates an interface configuration request.
    ///
    /// Interface configuration is not forwarded to the generator; a valid
    /// mode is accepted as a no-op and reported as success.
    ///
    /// # Errors
    ///
    /// Returns [`SessionDomainError::InvalidInterfaceMode`] when `mode` is
    /// not one of `config`, `modify`, or `destroy`.
    pub fn interface_config(
        &self,
        port_handle: &PortHandleMap,
        mode: &str,
    ) -> SessionControllerResult<HltResult> {
        let interface_mode = InterfaceMode::try_from(mode)?;
        debug!(
            mode = %interface_mode,
            devices = ?port_handle.devices().collect::<Vec<_>>(),
            "interface configuration accepted without remote changes"
        );
        Ok(HltResult::success())
    }

    async fn acquire_ports(
        session: &mut LiveSession<T::Client>,
        ports: &[PortId],
        break_locks: bool,
    ) -> Result<(), StepFailure> {
        let response = session.client.acquire(ports, break_locks).await;
        let log = evaluate_batch(ports, response, ErrorKind::AcquisitionFailure)?;
        debug!(session_id = %session.id, %log, "ports acquired");

        session.acquired = ports.to_vec();
        session
            .transition_to(SessionPhase::PortsAcquired)
            .map_err(|err| StepFailure {
                kind: ErrorKind::AcquisitionFailure,
                log: err.to_string(),
                rollback: ports.to_vec(),
            })
    }

    async fn reset_ports(session: &LiveSession<T::Client>) -> Result<(), StepFailure> {
        let response = session.client.remove_all_streams(&session.acquired).await;
        let log = evaluate_batch(&session.acquired, response, ErrorKind::RemoteOperationFailure)
            .map_err(|failure| StepFailure {
                rollback: session.acquired.clone(),
                ..failure
            })?;
        debug!(session_id = %session.id, %log, "port traffic removed");
        Ok(())
    }

    async fn release_ports(
        session: &LiveSession<T::Client>,
        explicit_ports: Option<Vec<PortId>>,
    ) -> Result<(), String> {
        let ports = match explicit_ports {
            Some(ports) => ports,
            None => session
                .client
                .get_acquired_ports()
                .await
                .map_err(|err| format!("failed to query acquired ports: {err}"))?,
        };

        let response = session.client.release(&ports).await;
        let log = evaluate_batch(&ports, response, ErrorKind::RemoteOperationFailure)
            .map_err(|failure| failure.log)?;
        debug!(session_id = %session.id, %log, "ports released");
        Ok(())
    }

    async fn teardown(mut session: LiveSession<T::Client>, failure: StepFailure) -> HltResult {
        let StepFailure {
            kind,
            mut log,
            rollback: taken,
        } = failure;
        let rollback = unique_in_order(&taken);
        warn!(
            session_id = %session.id,
            failure = %kind,
            %log,
            rollback = ?rollback,
            "session setup failed, rolling back"
        );

        if !rollback.is_empty() {
            let response = session.client.release(&rollback).await;
            if let Err(rollback_failure) =
                evaluate_batch(&rollback, response, ErrorKind::RemoteOperationFailure)
            {
                warn!(
                    session_id = %session.id,
                    log = %rollback_failure.log,
                    "rollback release failed"
                );
                log.push_str("\nrollback release failed:\n");
                log.push_str(&rollback_failure.log);
            }
        }

        Self::disconnect(&mut session).await;
        HltResult::failure(kind, log)
    }

    async fn disconnect(session: &mut LiveSession<T::Client>) {
        if let Err(err) = session.client.disconnect().await {
            warn!(session_id = %session.id, error = %err, "disconnect failed");
        }
        if let Err(err) = session.transition_to(SessionPhase::Disconnected) {
            warn!(session_id = %session.id, error = %err, "session already torn down");
        }
        session.acquired.clear();
    }
}

/// Aggregates a batch call, classifying every failure shape.
///
/// On failure the rollback set is the ports the batch reports as done; when
/// the batch cannot be trusted, every requested port is rolled back.
fn evaluate_batch(
    ports: &[PortId],
    response: GeneratorTransportResult<BatchResponse>,
    failure_kind: ErrorKind,
) -> Result<String, StepFailure> {
    let batch = response.map_err(|err| StepFailure {
        kind: failure_kind,
        log: err.to_string(),
        rollback: ports.to_vec(),
    })?;

    let succeeded = batch.succeeded_targets(ports);
    match process_response(ports, &RemoteResponse::from(batch)) {
        Ok((true, log)) => Ok(log),
        Ok((false, log)) => Err(StepFailure {
            kind: failure_kind,
            log,
            rollback: succeeded,
        }),
        Err(err) => Err(StepFailure {
            kind: err.kind(),
            log: err.to_string(),
            rollback: ports.to_vec(),
        }),
    }
}

/// Drops repeated ports, keeping the first occurrence of each.
fn unique_in_order(ports: &[PortId]) -> Vec<PortId> {
    let mut seen = HashSet::with_capacity(ports.len());
    ports.iter().copied().filter(|port| seen.insert(*port)).collect()
}
