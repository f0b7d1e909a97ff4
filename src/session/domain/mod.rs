//! Domain model for generator sessions and port acquisition.
//!
//! The session domain models port identifiers and their normalization,
//! remote batch responses and their aggregation, session phases, and the
//! caller-facing result contract. Transport concerns remain outside this
//! boundary.

mod config;
mod endpoint;
mod error;
mod handle;
mod ids;
mod interface;
mod outcome;
mod phase;
mod port_list;
mod response;

pub use config::SessionConfig;
pub use endpoint::{DEFAULT_CONTROL_PORT, SessionEndpoint};
pub use error::{AggregationError, ParseSessionPhaseError, PortListError, SessionDomainError};
pub use handle::PortHandleMap;
pub use ids::{PortId, SessionId};
pub use interface::InterfaceMode;
pub use outcome::{HltResult, STATUS_FAILURE, STATUS_SUCCESS};
pub use phase::SessionPhase;
pub use port_list::{ALL_PORTS, PortItem, PortList, PortSelection};
pub use response::{
    BatchResponse, OperationResult, RemoteResponse, join_batch_response, process_response,
};
