//! Generator session and port-acquisition lifecycle.
//!
//! This module establishes a connection to a packet-generator server,
//! acquires a set of ports atomically (rolling back partial acquisitions),
//! optionally clears their traffic configuration, and releases them again.
//! Per-port batch results are reduced into a single pass/fail verdict with
//! a diagnostic log. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
