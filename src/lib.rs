//! hltapi: session and traffic control plane for a packet-generator server.
//!
//! This crate lets legacy HLT-style automation drive a software packet
//! generator. It opens a session, acquires ports with optional lock
//! stealing, reconciles batch responses into a single verdict, and
//! translates flat traffic parameters into layered stream descriptors.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure lifecycle and packet model with no transport concerns
//! - **Ports**: Trait interfaces for the generator connection and packet builder
//! - **Adapters**: Concrete implementations of ports (in-memory server, layer stack)
//!
//! # Modules
//!
//! - [`session`]: Connect, port acquisition, cleanup, and response aggregation
//! - [`traffic`]: Stream descriptor construction for traffic configuration
//! - [`error`]: Failure classification shared by both contexts

pub mod error;
pub mod session;
pub mod traffic;

pub use error::ErrorKind;
