//! Traffic configuration context.
//!
//! Turns flat legacy traffic parameters into layered stream descriptors.
//! Nothing here touches session state or the generator connection.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
