//! Presentation-layer port handle map returned by `connect`.

use super::PortId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Maps device address to port identifier to port handle.
///
/// Only one device is supported per session, so the inner map is the
/// identity over the acquired ports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortHandleMap(BTreeMap<String, BTreeMap<PortId, PortId>>);

impl PortHandleMap {
    /// Builds the identity map for one device.
    #[must_use]
    pub fn identity(device: impl Into<String>, ports: &[PortId]) -> Self {
        let handles = ports.iter().map(|port| (*port, *port)).collect();
        Self(BTreeMap::from([(device.into(), handles)]))
    }

    /// Returns the handle for `port` on `device`.
    #[must_use]
    pub fn handle(&self, device: &str, port: PortId) -> Option<PortId> {
        self.0.get(device)?.get(&port).copied()
    }

    /// Returns the handles mapped for `device`, in port order.
    #[must_use]
    pub fn handles(&self, device: &str) -> Vec<PortId> {
        self.0
            .get(device)
            .map(|handles| handles.values().copied().collect())
            .unwrap_or_default()
    }

    /// Returns the devices present in the map.
    pub fn devices(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}
