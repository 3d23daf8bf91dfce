// SPDX-License-Identifier: MIT OR Apache-2.0
//! Connections (links) between node sockets.

use crate::node::NodeId;
use crate::port::PortId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionId(pub Uuid);

impl ConnectionId {
    /// Create a new random connection ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

/// One end of a connection: a socket on a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    /// Owning node
    pub node: NodeId,
    /// Socket on that node
    pub port: PortId,
}

/// A directed link from an output socket to an input socket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
    /// Unique connection ID
    pub id: ConnectionId,
    /// Upstream output socket
    pub from: Endpoint,
    /// Downstream input socket
    pub to: Endpoint,
}

impl Connection {
    /// Create a new connection
    pub fn new(from: Endpoint, to: Endpoint) -> Self {
        Self {
            id: ConnectionId::new(),
            from,
            to,
        }
    }

    /// Check if this connection involves a specific node
    pub fn involves_node(&self, node_id: NodeId) -> bool {
        self.from.node == node_id || self.to.node == node_id
    }

    /// Check if this connection ends at the given input socket
    pub fn feeds(&self, port_id: PortId) -> bool {
        self.to.port == port_id
    }

    /// Check if this connection starts at the given output socket
    pub fn drains(&self, port_id: PortId) -> bool {
        self.from.port == port_id
    }
}
