// SPDX-License-Identifier: MIT OR Apache-2.0
//! Read-only views used to walk a graph.
//!
//! [`NodeRef`] and [`SocketRef`] pair a node or socket with the graph that
//! owns it, so following a link upstream is a method call instead of a
//! lookup chain. Every query is total: an unlinked socket, a socket name the
//! node does not have, or a link whose source node is gone all yield `None`.

use crate::graph::Graph;
use crate::node::{Node, NodeId, NodeKind};
use crate::port::{Port, PortDirection};

/// A node together with the graph it lives in
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'g> {
    graph: &'g Graph,
    node: &'g Node,
}

impl<'g> NodeRef<'g> {
    pub(crate) fn new(graph: &'g Graph, node: &'g Node) -> Self {
        Self { graph, node }
    }

    /// The underlying node
    pub fn node(&self) -> &'g Node {
        self.node
    }

    /// The node's ID
    pub fn id(&self) -> NodeId {
        self.node.id
    }

    /// The node's kind
    pub fn kind(&self) -> &'g NodeKind {
        &self.node.kind
    }

    /// The node's display name
    pub fn name(&self) -> &'g str {
        &self.node.name
    }

    /// View an input socket by name
    pub fn input(&self, name: &str) -> Option<SocketRef<'g>> {
        self.node.input(name).map(|port| self.socket(port))
    }

    /// View an output socket by name
    pub fn output(&self, name: &str) -> Option<SocketRef<'g>> {
        self.node.output(name).map(|port| self.socket(port))
    }

    fn socket(&self, port: &'g Port) -> SocketRef<'g> {
        SocketRef {
            graph: self.graph,
            port,
        }
    }
}

/// A socket together with its node and graph
#[derive(Debug, Clone, Copy)]
pub struct SocketRef<'g> {
    graph: &'g Graph,
    port: &'g Port,
}

impl<'g> SocketRef<'g> {
    /// The socket name
    pub fn name(&self) -> &'g str {
        &self.port.name
    }

    /// Number of links attached to this socket
    pub fn link_count(&self) -> usize {
        match self.port.direction {
            PortDirection::Input => self.graph.connections_to(self.port.id).count(),
            PortDirection::Output => self.graph.connections_from(self.port.id).count(),
        }
    }

    /// Whether at least one link is attached
    pub fn is_linked(&self) -> bool {
        self.link_count() > 0
    }

    /// Follow the first incoming link to the node feeding this input.
    ///
    /// Returns `None` for outputs, unlinked inputs, and links whose source
    /// node no longer exists.
    pub fn linked_node(&self) -> Option<NodeRef<'g>> {
        if self.port.direction != PortDirection::Input {
            return None;
        }
        let connection = self.graph.connections_to(self.port.id).next()?;
        self.graph.node_ref(connection.from.node)
    }

    /// The unlinked default as a scalar
    pub fn default_float(&self) -> Option<f32> {
        self.port.default_value.and_then(|v| v.as_float())
    }

    /// The unlinked default as an RGBA color
    pub fn default_color(&self) -> Option<[f32; 4]> {
        self.port.default_value.and_then(|v| v.as_color())
    }
}
