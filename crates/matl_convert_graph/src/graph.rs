// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph data structure containing nodes and connections.

use crate::connection::{Connection, ConnectionId, Endpoint};
use crate::inspect::NodeRef;
use crate::node::{Node, NodeId, NodeKind, RenderTarget};
use crate::port::{PortDirection, PortId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A shading node graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Graph {
    /// Graph name
    pub name: String,
    /// Nodes in the graph
    nodes: IndexMap<NodeId, Node>,
    /// Connections between nodes
    connections: IndexMap<ConnectionId, Connection>,
}

impl Graph {
    /// Create a new empty graph
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: IndexMap::new(),
            connections: IndexMap::new(),
        }
    }

    /// Add a node to the graph
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = node.id;
        self.nodes.insert(id, node);
        id
    }

    /// Add a node of the given kind with its standard sockets
    pub fn add(&mut self, kind: NodeKind) -> NodeId {
        self.add_node(Node::new(kind))
    }

    /// Remove a node and its connections
    pub fn remove_node(&mut self, node_id: NodeId) -> Option<Node> {
        self.connections.retain(|_, c| !c.involves_node(node_id));
        self.nodes.shift_remove(&node_id)
    }

    /// Get a node by ID
    pub fn node(&self, node_id: NodeId) -> Option<&Node> {
        self.nodes.get(&node_id)
    }

    /// Get a mutable node by ID
    pub fn node_mut(&mut self, node_id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&node_id)
    }

    /// Get a read-only inspection view of a node
    pub fn node_ref(&self, node_id: NodeId) -> Option<NodeRef<'_>> {
        self.node(node_id).map(|node| NodeRef::new(self, node))
    }

    /// Get all nodes, in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = NodeRef<'_>> {
        self.nodes.values().map(move |node| NodeRef::new(self, node))
    }

    /// Get the nodes whose kind matches a predicate
    pub fn nodes_of_kind<'g, F>(&'g self, mut matches: F) -> impl Iterator<Item = NodeRef<'g>>
    where
        F: FnMut(&NodeKind) -> bool + 'g,
    {
        self.nodes().filter(move |node| matches(&node.node().kind))
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Find the output node used when rendering with `target`.
    ///
    /// An output bound to exactly that engine wins over one bound to all
    /// engines. Among equals the first in graph order is used.
    pub fn output_node(&self, target: RenderTarget) -> Option<NodeRef<'_>> {
        let outputs = || {
            self.nodes.values().filter_map(|node| match node.kind {
                NodeKind::Output { target } => Some((node, target)),
                _ => None,
            })
        };

        outputs()
            .find(|(_, t)| *t == target)
            .or_else(|| outputs().find(|(_, t)| *t == RenderTarget::All))
            .map(|(node, _)| NodeRef::new(self, node))
    }

    /// Add a connection between ports
    pub fn connect(
        &mut self,
        from_node: NodeId,
        from_port: PortId,
        to_node: NodeId,
        to_port: PortId,
    ) -> Result<ConnectionId, ConnectionError> {
        let source_node = self.nodes.get(&from_node)
            .ok_or(ConnectionError::NodeNotFound(from_node))?;
        let target_node = self.nodes.get(&to_node)
            .ok_or(ConnectionError::NodeNotFound(to_node))?;

        let source_port = source_node.port(&from_port)
            .ok_or(ConnectionError::PortNotFound(from_port))?;
        let target_port = target_node.port(&to_port)
            .ok_or(ConnectionError::PortNotFound(to_port))?;

        if source_port.direction != PortDirection::Output
            || target_port.direction != PortDirection::Input
            || !source_port.can_connect(target_port)
        {
            return Err(ConnectionError::IncompatiblePorts);
        }

        // Inputs are single-source
        if !target_port.multi_connect && self.connections.values().any(|c| c.feeds(to_port)) {
            return Err(ConnectionError::PortAlreadyConnected(to_port));
        }

        if from_node == to_node {
            return Err(ConnectionError::SelfLoop);
        }

        let connection = Connection::new(
            Endpoint { node: from_node, port: from_port },
            Endpoint { node: to_node, port: to_port },
        );
        let id = connection.id;
        self.connections.insert(id, connection);
        Ok(id)
    }

    /// Connect sockets by name: `from_node.outputs[output]` to `to_node.inputs[input]`
    pub fn link(
        &mut self,
        from_node: NodeId,
        output: &str,
        to_node: NodeId,
        input: &str,
    ) -> Result<ConnectionId, ConnectionError> {
        let from_port = self.nodes.get(&from_node)
            .ok_or(ConnectionError::NodeNotFound(from_node))?
            .output(output)
            .ok_or_else(|| ConnectionError::SocketNotFound(output.to_string()))?
            .id;
        let to_port = self.nodes.get(&to_node)
            .ok_or(ConnectionError::NodeNotFound(to_node))?
            .input(input)
            .ok_or_else(|| ConnectionError::SocketNotFound(input.to_string()))?
            .id;
        self.connect(from_node, from_port, to_node, to_port)
    }

    /// Get connections leaving a specific output socket
    pub fn connections_from(&self, port_id: PortId) -> impl Iterator<Item = &Connection> {
        self.connections.values().filter(move |c| c.drains(port_id))
    }

    /// Get connections arriving at a specific input socket
    pub fn connections_to(&self, port_id: PortId) -> impl Iterator<Item = &Connection> {
        self.connections.values().filter(move |c| c.feeds(port_id))
    }

    /// Get the number of connections
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new("Shader Nodetree")
    }
}

/// Error when creating a connection
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    /// Node not found
    #[error("Node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// Port not found
    #[error("Port not found: {0:?}")]
    PortNotFound(PortId),

    /// No socket with that name on the node
    #[error("Socket not found: {0}")]
    SocketNotFound(String),

    /// Incompatible port types or directions
    #[error("Incompatible port types")]
    IncompatiblePorts,

    /// Input already has a source
    #[error("Port already connected: {0:?}")]
    PortAlreadyConnected(PortId),

    /// Self-loop not allowed
    #[error("Self-loop not allowed")]
    SelfLoop,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_by_name() {
        let mut graph = Graph::default();
        let tex = graph.add(NodeKind::image_texture("col.png"));
        let bsdf = graph.add(NodeKind::Principled);
        graph.link(tex, "Color", bsdf, "Base Color").unwrap();
        assert_eq!(graph.connection_count(), 1);
    }

    #[test]
    fn test_inputs_are_single_source() {
        let mut graph = Graph::default();
        let a = graph.add(NodeKind::image_texture("a.png"));
        let b = graph.add(NodeKind::image_texture("b.png"));
        let bsdf = graph.add(NodeKind::Principled);
        graph.link(a, "Color", bsdf, "Base Color").unwrap();
        let err = graph.link(b, "Color", bsdf, "Base Color").unwrap_err();
        assert!(matches!(err, ConnectionError::PortAlreadyConnected(_)));
    }

    #[test]
    fn test_shader_cannot_feed_color() {
        let mut graph = Graph::default();
        let bsdf = graph.add(NodeKind::Principled);
        let mix = graph.add(NodeKind::MixRgb);
        let err = graph.link(bsdf, "BSDF", mix, "Color1").unwrap_err();
        assert!(matches!(err, ConnectionError::IncompatiblePorts));
    }

    #[test]
    fn test_unknown_socket_name() {
        let mut graph = Graph::default();
        let tex = graph.add(NodeKind::image_texture("a.png"));
        let bsdf = graph.add(NodeKind::Principled);
        let err = graph.link(tex, "Colour", bsdf, "Base Color").unwrap_err();
        assert!(matches!(err, ConnectionError::SocketNotFound(name) if name == "Colour"));
    }

    #[test]
    fn test_remove_node_drops_connections() {
        let mut graph = Graph::default();
        let tex = graph.add(NodeKind::image_texture("a.png"));
        let bsdf = graph.add(NodeKind::Principled);
        graph.link(tex, "Color", bsdf, "Base Color").unwrap();
        graph.remove_node(tex);
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.connection_count(), 0);
    }

    #[test]
    fn test_output_node_prefers_exact_target() {
        let mut graph = Graph::default();
        let all = graph.add(NodeKind::output());
        let eevee = graph.add(NodeKind::Output {
            target: RenderTarget::Eevee,
        });
        assert_eq!(graph.output_node(RenderTarget::Eevee).map(|n| n.id()), Some(eevee));
        assert_eq!(graph.output_node(RenderTarget::Cycles).map(|n| n.id()), Some(all));
    }

    #[test]
    fn test_output_node_missing() {
        let mut graph = Graph::default();
        graph.add(NodeKind::Output {
            target: RenderTarget::Cycles,
        });
        assert!(graph.output_node(RenderTarget::Eevee).is_none());
    }
}
