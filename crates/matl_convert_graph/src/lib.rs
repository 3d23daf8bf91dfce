// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shading node graph model for material conversion.
//!
//! This crate models the node graph a material is authored with:
//! - Typed input/output ports with default values
//! - Connections with single-source inputs
//! - A closed set of node kinds relevant to conversion
//! - Read-only inspection views over nodes and sockets
//!
//! ## Architecture
//!
//! The graph owns its nodes and connections in insertion order. All queries
//! used by the converter go through [`NodeRef`] and [`SocketRef`], which
//! borrow the graph and never mutate it. An unlinked socket or a missing
//! upstream node is an ordinary `None`, not an error.

pub mod connection;
pub mod graph;
pub mod image;
pub mod inspect;
pub mod node;
pub mod port;
pub mod shading;

pub use connection::{Connection, ConnectionId};
pub use graph::{ConnectionError, Graph};
pub use image::ImageHandle;
pub use inspect::{NodeRef, SocketRef};
pub use node::{AttributeType, Node, NodeId, NodeKind, RenderTarget};
pub use port::{Port, PortDirection, PortId, PortType, PortValue};
