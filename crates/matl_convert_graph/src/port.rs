// SPDX-License-Identifier: MIT OR Apache-2.0
//! Port definitions for node inputs/outputs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortId(pub Uuid);

impl PortId {
    /// Create a new random port ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PortId {
    fn default() -> Self {
        Self::new()
    }
}

/// Port direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PortDirection {
    /// Input port
    Input,
    /// Output port
    Output,
}

/// Data type that can flow through ports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PortType {
    /// Scalar value
    Float,
    /// RGBA color
    Color,
    /// 3D vector (UVs, normals, radii)
    Vector,
    /// Shader closure (BSDF, emission)
    Shader,
}

impl PortType {
    /// Check if this type can connect to another type
    pub fn can_connect_to(&self, other: &PortType) -> bool {
        match (self, other) {
            // Closures only flow into closure sockets
            (Self::Shader, Self::Shader) => true,
            (Self::Shader, _) | (_, Self::Shader) => false,
            // Data sockets convert implicitly between each other
            _ => true,
        }
    }
}

/// A port on a node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Port {
    /// Unique port ID
    pub id: PortId,
    /// Port name, unique among a node's inputs (or outputs)
    pub name: String,
    /// Port direction
    pub direction: PortDirection,
    /// Data type
    pub port_type: PortType,
    /// Value used while the input is unlinked
    pub default_value: Option<PortValue>,
    /// Whether multiple connections are allowed
    pub multi_connect: bool,
}

impl Port {
    /// Create a new input port
    pub fn input(name: impl Into<String>, port_type: PortType) -> Self {
        Self {
            id: PortId::new(),
            name: name.into(),
            direction: PortDirection::Input,
            port_type,
            default_value: None,
            multi_connect: false,
        }
    }

    /// Create a new output port
    pub fn output(name: impl Into<String>, port_type: PortType) -> Self {
        Self {
            id: PortId::new(),
            name: name.into(),
            direction: PortDirection::Output,
            port_type,
            default_value: None,
            multi_connect: true, // Outputs can feed any number of inputs
        }
    }

    /// Set the default value
    pub fn with_default(mut self, value: PortValue) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Check if a connection to another port is valid
    pub fn can_connect(&self, other: &Port) -> bool {
        if self.direction == other.direction {
            return false;
        }
        self.port_type.can_connect_to(&other.port_type)
    }
}

/// Value that can be stored in a port
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PortValue {
    /// Scalar
    Float(f32),
    /// RGBA color
    Color([f32; 4]),
    /// 3D vector
    Vector([f32; 3]),
}

impl PortValue {
    /// Get the port type for this value
    pub fn port_type(&self) -> PortType {
        match self {
            Self::Float(_) => PortType::Float,
            Self::Color(_) => PortType::Color,
            Self::Vector(_) => PortType::Vector,
        }
    }

    /// Read the value as a scalar, if it is one
    pub fn as_float(&self) -> Option<f32> {
        match self {
            Self::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Read the value as an RGBA color.
    ///
    /// Vectors widen with an alpha of 1.0; scalars are not colors.
    pub fn as_color(&self) -> Option<[f32; 4]> {
        match self {
            Self::Color(color) => Some(*color),
            Self::Vector([x, y, z]) => Some([*x, *y, *z, 1.0]),
            Self::Float(_) => None,
        }
    }
}
