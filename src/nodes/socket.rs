//! Socket types and functionality for node connections

use serde::{Deserialize, Serialize};

use super::types::SocketType;

/// Direction of a socket (input or output).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SocketDirection {
    Input,
    Output,
}

/// A typed connection point on a node.
///
/// The `key` is unique within the owning node and is the identifier the
/// backend uses to read or write the socket's value. The `label` is only
/// display text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Socket {
    pub key: String,
    pub label: String,
    pub socket_type: String,
    pub direction: SocketDirection,
}

impl Socket {
    /// Creates a new socket of the given direction.
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        socket_type: &SocketType,
        direction: SocketDirection,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            socket_type: socket_type.name().to_string(),
            direction,
        }
    }

    /// Creates an input socket.
    pub fn input(
        key: impl Into<String>,
        label: impl Into<String>,
        socket_type: &SocketType,
    ) -> Self {
        Self::new(key, label, socket_type, SocketDirection::Input)
    }

    /// Creates an output socket.
    pub fn output(
        key: impl Into<String>,
        label: impl Into<String>,
        socket_type: &SocketType,
    ) -> Self {
        Self::new(key, label, socket_type, SocketDirection::Output)
    }

    /// Checks if this socket is an input
    pub fn is_input(&self) -> bool {
        matches!(self.direction, SocketDirection::Input)
    }

    /// Checks if this socket is an output
    pub fn is_output(&self) -> bool {
        matches!(self.direction, SocketDirection::Output)
    }
}
