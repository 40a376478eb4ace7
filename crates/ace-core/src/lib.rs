//! Node identity, the element registry and the scheduling contracts the
//! Ace frame engine consumes from its host.

pub mod collections;
mod element_register;
mod platform;

pub use element_register::ElementRegister;
pub use platform::{FrameScheduler, Task, TaskExecutor, TaskThread, TaskType};

/// Process-unique node identity.
pub type NodeId = i32;

/// Id carried by nodes that were never registered.
pub const INVALID_NODE_ID: NodeId = -1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeError {
    Missing { id: NodeId },
    TypeMismatch { id: NodeId, expected: &'static str },
    MissingContext { id: NodeId, reason: &'static str },
}

impl std::fmt::Display for NodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeError::Missing { id } => write!(f, "node {id} missing"),
            NodeError::TypeMismatch { id, expected } => {
                write!(f, "node {id} type mismatch; expected {expected}")
            }
            NodeError::MissingContext { id, reason } => {
                write!(f, "missing context for node {id}: {reason}")
            }
        }
    }
}

impl std::error::Error for NodeError {}
