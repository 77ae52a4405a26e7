//! Errors raised by world and body operations.

use std::fmt;

/// Invariant violations. These point at a construction bug in the caller,
/// nothing here is retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// A contact test was asked of a body that has no collision shape.
    MissingShape { id: u32 },
    /// No live body carries this id.
    UnknownBody { id: u32 },
    /// A body (or its swim controller) was given a density that is not
    /// positive and finite; buoyancy divides by it.
    InvalidDensity { id: u32 },
    /// Every entity id has been handed out.
    IdsExhausted,
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::MissingShape { id } => {
                write!(f, "body {} has no collision shape", id)
            }
            SimError::UnknownBody { id } => write!(f, "no body with id {}", id),
            SimError::InvalidDensity { id } => {
                write!(f, "body {} needs a positive, finite density", id)
            }
            SimError::IdsExhausted => write!(f, "no entity ids left"),
        }
    }
}

impl std::error::Error for SimError {}
