//! Output sockets and their owners.
//!
//! A socket belongs to exactly one source or exactly one step. The
//! [`SocketOwner`] variant carries that fact so callers match on it instead of
//! probing two optional lookups.

use crate::pipeline::id::{SocketId, SourceId, StepId};

/// The node an output socket belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SocketOwner {
    /// Output of a source (camera, file feed, ...).
    Source(SourceId),
    /// Output of a pipeline step.
    Step(StepId),
}

impl SocketOwner {
    #[inline]
    pub fn is_source(self) -> bool {
        matches!(self, SocketOwner::Source(_))
    }

    #[inline]
    pub fn is_step(self) -> bool {
        matches!(self, SocketOwner::Step(_))
    }

    /// The owning step, if this socket belongs to one.
    #[inline]
    pub fn step(self) -> Option<StepId> {
        match self {
            SocketOwner::Step(step) => Some(step),
            SocketOwner::Source(_) => None,
        }
    }

    /// The owning source, if this socket belongs to one.
    #[inline]
    pub fn source(self) -> Option<SourceId> {
        match self {
            SocketOwner::Source(source) => Some(source),
            SocketOwner::Step(_) => None,
        }
    }
}

/// An output socket as held by the pipeline model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSocket {
    pub id: SocketId,
    pub name: String,
    pub owner: SocketOwner,
    /// User-visible preview flag.
    pub previewed: bool,
}

impl OutputSocket {
    pub fn new(id: SocketId, name: impl Into<String>, owner: SocketOwner) -> Self {
        Self {
            id,
            name: name.into(),
            owner,
            previewed: false,
        }
    }
}
