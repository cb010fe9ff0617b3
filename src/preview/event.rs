//! Change notifications consumed by the sequencer.

use crate::pipeline::{SocketId, SourceId, StepId};

/// Pipeline change that may affect the preview strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewEvent {
    /// A socket's preview flag changed.
    PreviewToggled { socket: SocketId, is_previewed: bool },
    /// `step` was already moved by `distance` positions (negative = earlier).
    StepRelocated { step: StepId, distance: isize },
    /// A source and all its sockets left the pipeline.
    SourceRemoved { source: SourceId },
    /// A step and all its sockets left the pipeline.
    StepRemoved { step: StepId },
}
