//! Read-only view of the pipeline's left-to-right order.

use crate::pipeline::id::{SocketId, SourceId, StepId};
use crate::pipeline::socket::SocketOwner;

/// Queries the preview sequencer makes against the pipeline model.
///
/// All answers reflect the order at call time. `None` means the node is not
/// part of the pipeline (anymore).
#[cfg_attr(test, mockall::automock)]
pub trait PipelineOrdering {
    /// Position of `source` among all sources.
    fn source_index(&self, source: SourceId) -> Option<usize>;

    /// Position of `step` among all steps.
    fn step_index(&self, step: StepId) -> Option<usize>;

    /// The node that owns `socket`.
    fn owner_of(&self, socket: SocketId) -> Option<SocketOwner>;
}
