//! Pipeline model as seen by the preview strip.
//!
//! A pipeline is an ordered list of sources followed by an ordered list of
//! steps. Sources and steps expose output sockets; each socket belongs to
//! exactly one of them.
//!
//! ```text
//! [Webcam] [File]  ──►  [Blur] ──► [Threshold] ──► [Find Contours]
//!   sources                 steps (user can reorder)
//! ```

pub mod id;
pub mod model;
pub mod ordering;
pub mod socket;

pub use id::{SocketId, SourceId, StepId};
pub use model::{PipelineModel, SourceNode, StepNode};
#[cfg(test)]
pub use ordering::MockPipelineOrdering;
pub use ordering::PipelineOrdering;
pub use socket::{OutputSocket, SocketOwner};
