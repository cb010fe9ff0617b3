//! # pipeline-previews: preview ordering for a visual pipeline editor
//!
//! Users of a pipeline editor can open a live preview for any output socket.
//! This crate keeps the strip of open previews in the same order as the
//! pipeline itself while previews are toggled and steps are reordered.
//!
//! ## Architecture
//!
//! - **Pipeline**: sources and steps with their output sockets, and the
//!   `PipelineOrdering` queries the sequencer needs
//! - **Preview**: the `PreviewSequencer`, which turns pipeline events into
//!   insert/remove instructions for the display layer
//! - **Bridge**: a crossbeam queue that moves events raised on other threads
//!   onto the thread owning the sequencer
//!
//! ## Example
//!
//! ```
//! use pipeline_previews::{
//!     pipeline::{PipelineModel, SocketId},
//!     preview::{apply_instructions, PreviewSequencer},
//! };
//!
//! let mut model = PipelineModel::new();
//! let (_, image) = model.add_source("Image", &["Image"]);
//! let (blur, blurred) = model.add_step("Blur", &["Output"]);
//! let (_, mask) = model.add_step("Threshold", &["Output"]);
//!
//! let mut previews = PreviewSequencer::new();
//! let mut strip: Vec<SocketId> = Vec::new();
//!
//! for socket in [mask[0], blurred[0], image[0]] {
//!     let event = model.set_previewed(socket, true).unwrap().unwrap();
//!     apply_instructions(&mut strip, &previews.apply_event(event, &model));
//! }
//! assert_eq!(strip, vec![image[0], blurred[0], mask[0]]);
//!
//! let event = model.move_step(blur, 1).unwrap().unwrap();
//! apply_instructions(&mut strip, &previews.apply_event(event, &model));
//! assert_eq!(strip, vec![image[0], mask[0], blurred[0]]);
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod preview;

// Re-export commonly used types
pub use config::PreviewConfig;
pub use error::{PreviewError, Result};
pub use pipeline::{PipelineModel, PipelineOrdering, SocketId, SocketOwner, SourceId, StepId};
pub use preview::{PreviewBridge, PreviewEvent, PreviewInstruction, PreviewSequencer};
