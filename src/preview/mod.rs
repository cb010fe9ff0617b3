//! Ordered preview strip for the pipeline editor.
//!
//! Previewed output sockets are shown left to right in pipeline order:
//!
//! ```text
//!  sources          steps
//!  [S1] [S2]  |  [A.out] [B.out0 B.out1] [D.out]
//!  ^ prefix   |  ^ one contiguous group per step
//! ```
//!
//! # Design
//!
//! - **`PreviewSequencer`** owns the ordered entries and turns pipeline
//!   events into `PreviewInstruction`s for the display layer.
//! - **Pure relocation planning** — `plan_relocation` computes where a moved
//!   step's block lands without touching any state.
//! - **`PreviewBridge`** queues events from other threads for the UI thread.

pub mod bridge;
pub mod entry;
pub mod event;
pub mod instruction;
pub mod invariants;
pub mod relocation;
pub mod sequencer;

pub use bridge::{PreviewBridge, PreviewEventSender, DEFAULT_EVENT_QUEUE_CAPACITY};
pub use entry::{source_prefix_len, PreviewEntry};
pub use event::PreviewEvent;
pub use instruction::{apply_instructions, PreviewDisplay, PreviewInstruction};
pub use invariants::{check_invariants, InvariantViolation};
pub use relocation::{plan_relocation, Relocation};
pub use sequencer::PreviewSequencer;
