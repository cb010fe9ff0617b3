//! Consistency checks for a preview entry list.
//!
//! Entries whose owner no longer resolves in the ordering are skipped for the
//! ordering checks; they are waiting for a removal event.

use crate::pipeline::{PipelineOrdering, SocketId, SocketOwner, StepId};
use crate::preview::entry::PreviewEntry;
use std::collections::HashSet;
use thiserror::Error;

/// The first broken ordering rule found in a preview list.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("source preview at {index} follows a step preview")]
    SourceAfterStep { index: usize },

    #[error("source preview at {index} is out of pipeline order")]
    SourceOrder { index: usize },

    #[error("previews of {step} are split (again at {index})")]
    StepSplit { step: StepId, index: usize },

    #[error("step preview at {index} is out of pipeline order")]
    StepOrder { index: usize },

    #[error("{socket} is previewed twice (again at {index})")]
    Duplicate { socket: SocketId, index: usize },
}

/// Check that `entries` is ordered like the pipeline.
pub fn check_invariants<O: PipelineOrdering + ?Sized>(
    entries: &[PreviewEntry],
    ordering: &O,
) -> Result<(), InvariantViolation> {
    let mut seen_sockets = HashSet::with_capacity(entries.len());
    let mut closed_steps = HashSet::new();
    let mut seen_step = false;
    let mut last_source_index = None;
    let mut last_step_index = None;
    let mut current_step: Option<StepId> = None;

    for (index, entry) in entries.iter().enumerate() {
        if !seen_sockets.insert(entry.socket) {
            return Err(InvariantViolation::Duplicate {
                socket: entry.socket,
                index,
            });
        }

        match entry.owner {
            SocketOwner::Source(source) => {
                if seen_step {
                    return Err(InvariantViolation::SourceAfterStep { index });
                }
                if let Some(pos) = ordering.source_index(source) {
                    if last_source_index.is_some_and(|last| pos < last) {
                        return Err(InvariantViolation::SourceOrder { index });
                    }
                    last_source_index = Some(pos);
                }
            }
            SocketOwner::Step(step) => {
                seen_step = true;
                if current_step != Some(step) {
                    if let Some(previous) = current_step {
                        closed_steps.insert(previous);
                    }
                    if closed_steps.contains(&step) {
                        return Err(InvariantViolation::StepSplit { step, index });
                    }
                    current_step = Some(step);
                }
                if let Some(pos) = ordering.step_index(step) {
                    if last_step_index.is_some_and(|last| pos < last) {
                        return Err(InvariantViolation::StepOrder { index });
                    }
                    last_step_index = Some(pos);
                }
            }
        }
    }

    Ok(())
}
