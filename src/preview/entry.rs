//! Preview entries and helpers over a slice of them.

use crate::pipeline::{SocketId, SocketOwner, StepId};

/// One active preview: a socket plus the node that owns it.
///
/// The owner is captured when the entry is created. Socket ownership never
/// changes, so later queries don't need to go back to the pipeline model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewEntry {
    pub socket: SocketId,
    pub owner: SocketOwner,
}

impl PreviewEntry {
    pub fn new(socket: SocketId, owner: SocketOwner) -> Self {
        Self { socket, owner }
    }

    #[inline]
    pub fn belongs_to_step(&self, step: StepId) -> bool {
        self.owner == SocketOwner::Step(step)
    }
}

/// Length of the leading run of source entries.
pub fn source_prefix_len(entries: &[PreviewEntry]) -> usize {
    entries
        .iter()
        .position(|entry| entry.owner.is_step())
        .unwrap_or(entries.len())
}

/// First index of the step group containing `index`.
pub(crate) fn group_start(entries: &[PreviewEntry], index: usize) -> usize {
    let owner = entries[index].owner;
    let mut start = index;
    while start > 0 && entries[start - 1].owner == owner {
        start -= 1;
    }
    start
}

/// Last index of the step group containing `index`.
pub(crate) fn group_end(entries: &[PreviewEntry], index: usize) -> usize {
    let owner = entries[index].owner;
    let mut end = index;
    while end + 1 < entries.len() && entries[end + 1].owner == owner {
        end += 1;
    }
    end
}
