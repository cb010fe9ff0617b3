//! Instructions for the display layer.
//!
//! The sequencer never touches preview widgets. It emits an ordered list of
//! [`PreviewInstruction`]s that the display applies to its own, index-aligned
//! list of handles.

use crate::pipeline::SocketId;

/// One edit to the display-side preview list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewInstruction {
    /// Create a preview for `socket` at `index`, shifting later ones right.
    Insert { index: usize, socket: SocketId },
    /// Drop the preview at `index`, shifting later ones left.
    Remove { index: usize },
}

/// Something that holds one presentation handle per previewed socket.
pub trait PreviewDisplay {
    fn insert(&mut self, index: usize, socket: SocketId);

    fn remove(&mut self, index: usize);
}

/// Mirror list used by tests and headless consumers.
impl PreviewDisplay for Vec<SocketId> {
    fn insert(&mut self, index: usize, socket: SocketId) {
        Vec::insert(self, index, socket);
    }

    fn remove(&mut self, index: usize) {
        Vec::remove(self, index);
    }
}

/// Apply `instructions` to `display` in emission order.
pub fn apply_instructions<D: PreviewDisplay + ?Sized>(
    display: &mut D,
    instructions: &[PreviewInstruction],
) {
    for instruction in instructions {
        match *instruction {
            PreviewInstruction::Insert { index, socket } => display.insert(index, socket),
            PreviewInstruction::Remove { index } => display.remove(index),
        }
    }
}
