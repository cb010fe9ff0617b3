//! Relocation of a moved step's preview block.
//!
//! Planning is a pure function of the current entries, the moved step and
//! the distance it moved, so it can be exercised without a pipeline model.
//! Applying a plan edits the entry list and produces the matching display
//! instructions.
//!
//! ```text
//!  distance = +1, step A previews [a1, a2], step B previews [b1]
//!
//!  [a1 a2 b1]     candidate = rightmost + 1 = 2  -> inside B's group
//!         ^^      walk right past B's group      -> land after b1
//!  [b1 a1 a2]
//! ```

use crate::pipeline::StepId;
use crate::preview::entry::{group_end, group_start, source_prefix_len, PreviewEntry};
use crate::preview::instruction::PreviewInstruction;

/// Where a step's preview block goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relocation {
    /// Current indices of the step's entries, ascending.
    pub from: Vec<usize>,
    /// Index of the block's first entry, counted with the block removed.
    pub landing: usize,
}

impl Relocation {
    /// True when applying the plan would leave the entries untouched.
    pub fn is_noop(&self) -> bool {
        let contiguous = self.from.windows(2).all(|w| w[1] == w[0] + 1);
        contiguous && self.from.first() == Some(&self.landing)
    }

    /// Move the block and return the display edits, removals first.
    ///
    /// Removals run from the highest index down so earlier indices stay
    /// valid; insertions run upwards from `landing`, which keeps the block in
    /// its original relative order.
    pub fn apply(&self, entries: &mut Vec<PreviewEntry>) -> Vec<PreviewInstruction> {
        if self.is_noop() {
            return Vec::new();
        }

        let mut instructions = Vec::with_capacity(self.from.len() * 2);
        let mut block = Vec::with_capacity(self.from.len());
        for &index in self.from.iter().rev() {
            block.push(entries.remove(index));
            instructions.push(PreviewInstruction::Remove { index });
        }
        block.reverse();

        debug_assert!(
            self.landing <= entries.len(),
            "landing {} past end of {} entries",
            self.landing,
            entries.len()
        );
        for (offset, entry) in block.into_iter().enumerate() {
            let index = self.landing + offset;
            entries.insert(index, entry);
            instructions.push(PreviewInstruction::Insert {
                index,
                socket: entry.socket,
            });
        }

        instructions
    }
}

/// Plan the move of `step`'s previews after it moved `distance` positions.
///
/// Returns `None` if the step has no previewed sockets. The candidate index
/// is measured from the block's leading edge in the direction of travel. A
/// candidate inside the source prefix is pulled up to the first step slot; a
/// candidate inside another step's group is pushed past that group, so the
/// block always lands next to it and never splits it. Only the first group
/// in the direction of travel is skipped.
pub fn plan_relocation(
    entries: &[PreviewEntry],
    step: StepId,
    distance: isize,
) -> Option<Relocation> {
    let from: Vec<usize> = entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| entry.belongs_to_step(step))
        .map(|(index, _)| index)
        .collect();

    let (&leftmost, &rightmost) = (from.first()?, from.last()?);
    let prefix = source_prefix_len(entries);
    let len = entries.len();

    let candidate = if distance < 0 {
        leftmost as isize + distance
    } else {
        rightmost as isize + distance
    };

    // Landing position counted in the unmodified entry list.
    let landing = if candidate < prefix as isize {
        tracing::trace!(
            "Clamped preview block of {} from {} to source prefix {}",
            step,
            candidate,
            prefix
        );
        prefix
    } else if candidate as usize >= len {
        len
    } else {
        let candidate = candidate as usize;
        if entries[candidate].belongs_to_step(step) {
            // Only reachable when the block was not contiguous to begin with.
            candidate
        } else if distance < 0 {
            group_start(entries, candidate)
        } else {
            group_end(entries, candidate) + 1
        }
    };

    // Shift into coordinates of the list without the block.
    let removed_before = from.iter().filter(|&&index| index < landing).count();
    let remaining = len - from.len();
    let landing = (landing - removed_before).clamp(prefix.min(remaining), remaining);

    Some(Relocation { from, landing })
}
