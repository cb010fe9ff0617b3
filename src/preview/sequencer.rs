//! The preview sequencer.
//!
//! Owns the ordered list of previewed sockets and keeps it ordered like the
//! pipeline: source previews first (in source order), then step previews
//! grouped per step (in step order). Every mutation returns the display
//! instructions that bring an index-aligned widget list up to date.
//!
//! The sequencer is not thread-safe by itself and is meant to live on the
//! UI thread; events raised elsewhere go through
//! [`PreviewBridge`](crate::preview::PreviewBridge).

use crate::config::PreviewConfig;
use crate::pipeline::{PipelineOrdering, SocketId, SocketOwner, SourceId, StepId};
use crate::preview::entry::{source_prefix_len, PreviewEntry};
use crate::preview::event::PreviewEvent;
use crate::preview::instruction::PreviewInstruction;
use crate::preview::invariants::{check_invariants, InvariantViolation};
use crate::preview::relocation::{plan_relocation, Relocation};

/// Ordered list of active previews.
#[derive(Debug, Clone)]
pub struct PreviewSequencer {
    entries: Vec<PreviewEntry>,
    verify_invariants: bool,
}

impl Default for PreviewSequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl PreviewSequencer {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            verify_invariants: true,
        }
    }

    pub fn with_config(config: &PreviewConfig) -> Self {
        Self {
            entries: Vec::new(),
            verify_invariants: config.verify_invariants,
        }
    }

    /// Enable or disable the ordering check that runs after every mutation.
    pub fn set_verify_invariants(&mut self, verify: bool) {
        self.verify_invariants = verify;
    }

    // ── Queries ──

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[PreviewEntry] {
        &self.entries
    }

    /// Previewed sockets in display order.
    pub fn sockets(&self) -> Vec<SocketId> {
        self.entries.iter().map(|entry| entry.socket).collect()
    }

    pub fn index_of(&self, socket: SocketId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.socket == socket)
    }

    pub fn contains(&self, socket: SocketId) -> bool {
        self.index_of(socket).is_some()
    }

    /// Number of source previews, which always lead the list.
    pub fn source_preview_count(&self) -> usize {
        source_prefix_len(&self.entries)
    }

    pub fn check_invariants<O: PipelineOrdering + ?Sized>(
        &self,
        ordering: &O,
    ) -> Result<(), InvariantViolation> {
        check_invariants(&self.entries, ordering)
    }

    // ── Mutations ──

    /// Show or hide the preview of `socket`.
    ///
    /// Returns the single display edit, or `None` when the socket already had
    /// the requested state.
    pub fn apply_preview_toggle<O: PipelineOrdering + ?Sized>(
        &mut self,
        socket: SocketId,
        want_preview: bool,
        ordering: &O,
    ) -> Option<PreviewInstruction> {
        let instruction = self.toggle(socket, want_preview, ordering);
        self.verify(ordering, "preview toggle");
        instruction
    }

    /// Follow a step that the pipeline already moved by `distance` positions.
    ///
    /// All previews of the step move as one block and keep their relative
    /// order. Steps without previews produce no instructions.
    pub fn apply_step_moved<O: PipelineOrdering + ?Sized>(
        &mut self,
        step: StepId,
        distance: isize,
        ordering: &O,
    ) -> Vec<PreviewInstruction> {
        let instructions = self.relocate(step, distance, ordering);
        self.verify(ordering, "step move");
        instructions
    }

    /// Drop every preview of a source that left the pipeline.
    pub fn apply_source_removed<O: PipelineOrdering + ?Sized>(
        &mut self,
        source: SourceId,
        ordering: &O,
    ) -> Vec<PreviewInstruction> {
        let instructions = self.remove_owned_by(SocketOwner::Source(source));
        self.verify(ordering, "source removal");
        instructions
    }

    /// Drop every preview of a step that left the pipeline.
    pub fn apply_step_removed<O: PipelineOrdering + ?Sized>(
        &mut self,
        step: StepId,
        ordering: &O,
    ) -> Vec<PreviewInstruction> {
        let instructions = self.remove_owned_by(SocketOwner::Step(step));
        self.verify(ordering, "step removal");
        instructions
    }

    /// Dispatch a single pipeline event.
    pub fn apply_event<O: PipelineOrdering + ?Sized>(
        &mut self,
        event: PreviewEvent,
        ordering: &O,
    ) -> Vec<PreviewInstruction> {
        let instructions = self.dispatch(event, ordering);
        self.verify(ordering, "event");
        instructions
    }

    /// Apply a run of queued events against the ordering as it is now.
    ///
    /// The ordering already reflects every event in the batch, so the list
    /// is only checked once all of them have been applied. Any leftover
    /// disagreement is then fixed by [`resync`](Self::resync).
    pub fn apply_batch<O, I>(&mut self, events: I, ordering: &O) -> Vec<PreviewInstruction>
    where
        O: PipelineOrdering + ?Sized,
        I: IntoIterator<Item = PreviewEvent>,
    {
        let mut instructions = Vec::new();
        for event in events {
            instructions.extend(self.dispatch(event, ordering));
        }
        instructions.extend(self.resync(ordering));
        self.verify(ordering, "event batch");
        instructions
    }

    /// Reorder the list to match `ordering`, moving only misplaced entries.
    ///
    /// Entries with the same owner keep their relative order.
    pub fn resync<O: PipelineOrdering + ?Sized>(&mut self, ordering: &O) -> Vec<PreviewInstruction> {
        let mut target = self.entries.clone();
        target.sort_by_key(|entry| match entry.owner {
            SocketOwner::Source(source) => (0, ordering.source_index(source).unwrap_or(usize::MAX)),
            SocketOwner::Step(step) => (1, ordering.step_index(step).unwrap_or(usize::MAX)),
        });
        if target == self.entries {
            return Vec::new();
        }

        let mut instructions = Vec::new();
        for (index, wanted) in target.iter().enumerate() {
            if self.entries[index] == *wanted {
                continue;
            }
            let Some(offset) = self.entries[index..]
                .iter()
                .position(|entry| entry == wanted)
            else {
                continue;
            };
            let from = index + offset;
            let entry = self.entries.remove(from);
            self.entries.insert(index, entry);
            instructions.push(PreviewInstruction::Remove { index: from });
            instructions.push(PreviewInstruction::Insert {
                index,
                socket: entry.socket,
            });
        }

        tracing::warn!(
            "Preview order lagged behind the pipeline, moved {} previews",
            instructions.len() / 2
        );
        instructions
    }

    // ── Internals ──

    fn dispatch<O: PipelineOrdering + ?Sized>(
        &mut self,
        event: PreviewEvent,
        ordering: &O,
    ) -> Vec<PreviewInstruction> {
        match event {
            PreviewEvent::PreviewToggled {
                socket,
                is_previewed,
            } => self
                .toggle(socket, is_previewed, ordering)
                .into_iter()
                .collect(),
            PreviewEvent::StepRelocated { step, distance } => {
                self.relocate(step, distance, ordering)
            }
            PreviewEvent::SourceRemoved { source } => {
                self.remove_owned_by(SocketOwner::Source(source))
            }
            PreviewEvent::StepRemoved { step } => self.remove_owned_by(SocketOwner::Step(step)),
        }
    }

    fn toggle<O: PipelineOrdering + ?Sized>(
        &mut self,
        socket: SocketId,
        want_preview: bool,
        ordering: &O,
    ) -> Option<PreviewInstruction> {
        let current = self.index_of(socket);

        match (want_preview, current) {
            (true, None) => {
                let Some(owner) = ordering.owner_of(socket) else {
                    tracing::warn!("Cannot preview {}: socket is not in the pipeline", socket);
                    return None;
                };
                let Some(index) = self.insertion_index(owner, ordering) else {
                    tracing::warn!("Cannot preview {}: owner {:?} is not in the pipeline", socket, owner);
                    return None;
                };
                self.entries.insert(index, PreviewEntry::new(socket, owner));
                tracing::debug!("Preview of {} opened at {}", socket, index);
                Some(PreviewInstruction::Insert { index, socket })
            }
            (false, Some(index)) => {
                self.entries.remove(index);
                tracing::debug!("Preview of {} closed at {}", socket, index);
                Some(PreviewInstruction::Remove { index })
            }
            _ => None,
        }
    }

    /// Slot for a new preview owned by `owner`.
    ///
    /// Source previews go in front of the first source preview of a later
    /// source. Step previews go after the source prefix, in front of the
    /// first preview of a later step. Entries whose owner no longer resolves
    /// are stepped over, so a new preview never lands inside a group that is
    /// waiting for its removal event.
    fn insertion_index<O: PipelineOrdering + ?Sized>(
        &self,
        owner: SocketOwner,
        ordering: &O,
    ) -> Option<usize> {
        let prefix = self.source_preview_count();
        match owner {
            SocketOwner::Source(source) => {
                let position = ordering.source_index(source)?;
                let later = self.entries[..prefix].iter().position(|entry| {
                    entry
                        .owner
                        .source()
                        .and_then(|other| ordering.source_index(other))
                        .is_some_and(|other| other >= position)
                });
                Some(later.unwrap_or(prefix))
            }
            SocketOwner::Step(step) => {
                let position = ordering.step_index(step)?;
                Some(prefix + first_step_at_or_after(&self.entries[prefix..], position, ordering))
            }
        }
    }

    fn relocate<O: PipelineOrdering + ?Sized>(
        &mut self,
        step: StepId,
        distance: isize,
        ordering: &O,
    ) -> Vec<PreviewInstruction> {
        if distance == 0 {
            tracing::debug!("Ignoring zero-distance move of {}", step);
            return Vec::new();
        }
        let Some(position) = ordering.step_index(step) else {
            tracing::debug!("Ignoring move of {}: it has left the pipeline", step);
            return Vec::new();
        };
        let Some(mut plan) = plan_relocation(&self.entries, step, distance) else {
            return Vec::new();
        };

        // The distance counts pipeline positions, not preview groups. Steps
        // without previews, or several groups in the way, can make the
        // planned slot disagree with the pipeline; the pipeline wins.
        if !self.landing_fits(&plan, position, ordering) {
            let landing = self.ordered_landing(&plan, position, ordering);
            tracing::debug!(
                "Previews of {} planned at {}, placed at {} to follow pipeline order",
                step,
                plan.landing,
                landing
            );
            plan.landing = landing;
        }

        let instructions = plan.apply(&mut self.entries);
        if !instructions.is_empty() {
            tracing::debug!(
                "Moved {} previews of {} by {} to {}",
                plan.from.len(),
                step,
                distance,
                plan.landing
            );
        }
        instructions
    }

    /// Entries left once the planned block is taken out.
    fn remaining(&self, plan: &Relocation) -> Vec<PreviewEntry> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(index, _)| plan.from.binary_search(index).is_err())
            .map(|(_, entry)| *entry)
            .collect()
    }

    /// Whether the nearest resolved neighbours around the planned slot
    /// bracket `position` without splitting a group.
    fn landing_fits<O: PipelineOrdering + ?Sized>(
        &self,
        plan: &Relocation,
        position: usize,
        ordering: &O,
    ) -> bool {
        let remaining = self.remaining(plan);
        let (before, after) = remaining.split_at(plan.landing.min(remaining.len()));

        if let (Some(left), Some(right)) = (before.last(), after.first()) {
            if left.owner == right.owner {
                return false;
            }
        }

        let before_ok = before
            .iter()
            .rev()
            .find_map(|entry| resolved_step_index(entry, ordering))
            .is_none_or(|before| before < position);
        let after_ok = after
            .iter()
            .find_map(|entry| resolved_step_index(entry, ordering))
            .is_none_or(|after| after > position);

        before_ok && after_ok
    }

    /// The slot pipeline order dictates for the block.
    fn ordered_landing<O: PipelineOrdering + ?Sized>(
        &self,
        plan: &Relocation,
        position: usize,
        ordering: &O,
    ) -> usize {
        let prefix = self.source_preview_count();
        let remaining = self.remaining(plan);
        prefix + first_step_at_or_after(&remaining[prefix..], position, ordering)
    }

    fn remove_owned_by(&mut self, owner: SocketOwner) -> Vec<PreviewInstruction> {
        let doomed: Vec<usize> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.owner == owner)
            .map(|(index, _)| index)
            .collect();

        let mut instructions = Vec::with_capacity(doomed.len());
        for &index in doomed.iter().rev() {
            self.entries.remove(index);
            instructions.push(PreviewInstruction::Remove { index });
        }
        if !instructions.is_empty() {
            tracing::debug!("Closed {} previews of removed {:?}", instructions.len(), owner);
        }
        instructions
    }

    fn verify<O: PipelineOrdering + ?Sized>(&self, ordering: &O, operation: &str) {
        if !self.verify_invariants {
            return;
        }
        let result = check_invariants(&self.entries, ordering);
        if let Err(violation) = &result {
            tracing::error!("Preview order broken after {}: {}", operation, violation);
        }
        debug_assert!(
            result.is_ok(),
            "preview order broken after {operation}: {result:?}"
        );
    }
}

fn resolved_step_index<O: PipelineOrdering + ?Sized>(
    entry: &PreviewEntry,
    ordering: &O,
) -> Option<usize> {
    entry.owner.step().and_then(|step| ordering.step_index(step))
}

/// Offset of the first entry in `steps` whose step resolves at or after
/// `position`, or `steps.len()` if there is none.
fn first_step_at_or_after<O: PipelineOrdering + ?Sized>(
    steps: &[PreviewEntry],
    position: usize,
    ordering: &O,
) -> usize {
    steps
        .iter()
        .position(|entry| {
            resolved_step_index(entry, ordering).is_some_and(|other| other >= position)
        })
        .unwrap_or(steps.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{MockPipelineOrdering, PipelineModel};

    fn toggle_on(previews: &mut PreviewSequencer, model: &mut PipelineModel, socket: SocketId) {
        model.set_previewed(socket, true).unwrap();
        previews.apply_preview_toggle(socket, true, &*model);
    }

    #[test]
    fn test_starts_empty() {
        let previews = PreviewSequencer::new();
        assert!(previews.is_empty());
        assert_eq!(previews.source_preview_count(), 0);
    }

    #[test]
    fn test_toggle_orders_by_pipeline() {
        let mut model = PipelineModel::new();
        let (_, s1) = model.add_source("Webcam", &["Image"]);
        let (_, s2) = model.add_source("File", &["Image"]);
        let (_, a) = model.add_step("Blur", &["Output"]);
        let (_, b) = model.add_step("Threshold", &["Output"]);
        let mut previews = PreviewSequencer::new();

        toggle_on(&mut previews, &mut model, b[0]);
        toggle_on(&mut previews, &mut model, s2[0]);
        toggle_on(&mut previews, &mut model, a[0]);
        toggle_on(&mut previews, &mut model, s1[0]);

        assert_eq!(previews.sockets(), vec![s1[0], s2[0], a[0], b[0]]);
        assert_eq!(previews.source_preview_count(), 2);
    }

    #[test]
    fn test_toggle_is_idempotent() {
        let mut model = PipelineModel::new();
        let (_, a) = model.add_step("Blur", &["Output"]);
        let mut previews = PreviewSequencer::new();

        let first = previews.apply_preview_toggle(a[0], true, &model);
        let second = previews.apply_preview_toggle(a[0], true, &model);
        assert_eq!(first, Some(PreviewInstruction::Insert { index: 0, socket: a[0] }));
        assert_eq!(second, None);
        assert_eq!(previews.len(), 1);

        assert_eq!(
            previews.apply_preview_toggle(a[0], false, &model),
            Some(PreviewInstruction::Remove { index: 0 })
        );
        assert_eq!(previews.apply_preview_toggle(a[0], false, &model), None);
    }

    #[test]
    fn test_step_sockets_of_same_step_stay_grouped() {
        let mut model = PipelineModel::new();
        let (_, a) = model.add_step("Find Contours", &["Contours", "Hierarchy"]);
        let (_, b) = model.add_step("Filter Contours", &["Output"]);
        let mut previews = PreviewSequencer::new();

        toggle_on(&mut previews, &mut model, b[0]);
        toggle_on(&mut previews, &mut model, a[1]);
        toggle_on(&mut previews, &mut model, a[0]);

        let sockets = previews.sockets();
        assert_eq!(sockets[2], b[0]);
        assert!(previews.check_invariants(&model).is_ok());
    }

    #[test]
    fn test_unknown_socket_is_ignored() {
        let model = PipelineModel::new();
        let mut previews = PreviewSequencer::new();
        assert_eq!(previews.apply_preview_toggle(SocketId(5), true, &model), None);
        assert!(previews.is_empty());
    }

    #[test]
    fn test_move_without_previews_is_noop() {
        let mut model = PipelineModel::new();
        let (a, _) = model.add_step("Blur", &["Output"]);
        let (_, b) = model.add_step("Threshold", &["Output"]);
        let mut previews = PreviewSequencer::new();
        toggle_on(&mut previews, &mut model, b[0]);

        model.move_step(a, 1).unwrap();
        assert!(previews.apply_step_moved(a, 1, &model).is_empty());
        assert_eq!(previews.sockets(), vec![b[0]]);
    }

    #[test]
    fn test_move_past_unpreviewed_step_follows_pipeline() {
        // Steps [A, B, C, D]; only A and D previewed. A moves one to the right
        // (past B, which has no preview) and must stay ahead of D.
        let mut model = PipelineModel::new();
        let (a, a_out) = model.add_step("A", &["Output"]);
        model.add_step("B", &["Output"]);
        model.add_step("C", &["Output"]);
        let (_, d_out) = model.add_step("D", &["Output"]);
        let mut previews = PreviewSequencer::new();
        toggle_on(&mut previews, &mut model, a_out[0]);
        toggle_on(&mut previews, &mut model, d_out[0]);

        model.move_step(a, 1).unwrap();
        let instructions = previews.apply_step_moved(a, 1, &model);
        assert!(instructions.is_empty());
        assert_eq!(previews.sockets(), vec![a_out[0], d_out[0]]);
    }

    #[test]
    fn test_move_over_two_groups_at_once() {
        let mut model = PipelineModel::new();
        let (a, a_out) = model.add_step("A", &["Output"]);
        let (_, b_out) = model.add_step("B", &["Output"]);
        let (_, c_out) = model.add_step("C", &["Output"]);
        let mut previews = PreviewSequencer::new();
        for socket in [a_out[0], b_out[0], c_out[0]] {
            toggle_on(&mut previews, &mut model, socket);
        }

        model.move_step(a, 2).unwrap();
        previews.apply_step_moved(a, 2, &model);
        assert_eq!(previews.sockets(), vec![b_out[0], c_out[0], a_out[0]]);
    }

    #[test]
    fn test_remove_step_closes_all_its_previews() {
        let mut model = PipelineModel::new();
        let (_, s) = model.add_source("Webcam", &["Image"]);
        let (a, a_out) = model.add_step("Find Contours", &["Contours", "Hierarchy"]);
        let (_, b_out) = model.add_step("Blur", &["Output"]);
        let mut previews = PreviewSequencer::new();
        for socket in [s[0], a_out[0], a_out[1], b_out[0]] {
            toggle_on(&mut previews, &mut model, socket);
        }

        let event = model.remove_step(a).unwrap();
        let instructions = previews.apply_event(event, &model);
        assert_eq!(
            instructions,
            vec![
                PreviewInstruction::Remove { index: 2 },
                PreviewInstruction::Remove { index: 1 },
            ]
        );
        assert_eq!(previews.sockets(), vec![s[0], b_out[0]]);
    }

    #[test]
    fn test_remove_source_closes_its_previews() {
        let mut model = PipelineModel::new();
        let (src, s) = model.add_source("Webcam", &["Image", "Frame Rate"]);
        let (_, a_out) = model.add_step("Blur", &["Output"]);
        let mut previews = PreviewSequencer::new();
        for socket in [s[1], s[0], a_out[0]] {
            toggle_on(&mut previews, &mut model, socket);
        }

        model.remove_source(src).unwrap();
        assert_eq!(previews.apply_source_removed(src, &model).len(), 2);
        assert_eq!(previews.sockets(), vec![a_out[0]]);
    }

    #[test]
    fn test_resync_reorders_lagging_entries() {
        let mut model = PipelineModel::new();
        let (a, a_out) = model.add_step("A", &["Output"]);
        let (_, b_out) = model.add_step("B", &["Output"]);
        let mut previews = PreviewSequencer::new();
        toggle_on(&mut previews, &mut model, a_out[0]);
        toggle_on(&mut previews, &mut model, b_out[0]);

        // The move event has not been delivered yet.
        model.move_step(a, 1).unwrap();
        let instructions = previews.resync(&model);
        assert_eq!(
            instructions,
            vec![
                PreviewInstruction::Remove { index: 1 },
                PreviewInstruction::Insert { index: 0, socket: b_out[0] },
            ]
        );
        assert_eq!(previews.sockets(), vec![b_out[0], a_out[0]]);
        assert!(previews.resync(&model).is_empty());
    }

    #[test]
    fn test_step_insert_queries_only_step_positions() {
        let mut ordering = MockPipelineOrdering::new();
        ordering
            .expect_owner_of()
            .returning(|socket| Some(SocketOwner::Step(StepId(socket.0))));
        ordering
            .expect_step_index()
            .returning(|step| Some(step.0 as usize));
        ordering.expect_source_index().never();

        let mut previews = PreviewSequencer::new();
        previews.apply_preview_toggle(SocketId(2), true, &ordering);
        previews.apply_preview_toggle(SocketId(0), true, &ordering);
        previews.apply_preview_toggle(SocketId(1), true, &ordering);
        assert_eq!(previews.sockets(), vec![SocketId(0), SocketId(1), SocketId(2)]);
    }

    #[test]
    fn test_toggle_skips_over_previews_of_removed_step() {
        let mut model = PipelineModel::new();
        let (x, x_out) = model.add_step("Find Contours", &["Contours", "Hierarchy"]);
        let (_, a_out) = model.add_step("Blur", &["Output"]);
        let (_, c_out) = model.add_step("Threshold", &["Output"]);
        let mut previews = PreviewSequencer::new();
        for socket in [x_out[0], x_out[1], a_out[0]] {
            toggle_on(&mut previews, &mut model, socket);
        }

        // The pipeline runs ahead: C is previewed and X removed before either
        // event reaches the sequencer.
        let toggled = model.set_previewed(c_out[0], true).unwrap().unwrap();
        let removed = model.remove_step(x).unwrap();

        let instructions = previews.apply_event(toggled, &model);
        assert_eq!(
            instructions,
            vec![PreviewInstruction::Insert { index: 3, socket: c_out[0] }]
        );
        assert_eq!(previews.check_invariants(&model), Ok(()));

        previews.apply_event(removed, &model);
        assert_eq!(previews.sockets(), vec![a_out[0], c_out[0]]);
        assert_eq!(previews.check_invariants(&model), Ok(()));
    }

    #[test]
    fn test_batch_with_toggle_before_removal() {
        let mut model = PipelineModel::new();
        let (x, x_out) = model.add_step("Find Contours", &["Contours", "Hierarchy"]);
        let (_, a_out) = model.add_step("Blur", &["Output"]);
        let (_, c_out) = model.add_step("Threshold", &["Output"]);
        let mut previews = PreviewSequencer::new();
        for socket in [x_out[0], x_out[1], a_out[0]] {
            toggle_on(&mut previews, &mut model, socket);
        }

        let toggled = model.set_previewed(c_out[0], true).unwrap().unwrap();
        let removed = model.remove_step(x).unwrap();
        let mut display = vec![x_out[0], x_out[1], a_out[0]];
        let instructions = previews.apply_batch([toggled, removed], &model);
        crate::preview::apply_instructions(&mut display, &instructions);

        assert_eq!(previews.sockets(), vec![a_out[0], c_out[0]]);
        assert_eq!(display, previews.sockets());
    }

    #[test]
    fn test_move_lands_past_previews_of_removed_step() {
        // Steps [A, X, B]; X is removed and A moved behind B before the
        // events arrive.
        let mut model = PipelineModel::new();
        let (a, a_out) = model.add_step("A", &["Output"]);
        let (x, x_out) = model.add_step("X", &["Output"]);
        let (_, b_out) = model.add_step("B", &["Output"]);
        let mut previews = PreviewSequencer::new();
        for socket in [a_out[0], x_out[0], b_out[0]] {
            toggle_on(&mut previews, &mut model, socket);
        }

        let removed = model.remove_step(x).unwrap();
        let moved = model.move_step(a, 1).unwrap().unwrap();

        previews.apply_event(moved, &model);
        assert_eq!(previews.sockets(), vec![x_out[0], b_out[0], a_out[0]]);
        assert_eq!(previews.check_invariants(&model), Ok(()));

        previews.apply_event(removed, &model);
        assert_eq!(previews.sockets(), vec![b_out[0], a_out[0]]);
    }

    #[test]
    fn test_move_of_removed_step_is_ignored() {
        let mut model = PipelineModel::new();
        let (a, a_out) = model.add_step("A", &["Output"]);
        let (_, b_out) = model.add_step("B", &["Output"]);
        let mut previews = PreviewSequencer::new();
        toggle_on(&mut previews, &mut model, a_out[0]);
        toggle_on(&mut previews, &mut model, b_out[0]);

        let moved = model.move_step(a, 1).unwrap().unwrap();
        let removed = model.remove_step(a).unwrap();

        assert!(previews.apply_event(moved, &model).is_empty());
        assert_eq!(
            previews.apply_event(removed, &model),
            vec![PreviewInstruction::Remove { index: 0 }]
        );
        assert_eq!(previews.sockets(), vec![b_out[0]]);
    }

    #[test]
    fn test_source_toggle_skips_over_removed_source() {
        let mut model = PipelineModel::new();
        let (x, x_out) = model.add_source("Webcam", &["Image"]);
        let (_, a_out) = model.add_source("File", &["Image"]);
        let (_, b_out) = model.add_source("Url", &["Image"]);
        let mut previews = PreviewSequencer::new();
        toggle_on(&mut previews, &mut model, x_out[0]);
        toggle_on(&mut previews, &mut model, b_out[0]);

        let removed = model.remove_source(x).unwrap();
        let toggled = model.set_previewed(a_out[0], true).unwrap().unwrap();

        previews.apply_event(toggled, &model);
        assert_eq!(previews.sockets(), vec![x_out[0], a_out[0], b_out[0]]);
        previews.apply_event(removed, &model);
        assert_eq!(previews.sockets(), vec![a_out[0], b_out[0]]);
    }
}
