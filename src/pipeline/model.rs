//! In-memory pipeline model.
//!
//! Holds the left-to-right order of sources and steps together with their
//! output sockets, and reports every edit as a [`PreviewEvent`] for the
//! preview sequencer. Edits happen here first; the returned event describes
//! a change that has already been made.

use crate::error::{PreviewError, Result};
use crate::pipeline::id::{SocketId, SourceId, StepId};
use crate::pipeline::ordering::PipelineOrdering;
use crate::pipeline::socket::{OutputSocket, SocketOwner};
use crate::preview::PreviewEvent;
use std::collections::HashMap;

/// A source node and its outputs.
#[derive(Debug, Clone)]
pub struct SourceNode {
    pub id: SourceId,
    pub name: String,
    pub outputs: Vec<SocketId>,
}

/// A step node and its outputs.
#[derive(Debug, Clone)]
pub struct StepNode {
    pub id: StepId,
    pub name: String,
    pub outputs: Vec<SocketId>,
}

/// Sources followed by steps, each with their output sockets.
#[derive(Debug, Default)]
pub struct PipelineModel {
    sources: Vec<SourceNode>,
    steps: Vec<StepNode>,
    sockets: HashMap<SocketId, OutputSocket>,
    next_source: u32,
    next_step: u32,
    next_socket: u32,
}

impl PipelineModel {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Graph building ──

    /// Append a source with one output socket per name.
    pub fn add_source(&mut self, name: &str, outputs: &[&str]) -> (SourceId, Vec<SocketId>) {
        let id = SourceId(self.next_source);
        self.next_source += 1;
        let sockets = self.create_sockets(SocketOwner::Source(id), outputs);
        self.sources.push(SourceNode {
            id,
            name: name.to_string(),
            outputs: sockets.clone(),
        });
        tracing::debug!("Added source {} ({})", id, name);
        (id, sockets)
    }

    /// Append a step with one output socket per name.
    pub fn add_step(&mut self, name: &str, outputs: &[&str]) -> (StepId, Vec<SocketId>) {
        self.insert_step(self.steps.len(), name, outputs)
    }

    /// Insert a step at `index` (clamped to the end of the step list).
    pub fn insert_step(
        &mut self,
        index: usize,
        name: &str,
        outputs: &[&str],
    ) -> (StepId, Vec<SocketId>) {
        let id = StepId(self.next_step);
        self.next_step += 1;
        let sockets = self.create_sockets(SocketOwner::Step(id), outputs);
        let index = index.min(self.steps.len());
        self.steps.insert(
            index,
            StepNode {
                id,
                name: name.to_string(),
                outputs: sockets.clone(),
            },
        );
        tracing::debug!("Added step {} ({}) at {}", id, name, index);
        (id, sockets)
    }

    fn create_sockets(&mut self, owner: SocketOwner, names: &[&str]) -> Vec<SocketId> {
        names
            .iter()
            .map(|name| {
                let id = SocketId(self.next_socket);
                self.next_socket += 1;
                self.sockets.insert(id, OutputSocket::new(id, *name, owner));
                id
            })
            .collect()
    }

    // ── Queries ──

    pub fn sources(&self) -> &[SourceNode] {
        &self.sources
    }

    pub fn steps(&self) -> &[StepNode] {
        &self.steps
    }

    pub fn socket(&self, id: SocketId) -> Option<&OutputSocket> {
        self.sockets.get(&id)
    }

    pub fn step_outputs(&self, step: StepId) -> Result<&[SocketId]> {
        self.steps
            .iter()
            .find(|node| node.id == step)
            .map(|node| node.outputs.as_slice())
            .ok_or(PreviewError::UnknownStep(step))
    }

    /// All sockets whose preview flag is set, in pipeline order.
    pub fn previewed_sockets(&self) -> Vec<SocketId> {
        let source_outputs = self.sources.iter().flat_map(|node| node.outputs.iter());
        let step_outputs = self.steps.iter().flat_map(|node| node.outputs.iter());
        source_outputs
            .chain(step_outputs)
            .copied()
            .filter(|id| self.sockets.get(id).is_some_and(|socket| socket.previewed))
            .collect()
    }

    // ── Edits ──

    /// Set a socket's preview flag. Returns an event only if the flag changed.
    pub fn set_previewed(&mut self, socket: SocketId, previewed: bool) -> Result<Option<PreviewEvent>> {
        let entry = self
            .sockets
            .get_mut(&socket)
            .ok_or(PreviewError::UnknownSocket(socket))?;
        if entry.previewed == previewed {
            return Ok(None);
        }
        entry.previewed = previewed;
        Ok(Some(PreviewEvent::PreviewToggled {
            socket,
            is_previewed: previewed,
        }))
    }

    /// Move `step` by `delta` positions, clamped to the ends of the step list.
    ///
    /// The event carries the distance actually moved. Returns `None` when the
    /// step was already at the end it was pushed against.
    pub fn move_step(&mut self, step: StepId, delta: isize) -> Result<Option<PreviewEvent>> {
        let from = self
            .step_index(step)
            .ok_or(PreviewError::UnknownStep(step))?;
        let last = self.steps.len() as isize - 1;
        let to = (from as isize + delta).clamp(0, last) as usize;
        if to == from {
            return Ok(None);
        }

        let node = self.steps.remove(from);
        self.steps.insert(to, node);
        let distance = to as isize - from as isize;
        tracing::debug!("Moved step {} from {} to {}", step, from, to);
        Ok(Some(PreviewEvent::StepRelocated { step, distance }))
    }

    pub fn remove_source(&mut self, source: SourceId) -> Result<PreviewEvent> {
        let index = self
            .source_index(source)
            .ok_or(PreviewError::UnknownSource(source))?;
        let node = self.sources.remove(index);
        for socket in &node.outputs {
            self.sockets.remove(socket);
        }
        tracing::debug!("Removed source {}", source);
        Ok(PreviewEvent::SourceRemoved { source })
    }

    pub fn remove_step(&mut self, step: StepId) -> Result<PreviewEvent> {
        let index = self
            .step_index(step)
            .ok_or(PreviewError::UnknownStep(step))?;
        let node = self.steps.remove(index);
        for socket in &node.outputs {
            self.sockets.remove(socket);
        }
        tracing::debug!("Removed step {}", step);
        Ok(PreviewEvent::StepRemoved { step })
    }
}

impl PipelineOrdering for PipelineModel {
    fn source_index(&self, source: SourceId) -> Option<usize> {
        self.sources.iter().position(|node| node.id == source)
    }

    fn step_index(&self, step: StepId) -> Option<usize> {
        self.steps.iter().position(|node| node.id == step)
    }

    fn owner_of(&self, socket: SocketId) -> Option<SocketOwner> {
        self.sockets.get(&socket).map(|socket| socket.owner)
    }
}
