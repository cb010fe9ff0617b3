//! Thread boundary between pipeline edits and the preview strip.
//!
//! Pipeline changes can be raised on any thread. They are queued on a
//! bounded channel and applied by the thread that owns the
//! [`PreviewSequencer`], in arrival order, when it drains the bridge.

use crate::config::PreviewConfig;
use crate::error::{PreviewError, Result};
use crate::pipeline::{PipelineOrdering, SocketId, SourceId, StepId};
use crate::preview::event::PreviewEvent;
use crate::preview::instruction::PreviewInstruction;
use crate::preview::sequencer::PreviewSequencer;
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

/// Default channel capacity for queued events.
pub const DEFAULT_EVENT_QUEUE_CAPACITY: usize = 256;

/// Cloneable handle for raising preview events from any thread.
#[derive(Debug, Clone)]
pub struct PreviewEventSender {
    tx: Sender<PreviewEvent>,
}

impl PreviewEventSender {
    /// Queue an event, blocking while the queue is full.
    pub fn send(&self, event: PreviewEvent) -> Result<()> {
        self.tx.send(event).map_err(|_| PreviewError::ChannelSend)
    }

    /// Queue an event without blocking. Returns `Ok(false)` if the queue is
    /// full and the event was dropped.
    pub fn try_send(&self, event: PreviewEvent) -> Result<bool> {
        match self.tx.try_send(event) {
            Ok(()) => Ok(true),
            Err(TrySendError::Full(event)) => {
                tracing::warn!("Preview event queue full, dropped {:?}", event);
                Ok(false)
            }
            Err(TrySendError::Disconnected(_)) => Err(PreviewError::ChannelSend),
        }
    }

    pub fn preview_toggled(&self, socket: SocketId, is_previewed: bool) -> Result<()> {
        self.send(PreviewEvent::PreviewToggled {
            socket,
            is_previewed,
        })
    }

    pub fn step_relocated(&self, step: StepId, distance: isize) -> Result<()> {
        self.send(PreviewEvent::StepRelocated { step, distance })
    }

    pub fn source_removed(&self, source: SourceId) -> Result<()> {
        self.send(PreviewEvent::SourceRemoved { source })
    }

    pub fn step_removed(&self, step: StepId) -> Result<()> {
        self.send(PreviewEvent::StepRemoved { step })
    }
}

/// UI-side end of the event queue.
#[derive(Debug)]
pub struct PreviewBridge {
    rx: Receiver<PreviewEvent>,
}

impl PreviewBridge {
    /// Create a bridge and the sender for producers.
    pub fn new(capacity: usize) -> (Self, PreviewEventSender) {
        let (tx, rx) = bounded(capacity.max(1));
        (Self { rx }, PreviewEventSender { tx })
    }

    pub fn from_config(config: &PreviewConfig) -> (Self, PreviewEventSender) {
        Self::new(config.event_queue_capacity)
    }

    /// Number of events waiting to be applied.
    pub fn pending(&self) -> usize {
        self.rx.len()
    }

    /// Take all queued events without applying them.
    pub fn drain_events(&self) -> Vec<PreviewEvent> {
        self.rx.try_iter().collect()
    }

    /// Apply all queued events to `sequencer` and return the display edits.
    pub fn drain<O: PipelineOrdering + ?Sized>(
        &self,
        sequencer: &mut PreviewSequencer,
        ordering: &O,
    ) -> Vec<PreviewInstruction> {
        let events = self.drain_events();
        match events.len() {
            0 => Vec::new(),
            1 => sequencer.apply_event(events[0], ordering),
            n => {
                tracing::debug!("Applying {} queued preview events", n);
                sequencer.apply_batch(events, ordering)
            }
        }
    }
}
