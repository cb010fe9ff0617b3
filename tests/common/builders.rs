//! Test data builders for creating pipelines

use pipeline_previews::{
    pipeline::PipelineModel, preview::apply_instructions, PreviewSequencer, SocketId, SourceId,
    StepId,
};
use std::collections::HashMap;

/// Builder for a pipeline whose nodes are looked up by name in tests
#[derive(Default)]
pub struct PipelineBuilder {
    sources: Vec<(String, Vec<String>)>,
    steps: Vec<(String, Vec<String>)>,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source(mut self, name: &str, outputs: &[&str]) -> Self {
        self.sources
            .push((name.to_string(), outputs.iter().map(|s| s.to_string()).collect()));
        self
    }

    pub fn step(mut self, name: &str, outputs: &[&str]) -> Self {
        self.steps
            .push((name.to_string(), outputs.iter().map(|s| s.to_string()).collect()));
        self
    }

    pub fn build(self) -> Fixture {
        let mut fixture = Fixture {
            model: PipelineModel::new(),
            previews: PreviewSequencer::new(),
            display: Vec::new(),
            sources: HashMap::new(),
            steps: HashMap::new(),
            sockets: HashMap::new(),
        };

        for (name, outputs) in self.sources {
            let outputs_ref: Vec<&str> = outputs.iter().map(String::as_str).collect();
            let (id, sockets) = fixture.model.add_source(&name, &outputs_ref);
            fixture.sources.insert(name.clone(), id);
            fixture.register_sockets(&name, &outputs, sockets);
        }
        for (name, outputs) in self.steps {
            let outputs_ref: Vec<&str> = outputs.iter().map(String::as_str).collect();
            let (id, sockets) = fixture.model.add_step(&name, &outputs_ref);
            fixture.steps.insert(name.clone(), id);
            fixture.register_sockets(&name, &outputs, sockets);
        }
        fixture
    }
}

/// A pipeline model, a sequencer and a display list kept in step.
///
/// Sockets are named `"<node>"` when the node has a single output, and
/// `"<node>.<output>"` always.
pub struct Fixture {
    pub model: PipelineModel,
    pub previews: PreviewSequencer,
    pub display: Vec<SocketId>,
    sources: HashMap<String, SourceId>,
    steps: HashMap<String, StepId>,
    sockets: HashMap<String, SocketId>,
}

impl Fixture {
    fn register_sockets(&mut self, node: &str, outputs: &[String], ids: Vec<SocketId>) {
        if ids.len() == 1 {
            self.sockets.insert(node.to_string(), ids[0]);
        }
        for (output, id) in outputs.iter().zip(ids) {
            self.sockets.insert(format!("{node}.{output}"), id);
        }
    }

    pub fn socket(&self, name: &str) -> SocketId {
        self.sockets[name]
    }

    pub fn step_id(&self, name: &str) -> StepId {
        self.steps[name]
    }

    pub fn source_id(&self, name: &str) -> SourceId {
        self.sources[name]
    }

    /// Name of a socket, for readable assertions.
    pub fn name_of(&self, socket: SocketId) -> String {
        self.sockets
            .iter()
            .filter(|(_, id)| **id == socket)
            .map(|(name, _)| name.clone())
            .min_by_key(|name| name.len())
            .unwrap_or_else(|| format!("{socket}"))
    }

    /// Current preview order by socket name.
    pub fn order(&self) -> Vec<String> {
        self.previews
            .sockets()
            .into_iter()
            .map(|socket| self.name_of(socket))
            .collect()
    }

    pub fn toggle(&mut self, name: &str, on: bool) {
        let socket = self.socket(name);
        if let Some(event) = self.model.set_previewed(socket, on).unwrap() {
            let instructions = self.previews.apply_event(event, &self.model);
            apply_instructions(&mut self.display, &instructions);
        }
        self.assert_aligned();
    }

    pub fn move_step(&mut self, name: &str, delta: isize) {
        let step = self.step_id(name);
        if let Some(event) = self.model.move_step(step, delta).unwrap() {
            let instructions = self.previews.apply_event(event, &self.model);
            apply_instructions(&mut self.display, &instructions);
        }
        self.assert_aligned();
    }

    pub fn remove_step(&mut self, name: &str) {
        let event = self.model.remove_step(self.step_id(name)).unwrap();
        let instructions = self.previews.apply_event(event, &self.model);
        apply_instructions(&mut self.display, &instructions);
        self.assert_aligned();
    }

    pub fn remove_source(&mut self, name: &str) {
        let event = self.model.remove_source(self.source_id(name)).unwrap();
        let instructions = self.previews.apply_event(event, &self.model);
        apply_instructions(&mut self.display, &instructions);
        self.assert_aligned();
    }

    pub fn assert_aligned(&self) {
        assert_eq!(
            self.display,
            self.previews.sockets(),
            "display list drifted from the sequencer"
        );
        assert_eq!(self.previews.check_invariants(&self.model), Ok(()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_names() {
        let fixture = PipelineBuilder::new()
            .source("Webcam", &["Image"])
            .step("Find Contours", &["Contours", "Hierarchy"])
            .build();

        assert_eq!(fixture.socket("Webcam"), fixture.socket("Webcam.Image"));
        assert_ne!(
            fixture.socket("Find Contours.Contours"),
            fixture.socket("Find Contours.Hierarchy")
        );
        assert_eq!(fixture.name_of(fixture.socket("Webcam.Image")), "Webcam");
    }
}
