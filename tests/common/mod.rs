//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

pub mod builders;

/// Scenario 1 pipeline: one source, three single-output steps
pub fn source_and_three_steps() -> builders::Fixture {
    builders::PipelineBuilder::new()
        .source("S1", &["Image"])
        .step("A", &["Output"])
        .step("B", &["Output"])
        .step("C", &["Output"])
        .build()
}

/// Build a `Vec<String>` from string literals
pub fn names(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
