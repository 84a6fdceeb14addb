//! Test doubles shared by the unit tests.

use crate::rng::UniformSource;

/// Replays a fixed cycle of uniform values and counts the draws taken.
pub(crate) struct ScriptedSource {
    values: Vec<f64>,
    position: usize,
}

impl ScriptedSource {
    pub(crate) fn new(values: &[f64]) -> Self {
        assert!(!values.is_empty(), "script must contain at least one value");
        Self {
            values: values.to_vec(),
            position: 0,
        }
    }

    /// Number of draws taken so far.
    pub(crate) fn draws(&self) -> usize {
        self.position
    }
}

impl UniformSource for ScriptedSource {
    fn next_uniform(&mut self) -> f64 {
        let value = self.values[self.position % self.values.len()];
        self.position += 1;
        value
    }
}
