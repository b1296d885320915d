use serde::{Deserialize, Serialize};

/// Configuration for the merge walk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// When `true`, a change between two neuron values (unresolved or
    /// folder) produces no patch operation. When `false` it produces a plain
    /// update, like a change between two leaves.
    pub skip_neuron_changes: bool,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            skip_neuron_changes: true,
        }
    }
}

impl MergeConfig {
    /// Report every value change, including changes between neurons.
    pub fn exhaustive() -> Self {
        Self {
            skip_neuron_changes: false,
        }
    }
}
