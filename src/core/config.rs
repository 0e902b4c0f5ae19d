use serde::{Deserialize, Serialize};

/// Engine-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Log each node's routing and value shapes at `info` level.
    #[serde(default)]
    pub verbose: bool,
    /// Mirror raw input keys at the namespace root (`x` next to `inputs/x`).
    #[serde(default = "default_input_aliases")]
    pub input_aliases: bool,
}

fn default_input_aliases() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            verbose: false,
            input_aliases: true,
        }
    }
}
