use serde::{Deserialize, Serialize};

/// How the applier reacts when a patch does not fit the value it is
/// replayed against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplyMode {
    /// Degrade silently: missing locations are no-ops, mismatched containers
    /// are replaced.
    #[default]
    Lenient,
    /// Stop at the first mismatch and report it.
    Strict,
}

/// Configuration for patch replay.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatchConfig {
    pub mode: ApplyMode,
}

impl PatchConfig {
    pub fn lenient() -> Self {
        Self {
            mode: ApplyMode::Lenient,
        }
    }

    pub fn strict() -> Self {
        Self {
            mode: ApplyMode::Strict,
        }
    }

    pub fn is_strict(&self) -> bool {
        self.mode == ApplyMode::Strict
    }
}
