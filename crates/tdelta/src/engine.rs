//! Configured diff/patch engine.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tdelta_diff::{DiffConfig, Differ, ScalarComparator};
use tdelta_patch::{PatchConfig, Patcher};
use tdelta_types::{DiffValue, Patch};
use tracing::debug;

use crate::error::EngineResult;

/// Combined differ and patcher settings, loadable from any serde format.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub diff: DiffConfig,
    pub patch: PatchConfig,
}

/// A differ and a patcher built from one [`EngineConfig`].
pub struct Engine {
    config: EngineConfig,
    differ: Differ<Box<dyn ScalarComparator + Send + Sync>>,
    patcher: Patcher,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        let differ = Differ::from_config(&config.diff);
        let patcher = Patcher::new(config.patch.clone());
        Self {
            config,
            differ,
            patcher,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn diff(&self, base: &DiffValue, target: &DiffValue) -> Patch {
        self.differ.diff(base, target)
    }

    /// Replays `patch`. Only strict configurations return errors.
    pub fn apply(&self, base: &DiffValue, patch: &Patch) -> EngineResult<Option<DiffValue>> {
        Ok(self.patcher.apply(base, patch)?)
    }

    /// Diff two `serde_json` documents.
    pub fn diff_json(&self, base: &Value, target: &Value) -> Patch {
        let base = DiffValue::from(base.clone());
        let target = DiffValue::from(target.clone());
        self.diff(&base, &target)
    }

    /// Replay `patch` against a `serde_json` document.
    pub fn apply_json(&self, base: &Value, patch: &Patch) -> EngineResult<Option<Value>> {
        let base = DiffValue::from(base.clone());
        match self.apply(&base, patch)? {
            Some(result) => Ok(Some(result.to_json()?)),
            None => Ok(None),
        }
    }

    /// Diffs, replays, and checks the replayed value against `target` using
    /// this engine's own comparison.
    pub fn round_trip(&self, base: &DiffValue, target: &DiffValue) -> EngineResult<bool> {
        let patch = self.diff(base, target);
        let converged = match self.apply(base, &patch)? {
            Some(result) => self.diff(&result, target).is_empty(),
            None => false,
        };
        debug!(operations = patch.len(), converged, "round trip checked");
        Ok(converged)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
